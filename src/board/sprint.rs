//! Parser for the sprint status table.
//!
//! The table is a YAML-like document containing a `development_status:` block
//! of two-space-indented `key: value` lines. It is hand-edited and frequently
//! half-broken, so the parser is a tolerant line scanner rather than a YAML
//! reader: malformed entries are skipped, and a missing or unreadable file
//! yields an empty map.

use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use super::read_text;
use super::status::Status;

static ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s{2}([a-z0-9-]+):\s*([a-z-]+)\s*$").unwrap());

/// Scan `path` for the `development_status:` block and return its entries.
///
/// Values are normalized into the closed vocabulary where possible; a value
/// that matches no token is preserved verbatim so the map reflects what the
/// file actually says. Lines before the block marker are ignored. Inside the
/// block, blank lines and `#` comments are skipped, a line not indented by two
/// spaces ends the block, and an indented line that fails the entry pattern is
/// dropped.
pub fn parse_sprint_status(path: &Path) -> HashMap<String, String> {
    let text = read_text(path);
    if text.is_empty() {
        return HashMap::new();
    }

    let mut statuses = HashMap::new();
    let mut in_block = false;

    for line in text.lines() {
        let stripped = line.trim();

        if !in_block {
            if stripped == "development_status:" {
                in_block = true;
            }
            continue;
        }

        if stripped.is_empty() || stripped.starts_with('#') {
            continue;
        }

        if !line.starts_with("  ") {
            break;
        }

        if let Some(caps) = ENTRY_RE.captures(line) {
            let value = &caps[2];
            let mapped = match Status::parse(value) {
                Some(status) => status.as_str().to_string(),
                None => value.to_string(),
            };
            statuses.insert(caps[1].to_string(), mapped);
        }
    }

    statuses
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_sprint(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sprint-status.yaml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_parse_basic_block() {
        let (_dir, path) = write_sprint(
            "project: demo\ndevelopment_status:\n  epic-1: in-progress\n  1-1-setup: done\n",
        );
        let statuses = parse_sprint_status(&path);
        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses["epic-1"], "in-progress");
        assert_eq!(statuses["1-1-setup"], "done");
    }

    #[test]
    fn test_missing_file_is_empty() {
        let statuses = parse_sprint_status(Path::new("/nonexistent/sprint-status.yaml"));
        assert!(statuses.is_empty());
    }

    #[test]
    fn test_lines_before_marker_are_ignored() {
        let (_dir, path) = write_sprint(
            "  1-1-early: done\nother_section:\n  2-2-other: done\ndevelopment_status:\n  1-1-setup: review\n",
        );
        let statuses = parse_sprint_status(&path);
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses["1-1-setup"], "review");
    }

    #[test]
    fn test_dedent_terminates_block() {
        let (_dir, path) = write_sprint(
            "development_status:\n  1-1-setup: done\nnext_section:\n  1-2-after: done\n",
        );
        let statuses = parse_sprint_status(&path);
        assert_eq!(statuses.len(), 1);
        assert!(statuses.contains_key("1-1-setup"));
    }

    #[test]
    fn test_blank_and_comment_lines_are_skipped() {
        let (_dir, path) = write_sprint(
            "development_status:\n\n  # epics\n  epic-1: done\n\n  1-1-setup: done\n",
        );
        let statuses = parse_sprint_status(&path);
        assert_eq!(statuses.len(), 2);
    }

    #[test]
    fn test_malformed_entry_is_skipped() {
        let (_dir, path) = write_sprint(
            "development_status:\n  Epic-1: done\n  1-1-setup done\n  1-2-ok: done\n",
        );
        let statuses = parse_sprint_status(&path);
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses["1-2-ok"], "done");
    }

    #[test]
    fn test_over_indented_entry_is_skipped_not_terminal() {
        let (_dir, path) = write_sprint(
            "development_status:\n   1-1-deep: done\n  1-2-ok: done\n",
        );
        let statuses = parse_sprint_status(&path);
        assert_eq!(statuses.len(), 1);
        assert!(statuses.contains_key("1-2-ok"));
    }

    #[test]
    fn test_unrecognized_value_preserved_verbatim() {
        let (_dir, path) = write_sprint("development_status:\n  1-1-setup: blocked\n");
        let statuses = parse_sprint_status(&path);
        assert_eq!(statuses["1-1-setup"], "blocked");
    }

    #[test]
    fn test_synonym_value_is_normalized() {
        let (_dir, path) = write_sprint("development_status:\n  1-1-setup: wip\n");
        let statuses = parse_sprint_status(&path);
        assert_eq!(statuses["1-1-setup"], "in-progress");
    }

    #[test]
    fn test_indented_marker_still_opens_block() {
        let (_dir, path) = write_sprint("  development_status:\n  1-1-setup: done\n");
        let statuses = parse_sprint_status(&path);
        assert_eq!(statuses["1-1-setup"], "done");
    }

    #[test]
    fn test_no_marker_yields_empty() {
        let (_dir, path) = write_sprint("statuses:\n  1-1-setup: done\n");
        assert!(parse_sprint_status(&path).is_empty());
    }
}
