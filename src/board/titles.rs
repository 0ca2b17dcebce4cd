//! Title extraction from planning documents.
//!
//! Scans markdown planning files for epic headings (`### Epic N: Title`) and
//! story bullets (`- N.M Title`). Documents are processed in caller order and
//! every match overwrites the previous title for that key, so on a conflict
//! the last occurrence across all documents wins.

use regex::Regex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use super::read_text;

static EPIC_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^### Epic\s+(\d+):\s*(.+?)\s*$").unwrap());

static STORY_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-\s+(\d+)\.(\d+)\s+(.+?)\s*$").unwrap());

/// Titles collected from the planning documents.
#[derive(Debug, Default)]
pub struct TitleIndex {
    /// Epic number to title.
    pub epics: HashMap<u32, String>,
    /// `"<epic>-<story>"` to title.
    pub stories: HashMap<String, String>,
}

/// Extract epic and story titles from `files`, in order. Missing files
/// contribute nothing.
pub fn parse_titles(files: &[PathBuf]) -> TitleIndex {
    let mut index = TitleIndex::default();

    for path in files {
        let text = read_text(path);
        if text.is_empty() {
            continue;
        }

        for raw_line in text.lines() {
            let line = raw_line.trim();

            if let Some(caps) = EPIC_TITLE_RE.captures(line) {
                if let Ok(epic) = caps[1].parse::<u32>() {
                    index.epics.insert(epic, caps[2].to_string());
                }
                continue;
            }

            if let Some(caps) = STORY_LINE_RE.captures(line) {
                if let (Ok(epic), Ok(story)) =
                    (caps[1].parse::<u32>(), caps[2].parse::<u32>())
                {
                    index
                        .stories
                        .insert(format!("{}-{}", epic, story), caps[3].to_string());
                }
            }
        }
    }

    index
}
