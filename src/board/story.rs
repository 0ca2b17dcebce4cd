//! Parser for individual story markdown files.
//!
//! A story file carries its own title (`# Story N.M: Title`), a `Status:`
//! line, and a checklist of `- [ ]` / `- [x]` items. The parser never fails:
//! a missing or unreadable file produces an all-default record.

use chrono::{DateTime, Utc};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use super::read_text;
use super::status::Status;

static STORY_FILE_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^# Story\s+\d+\.\d+:\s*(.+?)\s*$").unwrap());

static STATUS_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Status:\s*(.+?)\s*$").unwrap());

static CHECKBOX_TOTAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^- \[(?: |x|X)\]").unwrap());

static CHECKBOX_DONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^- \[(?:x|X)\]").unwrap());

/// Everything a single story file contributes to the board.
#[derive(Debug, Clone, Default)]
pub struct ParsedStoryFile {
    pub title: Option<String>,
    pub status: Option<Status>,
    pub checklist_done: usize,
    pub checklist_total: usize,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Parse one story file. Title and status come from the first matching line
/// each; the scan stops once both are found. Checklist items are counted over
/// the whole text. The timestamp is the file's mtime, when available.
pub fn parse_story_file(path: &Path) -> ParsedStoryFile {
    let text = read_text(path);
    if text.is_empty() {
        return ParsedStoryFile::default();
    }

    let mut title: Option<String> = None;
    let mut status: Option<Status> = None;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if title.is_none() {
            if let Some(caps) = STORY_FILE_TITLE_RE.captures(line) {
                title = Some(caps[1].to_string());
                continue;
            }
        }
        if status.is_none() {
            if let Some(caps) = STATUS_LINE_RE.captures(line) {
                status = Some(Status::normalize(Some(&caps[1]), Status::Backlog));
            }
        }
        if title.is_some() && status.is_some() {
            break;
        }
    }

    let checklist_total = CHECKBOX_TOTAL_RE.find_iter(&text).count();
    let checklist_done = CHECKBOX_DONE_RE.find_iter(&text).count();

    let updated_at = std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .map(DateTime::<Utc>::from);

    ParsedStoryFile {
        title,
        status,
        checklist_done,
        checklist_total,
        updated_at,
    }
}
