//! Wire model for the board snapshot.
//!
//! These are the JSON shapes the dashboard consumes. A snapshot is the result
//! of one full rebuild from the artifact tree and is never mutated after
//! construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::status::Status;

/// One epic with its computed story progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpicSummary {
    /// Table key, `"epic-<number>"`.
    pub key: String,
    pub number: u32,
    pub title: String,
    pub status: Status,
    pub story_total: usize,
    pub story_done: usize,
    pub story_in_progress: usize,
    pub story_review: usize,
    /// Stories still in `backlog` or `ready-for-dev`.
    pub story_backlog: usize,
    /// `floor(100 * done / total)`, 0 when the epic has no stories.
    pub progress_percent: u32,
}

/// One story as the board displays it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryEntry {
    /// Table key or file stem, `"<epic>-<story>-<slug>"`.
    pub key: String,
    pub epic_number: u32,
    pub story_number: u32,
    /// `"<epic>.<story>"` for display.
    pub display_number: String,
    pub title: String,
    /// The effective status the board shows. The sprint table is
    /// authoritative when it has an entry for this story.
    pub status: Status,
    pub status_from_sprint: Option<Status>,
    pub status_from_file: Option<Status>,
    /// True when the story file declares a status that disagrees with the
    /// sprint table.
    pub status_mismatch: bool,
    pub file_path: String,
    pub file_exists: bool,
    pub updated_at: Option<DateTime<Utc>>,
    pub checklist_done: usize,
    pub checklist_total: usize,
}

/// One complete rebuild of the board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub workspace_root: String,
    pub bmad_root: String,
    pub bmad_output: String,
    pub sprint_status_file: String,
    pub story_count: usize,
    pub epic_count: usize,
    /// Histogram over effective story statuses. Every story token is present,
    /// zero or not, and the values sum to `story_count`.
    pub stories_by_status: BTreeMap<Status, usize>,
    pub status_mismatch_count: usize,
    pub missing_file_count: usize,
    /// Human-readable structural problems (missing root, missing table).
    pub warnings: Vec<String>,
    /// Ascending by epic number.
    pub epics: Vec<EpicSummary>,
    /// Ascending by (epic number, story number).
    pub stories: Vec<StoryEntry>,
}
