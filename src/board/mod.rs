//! Board reconstruction engine.
//!
//! Rebuilds the project board from three loosely-structured sources on disk:
//! the sprint status table, the planning documents, and the per-story files.
//! Every parser here is total: missing or malformed input degrades to
//! defaults plus a warning on the snapshot, never to an error.

pub mod builder;
pub mod model;
pub mod sprint;
pub mod status;
pub mod story;
pub mod titles;

pub use builder::build_board;
pub use model::{BoardSnapshot, EpicSummary, StoryEntry};
pub use status::Status;

use std::path::Path;

/// Read a file as UTF-8, treating a missing or unreadable file as empty.
pub(crate) fn read_text(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_default()
}
