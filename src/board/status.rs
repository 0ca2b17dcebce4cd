//! Closed status vocabulary and the total normalizer that maps free-text
//! status tokens into it.
//!
//! Two vocabularies share one enum: stories use all six tokens, epics use the
//! `EPIC_STATUSES` subset. Declaration order is the display grouping order for
//! stories (`optional` is a side-state, not a step after `done`), and the
//! derived `Ord` follows it.

use serde::{Deserialize, Serialize};

/// A normalized status token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Backlog,
    ReadyForDev,
    InProgress,
    Review,
    Done,
    Optional,
}

/// Story statuses in display order.
pub const STORY_STATUSES: [Status; 6] = [
    Status::Backlog,
    Status::ReadyForDev,
    Status::InProgress,
    Status::Review,
    Status::Done,
    Status::Optional,
];

/// Epic statuses in display order.
pub const EPIC_STATUSES: [Status; 4] = [
    Status::Backlog,
    Status::InProgress,
    Status::Done,
    Status::Optional,
];

impl Status {
    /// The canonical token string, as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Backlog => "backlog",
            Status::ReadyForDev => "ready-for-dev",
            Status::InProgress => "in-progress",
            Status::Review => "review",
            Status::Done => "done",
            Status::Optional => "optional",
        }
    }

    /// Match a raw token against the vocabulary, case-insensitively and with
    /// surrounding whitespace ignored. Recognized synonyms map onto their
    /// canonical token. Returns `None` for anything else.
    pub fn parse(raw: &str) -> Option<Status> {
        let value = raw.trim().to_ascii_lowercase();
        match value.as_str() {
            "backlog" => Some(Status::Backlog),
            "ready-for-dev" | "ready" | "ready for dev" => Some(Status::ReadyForDev),
            "in-progress" | "in progress" | "doing" | "wip" => Some(Status::InProgress),
            "review" => Some(Status::Review),
            "done" => Some(Status::Done),
            "optional" => Some(Status::Optional),
            _ => None,
        }
    }

    /// Total normalization: absent, empty, and unrecognized input all resolve
    /// to `fallback`. Never fails.
    pub fn normalize(raw: Option<&str>, fallback: Status) -> Status {
        match raw {
            Some(value) if !value.trim().is_empty() => Status::parse(value).unwrap_or(fallback),
            _ => fallback,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
