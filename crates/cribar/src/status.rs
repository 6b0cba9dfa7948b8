//! Issue status values and their semantic groups.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed enumeration of issue statuses the application knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueStatus {
    /// Newly reported
    Open,
    /// Accepted, not started
    #[serde(rename = "To Do")]
    ToDo,
    /// Being worked on
    #[serde(rename = "In Progress")]
    InProgress,
    /// Work finished
    Done,
    /// Resolved and archived
    Closed,
}

impl IssueStatus {
    /// Every status, in display order
    pub const ALL: [Self; 5] = [
        Self::Open,
        Self::ToDo,
        Self::InProgress,
        Self::Done,
        Self::Closed,
    ];

    /// Statuses representing unfinished work
    pub const OPEN_LIKE: [Self; 3] = [Self::Open, Self::ToDo, Self::InProgress];

    /// Statuses representing finished work
    pub const CLOSED_LIKE: [Self; 2] = [Self::Done, Self::Closed];

    /// Display label, exactly as the application renders it
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
            Self::Closed => "Closed",
        }
    }

    /// Parse a display label back into a status
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }

    /// All display labels, the validation whitelist
    #[must_use]
    pub fn labels() -> Vec<String> {
        Self::ALL.iter().map(|s| s.label().to_string()).collect()
    }

    /// Whether this status counts as unfinished work
    #[must_use]
    pub fn is_open_like(self) -> bool {
        Self::OPEN_LIKE.contains(&self)
    }

    /// Whether this status counts as finished work
    #[must_use]
    pub fn is_closed_like(self) -> bool {
        Self::CLOSED_LIKE.contains(&self)
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
