use std::fmt;

use super::model::PlaceError;
use super::region::CellRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
}

/// Transient feedback for the user. Successful commits are silent.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// A released selection overlapped a placed region and was discarded.
    Overlap { candidate: CellRange, existing: String },
    /// A released selection reached past the grid and was discarded.
    OutOfBounds { candidate: CellRange },
    /// A region was removed; the rest were renumbered.
    RegionRemoved { id: String },
}

impl Notification {
    pub fn level(&self) -> NotificationLevel {
        match self {
            Notification::Overlap { .. } | Notification::OutOfBounds { .. } => {
                NotificationLevel::Warning
            }
            Notification::RegionRemoved { .. } => NotificationLevel::Info,
        }
    }
}

impl From<PlaceError> for Notification {
    fn from(err: PlaceError) -> Self {
        match err {
            PlaceError::Overlap(err) => Notification::Overlap {
                candidate: err.candidate,
                existing: err.existing,
            },
            PlaceError::OutOfBounds { candidate, .. } => Notification::OutOfBounds { candidate },
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Overlap { candidate, existing } => {
                write!(f, "selection ({}) overlaps existing item {}", candidate, existing)
            }
            Notification::OutOfBounds { candidate } => {
                write!(f, "selection ({}) lies outside the grid", candidate)
            }
            Notification::RegionRemoved { id } => write!(f, "item {} removed", id),
        }
    }
}
