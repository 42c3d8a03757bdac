use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Why a state-changing operation declined to change anything.
///
/// A refusal is a normal outcome, not a failure: the caller gets its input
/// back untouched and decides what to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refusal {
    /// The day already has an all-day window; nothing may sit next to it.
    AllDayPresent,
    /// The last window already ends at 47:59 — no room in the 48-hour day.
    NoRoomLeft,
    AlreadyAllDay,
    NotAllDay,
    /// Consolidating would discard sibling windows; the caller must confirm
    /// before the discard happens.
    NeedsConfirmation { will_discard: usize },
    /// The latest limit already reaches the pickup window's end.
    NoRoomForLimit,
    UnknownWindow(Ulid),
}

impl fmt::Display for Refusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Refusal::AllDayPresent => write!(f, "day already has an all-day window"),
            Refusal::NoRoomLeft => write!(f, "no room left in the 48-hour day"),
            Refusal::AlreadyAllDay => write!(f, "window is already all-day"),
            Refusal::NotAllDay => write!(f, "window is not all-day"),
            Refusal::NeedsConfirmation { will_discard } => {
                write!(f, "consolidating will discard {will_discard} other window(s); confirmation required")
            }
            Refusal::NoRoomForLimit => {
                write!(f, "latest limit already reaches the end of the pickup window")
            }
            Refusal::UnknownWindow(id) => write!(f, "unknown window: {id}"),
        }
    }
}

impl std::error::Error for Refusal {}

/// Result of a state-changing operation: a fresh value graph, or the reason
/// the input was left as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Applied(T),
    Refused(Refusal),
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::Refused(_) => None,
        }
    }

    pub fn refusal(&self) -> Option<&Refusal> {
        match self {
            Outcome::Applied(_) => None,
            Outcome::Refused(refusal) => Some(refusal),
        }
    }
}

/// Structured commit report: set-wide messages plus per-limit error lists
/// keyed by limit id. Empty report means the commit went through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub general: Vec<String>,
    pub per_limit: BTreeMap<Ulid, Vec<String>>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.general.is_empty() && self.per_limit.is_empty()
    }
}
