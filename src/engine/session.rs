use tracing::{debug, warn};
use ulid::Ulid;

use crate::id::IdSource;
use crate::limits::DEFAULT_LIMIT_VALUE;
use crate::model::{LimitType, RepeatEvery, TimeRange, TimeSlotLimit};

use super::conflict::{first_overlap, validate_limit};
use super::{Outcome, Refusal, ValidationReport};

/// Field changes for one capacity limit; `None` leaves a field alone.
/// `repeat` is doubly optional so a patch can clear the repeat step.
#[derive(Debug, Clone, Default)]
pub struct LimitPatch {
    pub limit_type: Option<LimitType>,
    pub limit_value: Option<u32>,
    pub repeat: Option<Option<RepeatEvery>>,
}

/// In-progress edit of one channel's capacity limits.
///
/// The session works on its own copy; nothing reaches the caller's
/// schedule until [`LimitSession::commit`] comes back clean. A failed
/// commit leaves the session editable for another attempt.
#[derive(Debug, Clone)]
pub struct LimitSession {
    window: TimeRange,
    limits: Vec<TimeSlotLimit>,
}

impl LimitSession {
    /// Start editing against the channel's pickup window. An empty incoming
    /// set is seeded with one default limit spanning the whole window.
    pub fn open(initial: &[TimeSlotLimit], window: TimeRange, ids: &mut dyn IdSource) -> Self {
        let limits = if initial.is_empty() {
            vec![seed_limit(window, ids.next_id())]
        } else {
            initial.to_vec()
        };
        Self { window, limits }
    }

    pub fn window(&self) -> TimeRange {
        self.window
    }

    pub fn limits(&self) -> &[TimeSlotLimit] {
        &self.limits
    }

    /// Append a limit starting where the latest (by start time) one ends,
    /// extending to the window's end and copying the latest limit's
    /// type/value/repeat. Refused when the latest limit already reaches the
    /// window's end; surfacing that transiently is the caller's concern.
    pub fn add(&mut self, ids: &mut dyn IdSource) -> Outcome<Ulid> {
        // max_by_key keeps the last of equal starts, like a stable sort.
        let Some(latest) = self.limits.iter().max_by_key(|l| l.interval.start.to_minutes())
        else {
            let seeded = seed_limit(self.window, ids.next_id());
            let id = seeded.id;
            self.limits.push(seeded);
            return Outcome::Applied(id);
        };

        if latest.interval.end.to_minutes() >= self.window.end.to_minutes() {
            warn!(window = %self.window, "refused new limit: no room before window end");
            return Outcome::Refused(Refusal::NoRoomForLimit);
        }

        let limit = TimeSlotLimit {
            id: ids.next_id(),
            interval: TimeRange::new(latest.interval.end, self.window.end),
            limit_type: latest.limit_type,
            limit_value: latest.limit_value,
            repeat: latest.repeat,
        };
        let id = limit.id;
        self.limits.push(limit);
        Outcome::Applied(id)
    }

    /// Apply field changes to the limit with the given id. The cap value is
    /// clamped to at least 1. Returns false when the id is unknown.
    pub fn update_limit(&mut self, id: Ulid, patch: LimitPatch) -> bool {
        let Some(limit) = self.limits.iter_mut().find(|l| l.id == id) else {
            return false;
        };
        if let Some(limit_type) = patch.limit_type {
            limit.limit_type = limit_type;
        }
        if let Some(limit_value) = patch.limit_value {
            limit.limit_value = limit_value.max(1);
        }
        if let Some(repeat) = patch.repeat {
            limit.repeat = repeat;
        }
        true
    }

    /// Replace a limit's interval. Validity is judged at commit, not here.
    pub fn set_interval(&mut self, id: Ulid, interval: TimeRange) -> bool {
        let Some(limit) = self.limits.iter_mut().find(|l| l.id == id) else {
            return false;
        };
        limit.interval = interval;
        true
    }

    pub fn remove_limit(&mut self, id: Ulid) -> bool {
        let before = self.limits.len();
        self.limits.retain(|l| l.id != id);
        self.limits.len() != before
    }

    /// Validate the whole set and hand the limits back only when clean.
    ///
    /// Per-limit containment and ordering errors accumulate under the
    /// limit's id; an overlap adds one general error naming the two
    /// conflicting 1-based positions in session order. Any error means no
    /// save: the caller keeps its previous set and the session stays open.
    pub fn commit(&self) -> Result<Vec<TimeSlotLimit>, ValidationReport> {
        let mut report = ValidationReport::default();

        for limit in &self.limits {
            let errors = validate_limit(limit, &self.window);
            if !errors.is_empty() {
                report.per_limit.insert(limit.id, errors);
            }
        }

        if self.limits.len() > 1 {
            let intervals: Vec<TimeRange> = self.limits.iter().map(|l| l.interval).collect();
            if let Some((first, second)) = first_overlap(&intervals) {
                report
                    .general
                    .push(format!("limits {} and {} overlap", first + 1, second + 1));
            }
        }

        if report.is_empty() {
            debug!(count = self.limits.len(), "limit set committed");
            Ok(self.limits.clone())
        } else {
            warn!(
                general = report.general.len(),
                flagged = report.per_limit.len(),
                "limit set rejected"
            );
            Err(report)
        }
    }
}

fn seed_limit(window: TimeRange, id: Ulid) -> TimeSlotLimit {
    TimeSlotLimit {
        id,
        interval: window,
        limit_type: LimitType::Order,
        limit_value: DEFAULT_LIMIT_VALUE,
        repeat: None,
    }
}
