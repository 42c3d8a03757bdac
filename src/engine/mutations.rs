use tracing::{debug, warn};
use ulid::Ulid;

use crate::id::IdSource;
use crate::limits::{ALL_DAY, DEFAULT_WINDOW, LAST_MINUTE, MAX_HOUR};
use crate::model::{DaySetting, OperatingHours, Time, TimeRange, default_window};

use super::{Outcome, Refusal};

/// Shift-and-clamp: the range following `last_end`. Start sits at
/// `last_end`; end is one hour later with the hour clamped to 47. A clamp
/// that would empty the range forces end to 47:59, so the result is
/// well-formed whenever any room remains.
pub(crate) fn next_range(last_end: Time) -> TimeRange {
    let start = last_end;
    let mut end = Time::new((start.hour + 1).min(MAX_HOUR), start.minute);
    if end.to_minutes() <= start.to_minutes() {
        end = Time::new(MAX_HOUR, 59);
    }
    TimeRange::new(start, end)
}

/// Deep-copy of `last` shifted past its end: window and both channel ranges
/// re-derived by shift-and-clamp, limit lists cleared (their containment
/// constraint no longer holds under the new ranges), fresh id.
fn shifted_copy(last: &OperatingHours, id: Ulid) -> OperatingHours {
    let mut window = last.clone();
    window.id = id;
    window.time_range = next_range(last.time_range.end);
    window.pickup.pickup_time = next_range(last.pickup.pickup_time.end);
    window.delivery.pickup_time = next_range(last.delivery.pickup_time.end);
    window.pickup.limits.clear();
    window.delivery.limits.clear();
    window
}

/// Append a new operating-hours window derived from the day's last one.
pub fn generate_window(day: &DaySetting, ids: &mut dyn IdSource) -> Outcome<DaySetting> {
    if day.has_all_day() {
        warn!(day = %day.day, "refused new window: all-day window present");
        return Outcome::Refused(Refusal::AllDayPresent);
    }

    let mut next = day.clone();
    let Some(last) = day.operating_hours.last() else {
        // An emptied day is re-seeded with the stock window.
        next.operating_hours.push(default_window(ids));
        return Outcome::Applied(next);
    };

    if last.time_range.end.to_minutes() >= LAST_MINUTE {
        warn!(day = %day.day, "refused new window: 48-hour day exhausted");
        return Outcome::Refused(Refusal::NoRoomLeft);
    }

    let window = shifted_copy(last, ids.next_id());
    debug!(day = %day.day, window = %window.id, range = %window.time_range, "window generated");
    next.operating_hours.push(window);
    Outcome::Applied(next)
}

/// Drop the window with the given id.
pub fn remove_window(day: &DaySetting, window_id: Ulid) -> Outcome<DaySetting> {
    if day.window(window_id).is_none() {
        return Outcome::Refused(Refusal::UnknownWindow(window_id));
    }
    let mut next = day.clone();
    next.operating_hours.retain(|w| w.id != window_id);
    Outcome::Applied(next)
}

/// Make `window_id` the day's sole, all-day window.
///
/// With more than one window this is destructive, so a first call without
/// `confirmed` only reports how many siblings would be discarded; the
/// caller decides and calls again with `confirmed = true`. The target's
/// limits and channel configuration survive unchanged.
pub fn set_all_day(day: &DaySetting, window_id: Ulid, confirmed: bool) -> Outcome<DaySetting> {
    let Some(target) = day.window(window_id) else {
        return Outcome::Refused(Refusal::UnknownWindow(window_id));
    };
    if target.time_range.is_all_day() {
        return Outcome::Refused(Refusal::AlreadyAllDay);
    }

    let siblings = day.operating_hours.len() - 1;
    if siblings > 0 && !confirmed {
        return Outcome::Refused(Refusal::NeedsConfirmation { will_discard: siblings });
    }

    let mut kept = target.clone();
    kept.time_range = ALL_DAY;
    let mut next = day.clone();
    next.operating_hours = vec![kept];
    if siblings > 0 {
        debug!(day = %day.day, discarded = siblings, "consolidated to all-day");
    }
    Outcome::Applied(next)
}

/// Undo all-day. There is no memory of the pre-all-day range; the window
/// reverts to the stock 09:30–18:00 business window. Lossy on purpose.
pub fn clear_all_day(day: &DaySetting, window_id: Ulid) -> Outcome<DaySetting> {
    match day.window(window_id) {
        None => return Outcome::Refused(Refusal::UnknownWindow(window_id)),
        Some(target) if !target.time_range.is_all_day() => {
            return Outcome::Refused(Refusal::NotAllDay);
        }
        Some(_) => {}
    }
    let mut next = day.clone();
    if let Some(target) = next.window_mut(window_id) {
        target.time_range = DEFAULT_WINDOW;
    }
    Outcome::Applied(next)
}

/// Flip the day's open flag.
pub fn set_open(day: &DaySetting, is_open: bool) -> DaySetting {
    let mut next = day.clone();
    next.is_open = is_open;
    next
}

/// Clone the first day's open flag and windows onto every other day, with
/// fresh window ids so list identity stays unambiguous across days.
pub fn copy_week(week: &[DaySetting], ids: &mut dyn IdSource) -> Vec<DaySetting> {
    let Some(template) = week.first() else {
        return Vec::new();
    };
    week.iter()
        .enumerate()
        .map(|(i, source)| {
            if i == 0 {
                return source.clone();
            }
            let mut day = source.clone();
            day.is_open = template.is_open;
            day.operating_hours = template
                .operating_hours
                .iter()
                .map(|w| {
                    let mut w = w.clone();
                    w.id = ids.next_id();
                    w
                })
                .collect();
            day
        })
        .collect()
}
