use ulid::Ulid;

use crate::model::DaySetting;

use super::conflict::MSG_UNORDERED;

/// Advisory warnings for windows whose display range is not ordered.
/// Soft by contract: a malformed operating-hours range is shown, never
/// blocked.
pub fn window_warnings(day: &DaySetting) -> Vec<(Ulid, String)> {
    day.operating_hours
        .iter()
        .filter(|w| !w.time_range.is_ordered())
        .map(|w| (w.id, MSG_UNORDERED.to_string()))
        .collect()
}

/// How many sibling windows a set-all-day on `window_id` would discard.
/// `None` when the id is unknown, the window is already all-day, or it is
/// the day's only window — the cases where consolidation costs nothing.
pub fn will_consolidate(day: &DaySetting, window_id: Ulid) -> Option<usize> {
    let target = day.window(window_id)?;
    if target.time_range.is_all_day() || day.operating_hours.len() < 2 {
        return None;
    }
    Some(day.operating_hours.len() - 1)
}
