use crate::model::{TimeRange, TimeSlotLimit};

pub(crate) const MSG_OUT_OF_WINDOW: &str = "limit interval must stay inside the pickup window";
pub(crate) const MSG_UNORDERED: &str = "end time must be after start time";

/// First overlapping pair among `intervals`, reported as indices into the
/// caller's original list, earlier start first.
///
/// Sorts by start (stable on ties) and scans adjacent sorted pairs: for a
/// set of well-formed closed-open intervals, any overlap shows up between
/// sorted neighbours, so one pass is enough. Intervals with `end <= start`
/// must be rejected before this runs or that guarantee breaks. Only the
/// first conflict in sorted order is reported; the set is re-checked after
/// each fix.
pub fn first_overlap(intervals: &[TimeRange]) -> Option<(usize, usize)> {
    if intervals.len() < 2 {
        return None;
    }
    let mut order: Vec<usize> = (0..intervals.len()).collect();
    order.sort_by_key(|&i| intervals[i].start.to_minutes());
    for pair in order.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if intervals[next].start.to_minutes() < intervals[prev].end.to_minutes() {
            return Some((prev, next));
        }
    }
    None
}

/// Hard-error checks for one capacity limit against its channel's pickup
/// window: containment first, then internal ordering.
pub(crate) fn validate_limit(limit: &TimeSlotLimit, window: &TimeRange) -> Vec<String> {
    let mut errors = Vec::new();
    if !window.contains(&limit.interval) {
        errors.push(MSG_OUT_OF_WINDOW.to_string());
    }
    if !limit.interval.is_ordered() {
        errors.push(MSG_UNORDERED.to_string());
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Time;

    fn range(sh: u8, sm: u8, eh: u8, em: u8) -> TimeRange {
        TimeRange::new(Time::new(sh, sm), Time::new(eh, em))
    }

    #[test]
    fn touching_intervals_do_not_conflict() {
        let set = [range(9, 0, 10, 0), range(10, 0, 11, 0)];
        assert_eq!(first_overlap(&set), None);
    }

    #[test]
    fn overlap_reports_original_positions() {
        let set = [range(9, 0, 10, 30), range(10, 0, 11, 0)];
        assert_eq!(first_overlap(&set), Some((0, 1)));
    }

    #[test]
    fn overlap_found_when_input_is_unsorted() {
        // Index 1 starts earlier; it must be named first.
        let set = [range(10, 0, 11, 0), range(9, 0, 10, 30)];
        assert_eq!(first_overlap(&set), Some((1, 0)));
    }

    #[test]
    fn only_first_conflict_in_sorted_order_is_reported() {
        let set = [
            range(9, 0, 10, 30),
            range(10, 0, 12, 30),
            range(12, 0, 13, 0),
        ];
        assert_eq!(first_overlap(&set), Some((0, 1)));
    }

    #[test]
    fn identical_starts_conflict() {
        let set = [range(9, 0, 10, 0), range(9, 0, 9, 30)];
        assert_eq!(first_overlap(&set), Some((0, 1)));
    }

    #[test]
    fn rechecking_sorted_output_reports_the_same_conflict() {
        let mut set = vec![
            range(12, 0, 13, 0),
            range(9, 0, 10, 30),
            range(10, 0, 11, 0),
        ];
        let first = first_overlap(&set).map(|(a, b)| (set[a], set[b]));
        set.sort_by_key(|r| r.start.to_minutes());
        let second = first_overlap(&set).map(|(a, b)| (set[a], set[b]));
        assert_eq!(first, second);
    }

    #[test]
    fn singleton_and_empty_sets_never_conflict() {
        assert_eq!(first_overlap(&[]), None);
        assert_eq!(first_overlap(&[range(9, 0, 8, 0)]), None);
    }

    #[test]
    fn validate_limit_flags_both_errors() {
        let window = range(9, 0, 20, 0);
        let limit = TimeSlotLimit {
            id: ulid::Ulid::new(),
            interval: range(21, 0, 8, 0),
            limit_type: crate::model::LimitType::Order,
            limit_value: 1,
            repeat: None,
        };
        let errors = validate_limit(&limit, &window);
        assert_eq!(errors, vec![MSG_OUT_OF_WINDOW.to_string(), MSG_UNORDERED.to_string()]);
    }

    #[test]
    fn validate_limit_containment_start_before_window() {
        let window = range(9, 0, 20, 0);
        let limit = TimeSlotLimit {
            id: ulid::Ulid::new(),
            interval: range(8, 0, 10, 0),
            limit_type: crate::model::LimitType::Order,
            limit_value: 1,
            repeat: None,
        };
        assert_eq!(validate_limit(&limit, &window), vec![MSG_OUT_OF_WINDOW.to_string()]);
    }

    #[test]
    fn validate_limit_clean() {
        let window = range(9, 0, 20, 0);
        let limit = TimeSlotLimit {
            id: ulid::Ulid::new(),
            interval: range(9, 0, 20, 0),
            limit_type: crate::model::LimitType::Item,
            limit_value: 3,
            repeat: None,
        };
        assert!(validate_limit(&limit, &window).is_empty());
    }
}
