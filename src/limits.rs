use crate::model::{Time, TimeRange};

/// Highest addressable hour: 24..=47 spill into the following day.
pub const MAX_HOUR: u8 = 47;

/// Last addressable minute of the 48-hour day (47:59).
pub const LAST_MINUTE: u16 = MAX_HOUR as u16 * 60 + 59;

/// The exact range that means "all day". Matched exactly, not by span.
pub const ALL_DAY: TimeRange = TimeRange {
    start: Time { hour: 0, minute: 0 },
    end: Time { hour: 23, minute: 59 },
};

/// Stock business window. Unchecking all-day reverts to this range; an
/// emptied day is re-seeded with it.
pub const DEFAULT_WINDOW: TimeRange = TimeRange {
    start: Time { hour: 9, minute: 30 },
    end: Time { hour: 18, minute: 0 },
};

/// Cap value a freshly seeded capacity limit starts with.
pub const DEFAULT_LIMIT_VALUE: u32 = 2;

/// Furthest symbolic booking date a channel schedule may reference.
pub const MAX_DATE_OFFSET: u8 = 30;
