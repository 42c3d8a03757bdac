use std::fmt;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::id::IdSource;
use crate::limits::{ALL_DAY, DEFAULT_WINDOW, MAX_DATE_OFFSET, MAX_HOUR};

/// Minute-precision time of day. Hours 0..=23 are the current day; 24..=47
/// are the same wall-clock hours of the following day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
}

impl Time {
    pub const fn new(hour: u8, minute: u8) -> Self {
        debug_assert!(hour <= MAX_HOUR, "hour outside the 48-hour range");
        debug_assert!(minute <= 59, "minute out of range");
        Self { hour, minute }
    }

    /// Minutes since 00:00 of the current day (0..=2879).
    pub const fn to_minutes(self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour % 24, self.minute)?;
        if self.hour >= 24 {
            write!(f, " (+1d)")?;
        }
        Ok(())
    }
}

/// A time-of-day interval. Nothing is enforced at construction; whether
/// `end > start` holds is the consumer's business (soft warning for
/// operating-hours windows, hard error for capacity limits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: Time,
    pub end: Time,
}

impl TimeRange {
    pub const fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    /// True iff the range is non-empty, i.e. `end > start` by minutes.
    pub fn is_ordered(&self) -> bool {
        self.end.to_minutes() > self.start.to_minutes()
    }

    /// True iff `inner` lies entirely within `self`.
    pub fn contains(&self, inner: &TimeRange) -> bool {
        self.start.to_minutes() <= inner.start.to_minutes()
            && inner.end.to_minutes() <= self.end.to_minutes()
    }

    /// Closed-open overlap: ranges touching at a boundary do not overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start.to_minutes() < other.end.to_minutes()
            && other.start.to_minutes() < self.end.to_minutes()
    }

    /// Exact match against 00:00–23:59. A window spanning the same minutes
    /// with different endpoints is not all-day.
    pub fn is_all_day(&self) -> bool {
        *self == ALL_DAY
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}~{}", self.start, self.end)
    }
}

/// What a capacity limit caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitType {
    Order,
    Item,
}

/// Repeat step for a capacity limit, in minutes within its interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatEvery {
    Q15,
    Q30,
    Q45,
    H1,
}

impl RepeatEvery {
    pub const fn minutes(self) -> u16 {
        match self {
            RepeatEvery::Q15 => 15,
            RepeatEvery::Q30 => 30,
            RepeatEvery::Q45 => 45,
            RepeatEvery::H1 => 60,
        }
    }

    pub const fn from_minutes(minutes: u16) -> Option<Self> {
        match minutes {
            15 => Some(RepeatEvery::Q15),
            30 => Some(RepeatEvery::Q30),
            45 => Some(RepeatEvery::Q45),
            60 => Some(RepeatEvery::H1),
            _ => None,
        }
    }
}

/// A cap on order or item count over a sub-interval of a channel's pickup
/// window. Identity is the `id`; position in the list carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlotLimit {
    pub id: Ulid,
    pub interval: TimeRange,
    pub limit_type: LimitType,
    pub limit_value: u32,
    pub repeat: Option<RepeatEvery>,
}

/// Symbolic booking-date label: 0 = today, 1 = tomorrow, up to +30 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DayOffset(pub u8);

impl DayOffset {
    pub const fn new(days: u8) -> Self {
        debug_assert!(days <= MAX_DATE_OFFSET, "date offset too far out");
        Self(days)
    }
}

impl fmt::Display for DayOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => write!(f, "today"),
            1 => write!(f, "tomorrow"),
            n => write!(f, "+{n}d"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOffsetRange {
    pub start: DayOffset,
    pub end: DayOffset,
}

/// Which sub-schedule of a window an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Pickup,
    Delivery,
}

/// Per-channel schedule nested inside an operating-hours window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub date_range: DayOffsetRange,
    /// The window customers actually collect in; capacity limits must lie
    /// inside it.
    pub pickup_time: TimeRange,
    pub cutoff_time: Time,
    pub limits: Vec<TimeSlotLimit>,
}

/// One contiguous business-hours window of a day, with its own pickup and
/// delivery sub-schedules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingHours {
    pub id: Ulid,
    pub time_range: TimeRange,
    pub pickup: Schedule,
    pub delivery: Schedule,
}

impl OperatingHours {
    pub fn channel(&self, channel: Channel) -> &Schedule {
        match channel {
            Channel::Pickup => &self.pickup,
            Channel::Delivery => &self.delivery,
        }
    }

    pub fn channel_mut(&mut self, channel: Channel) -> &mut Schedule {
        match channel {
            Channel::Pickup => &mut self.pickup,
            Channel::Delivery => &mut self.delivery,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        })
    }
}

/// One day of the weekly schedule. Invariant held by the window mutations:
/// when any window is all-day, it is the only window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySetting {
    pub day: Weekday,
    pub is_open: bool,
    pub operating_hours: Vec<OperatingHours>,
}

impl DaySetting {
    pub fn window(&self, id: Ulid) -> Option<&OperatingHours> {
        self.operating_hours.iter().find(|w| w.id == id)
    }

    pub fn window_mut(&mut self, id: Ulid) -> Option<&mut OperatingHours> {
        self.operating_hours.iter_mut().find(|w| w.id == id)
    }

    pub fn has_all_day(&self) -> bool {
        self.operating_hours.iter().any(|w| w.time_range.is_all_day())
    }
}

// ── Defaults ─────────────────────────────────────────────────────

fn default_schedule(date_range: DayOffsetRange) -> Schedule {
    Schedule {
        date_range,
        pickup_time: TimeRange::new(Time::new(10, 0), Time::new(20, 0)),
        cutoff_time: Time::new(19, 30),
        limits: Vec::new(),
    }
}

/// The stock window a fresh day starts with: 09:30–18:00 with empty limit
/// lists on both channels.
pub fn default_window(ids: &mut dyn IdSource) -> OperatingHours {
    OperatingHours {
        id: ids.next_id(),
        time_range: DEFAULT_WINDOW,
        pickup: default_schedule(DayOffsetRange {
            start: DayOffset::new(7),
            end: DayOffset::new(9),
        }),
        delivery: default_schedule(DayOffsetRange {
            start: DayOffset::new(3),
            end: DayOffset::new(10),
        }),
    }
}

/// Seven open days, each with one stock window.
pub fn default_week(ids: &mut dyn IdSource) -> Vec<DaySetting> {
    Weekday::ALL
        .into_iter()
        .map(|day| DaySetting {
            day,
            is_open: true,
            operating_hours: vec![default_window(ids)],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::UlidGen;
    use crate::limits::LAST_MINUTE;

    fn t(hour: u8, minute: u8) -> Time {
        Time::new(hour, minute)
    }

    fn range(sh: u8, sm: u8, eh: u8, em: u8) -> TimeRange {
        TimeRange::new(t(sh, sm), t(eh, em))
    }

    #[test]
    fn time_minutes() {
        assert_eq!(t(0, 0).to_minutes(), 0);
        assert_eq!(t(9, 30).to_minutes(), 570);
        assert_eq!(t(47, 59).to_minutes(), LAST_MINUTE);
    }

    #[test]
    fn time_display_wraps_past_midnight() {
        assert_eq!(t(9, 5).to_string(), "09:05");
        assert_eq!(t(24, 0).to_string(), "00:00 (+1d)");
        assert_eq!(t(47, 59).to_string(), "23:59 (+1d)");
    }

    #[test]
    fn range_ordering() {
        assert!(range(9, 0, 10, 0).is_ordered());
        assert!(!range(10, 0, 10, 0).is_ordered());
        assert!(!range(10, 0, 9, 0).is_ordered());
    }

    #[test]
    fn range_containment() {
        let outer = range(9, 0, 20, 0);
        assert!(outer.contains(&range(9, 0, 20, 0))); // self-containment
        assert!(outer.contains(&range(10, 0, 11, 0)));
        assert!(!outer.contains(&range(8, 0, 10, 0))); // starts early
        assert!(!outer.contains(&range(19, 0, 20, 1))); // ends late
    }

    #[test]
    fn range_overlap_touching_is_not_overlap() {
        let a = range(9, 0, 10, 0);
        let b = range(10, 0, 11, 0);
        let c = range(9, 30, 10, 30);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn all_day_is_exact_match() {
        assert!(range(0, 0, 23, 59).is_all_day());
        assert!(!range(0, 0, 24, 0).is_all_day());
        assert!(!range(0, 1, 23, 59).is_all_day());
    }

    #[test]
    fn repeat_minutes_roundtrip() {
        for step in [15, 30, 45, 60] {
            assert_eq!(RepeatEvery::from_minutes(step).unwrap().minutes(), step);
        }
        assert_eq!(RepeatEvery::from_minutes(0), None);
        assert_eq!(RepeatEvery::from_minutes(20), None);
    }

    #[test]
    fn default_week_shape() {
        let mut ids = UlidGen::default();
        let week = default_week(&mut ids);
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].day, Weekday::Monday);
        assert_eq!(week[6].day, Weekday::Sunday);
        for day in &week {
            assert!(day.is_open);
            assert_eq!(day.operating_hours.len(), 1);
            let window = &day.operating_hours[0];
            assert_eq!(window.time_range, range(9, 30, 18, 0));
            assert!(window.pickup.limits.is_empty());
            assert!(window.delivery.limits.is_empty());
        }
        // ids are unique across the week
        let mut seen: Vec<_> = week.iter().map(|d| d.operating_hours[0].id).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn day_setting_lookup_and_all_day() {
        let mut ids = UlidGen::default();
        let mut day = DaySetting {
            day: Weekday::Friday,
            is_open: true,
            operating_hours: vec![default_window(&mut ids)],
        };
        let id = day.operating_hours[0].id;
        assert!(day.window(id).is_some());
        assert!(day.window(Ulid::new()).is_none());
        assert!(!day.has_all_day());
        day.window_mut(id).unwrap().time_range = ALL_DAY;
        assert!(day.has_all_day());
    }

    #[test]
    fn model_serde_roundtrip() {
        let mut ids = UlidGen::default();
        let mut day = DaySetting {
            day: Weekday::Monday,
            is_open: true,
            operating_hours: vec![default_window(&mut ids)],
        };
        day.operating_hours[0].pickup.limits.push(TimeSlotLimit {
            id: ids.next_id(),
            interval: range(10, 0, 12, 0),
            limit_type: LimitType::Item,
            limit_value: 5,
            repeat: Some(RepeatEvery::Q30),
        });
        let json = serde_json::to_string(&day).unwrap();
        let decoded: DaySetting = serde_json::from_str(&json).unwrap();
        assert_eq!(day, decoded);
        // wire names follow the reference system
        assert!(json.contains("\"item\""));
    }
}
