//! Time-of-day arithmetic shared by the assigner and the displacement resolver.
//!
//! Times are compared as minute-of-day integers. Intervals are half-open
//! `[start, end)`, so touching endpoints never overlap.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TimeParseError;

/// Minutes in one day; `24:00` is the end-of-day sentinel.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A time of day stored as minutes since midnight (0..=1440).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u32);

impl ClockTime {
    pub const END_OF_DAY: ClockTime = ClockTime(MINUTES_PER_DAY);

    /// Build from minute-of-day. Returns `None` past `24:00`.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        (minutes <= MINUTES_PER_DAY).then_some(Self(minutes))
    }

    /// Build from an hour/minute pair.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if minute >= 60 {
            return None;
        }
        Self::from_minutes(hour.checked_mul(60)?.checked_add(minute)?)
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    pub fn hour(self) -> u32 {
        self.0 / 60
    }

    pub fn minute(self) -> u32 {
        self.0 % 60
    }

    /// Add minutes, carrying into the hour. `None` once the result runs past `24:00`.
    pub fn checked_add_minutes(self, minutes: u32) -> Option<Self> {
        Self::from_minutes(self.0.checked_add(minutes)?)
    }

    /// Parse a zero-padded or unpadded `H:MM` / `HH:MM` string.
    pub fn parse(input: &str) -> Result<Self, TimeParseError> {
        let err = |reason| TimeParseError {
            input: input.to_string(),
            reason,
        };
        let (h, m) = input.trim().split_once(':').ok_or_else(|| err("expected HH:MM"))?;
        let hour: u32 = h.parse().map_err(|_| err("hour is not a number"))?;
        let minute: u32 = m.parse().map_err(|_| err("minute is not a number"))?;
        if m.len() != 2 {
            return Err(err("minute must have two digits"));
        }
        if minute >= 60 {
            return Err(err("minute out of range"));
        }
        match (hour, minute) {
            (24, 0) => Ok(Self::END_OF_DAY),
            (h, _) if h < 24 => Ok(Self(h * 60 + minute)),
            _ => Err(err("hour out of range")),
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Half-open `[start, end)` interval within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl TimeRange {
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    /// Interval of `minutes` starting at `start`, if it ends by `24:00`.
    pub fn starting_at(start: ClockTime, minutes: u32) -> Option<Self> {
        Some(Self::new(start, start.checked_add_minutes(minutes)?))
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }

    pub fn overlaps(&self, other: &TimeRange) -> bool {
        overlaps(self, other)
    }

    pub fn contains(&self, t: ClockTime) -> bool {
        self.start <= t && t < self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Strict overlap: `max(start1, start2) < min(end1, end2)`.
pub fn overlaps(a: &TimeRange, b: &TimeRange) -> bool {
    a.start.max(b.start) < a.end.min(b.end)
}

/// Serde helper for optional instants that tolerates malformed input.
///
/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (read as midnight
/// UTC). Anything unparseable becomes `None`, so the condition that depends
/// on it is simply not met.
pub mod lenient_instant {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
        Ok(raw.as_ref().and_then(|v| v.as_str()).and_then(parse_instant))
    }
}

/// Parse an RFC 3339 timestamp or a bare calendar date (midnight UTC).
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| ndt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        ClockTime::parse(s).unwrap()
    }

    #[test]
    fn parse_and_display_are_zero_padded() {
        assert_eq!(t("9:05").to_string(), "09:05");
        assert_eq!(t("21:30").minutes(), 21 * 60 + 30);
        assert_eq!(t("24:00"), ClockTime::END_OF_DAY);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(ClockTime::parse("25:00").is_err());
        assert!(ClockTime::parse("10:60").is_err());
        assert!(ClockTime::parse("24:15").is_err());
        assert!(ClockTime::parse("1030").is_err());
        assert!(ClockTime::parse("10:5").is_err());
    }

    #[test]
    fn adding_minutes_rolls_into_next_hour() {
        assert_eq!(t("09:45").checked_add_minutes(90), Some(t("11:15")));
        assert_eq!(t("23:00").checked_add_minutes(60), Some(ClockTime::END_OF_DAY));
        assert_eq!(t("23:30").checked_add_minutes(45), None);
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        let a = TimeRange::new(t("10:00"), t("11:00"));
        let b = TimeRange::new(t("11:00"), t("12:00"));
        let c = TimeRange::new(t("10:30"), t("11:30"));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
        assert_eq!(c.duration_minutes(), 60);
    }

    #[test]
    fn clock_time_serializes_as_string() {
        let json = serde_json::to_string(&t("07:15")).unwrap();
        assert_eq!(json, "\"07:15\"");
        let back: ClockTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t("07:15"));
    }

    #[test]
    fn parse_instant_accepts_dates_and_timestamps() {
        let d = parse_instant("2026-03-02").unwrap();
        assert_eq!(d.to_rfc3339(), "2026-03-02T00:00:00+00:00");
        let ts = parse_instant("2026-03-02T10:00:00+02:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2026-03-02T08:00:00+00:00");
        assert!(parse_instant("next tuesday").is_none());
    }
}
