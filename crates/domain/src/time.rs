//! Time, timestamp and time-of-day helpers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// UTC timestamp used for pause deadlines, sample times, etc.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// A wall-clock time of day with second precision and no date component.
///
/// Serialised as `HH:MM:SS`; parsed from either `HH:MM` or `HH:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self(NaiveTime::MIN);

    /// Build a time of day from its components.
    ///
    /// Returns `None` when any component is out of range.
    #[must_use]
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(Self)
    }

    /// Time of day of `timestamp` as seen from `offset`, truncated to seconds.
    #[must_use]
    pub fn of(timestamp: Timestamp, offset: FixedOffset) -> Self {
        Self::truncate(timestamp.with_timezone(&offset).time())
    }

    /// Short `HH:MM` label.
    #[must_use]
    pub fn to_hh_mm(self) -> String {
        self.0.format("%H:%M").to_string()
    }

    fn truncate(time: NaiveTime) -> Self {
        let secs = time.num_seconds_from_midnight();
        Self(NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).unwrap_or(time))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S"))
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let format = match trimmed.matches(':').count() {
            1 => "%H:%M",
            2 => "%H:%M:%S",
            _ => return Err(ValidationError::InvalidTimeOfDay(s.to_string())),
        };
        NaiveTime::parse_from_str(trimmed, format)
            .map(Self::truncate)
            .map_err(|_| ValidationError::InvalidTimeOfDay(s.to_string()))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A single reading of the clock: the full timestamp plus the local time of day
/// schedule windows are compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Now {
    pub timestamp: Timestamp,
    pub time_of_day: TimeOfDay,
}

impl Now {
    /// Read `timestamp` in the given local offset.
    #[must_use]
    pub fn at(timestamp: Timestamp, offset: FixedOffset) -> Self {
        Self {
            timestamp,
            time_of_day: TimeOfDay::of(timestamp, offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_parse_hours_and_minutes() {
        let t: TimeOfDay = "06:30".parse().unwrap();
        assert_eq!(t, TimeOfDay::from_hms(6, 30, 0).unwrap());
    }

    #[test]
    fn should_parse_hours_minutes_and_seconds() {
        let t: TimeOfDay = "23:59:59".parse().unwrap();
        assert_eq!(t.to_string(), "23:59:59");
    }

    #[test]
    fn should_reject_malformed_time() {
        for raw in ["", "6", "25:00", "12:61", "12:00:00:00", "noon"] {
            assert!(
                matches!(
                    raw.parse::<TimeOfDay>(),
                    Err(ValidationError::InvalidTimeOfDay(_))
                ),
                "accepted {raw:?}"
            );
        }
    }

    #[test]
    fn should_order_numerically_not_lexically() {
        let nine: TimeOfDay = "9:00".parse().unwrap();
        let ten: TimeOfDay = "10:00".parse().unwrap();
        assert!(nine < ten);
    }

    #[test]
    fn should_format_short_label() {
        let t: TimeOfDay = "07:05:42".parse().unwrap();
        assert_eq!(t.to_hh_mm(), "07:05");
    }

    #[test]
    fn should_truncate_sub_second_precision() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 6, 30, 0).unwrap()
            + chrono::Duration::milliseconds(900);
        let t = TimeOfDay::of(ts, FixedOffset::east_opt(0).unwrap());
        assert_eq!(t, TimeOfDay::from_hms(6, 30, 0).unwrap());
    }

    #[test]
    fn should_apply_local_offset_to_time_of_day() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 23, 15, 0).unwrap();
        let jakarta = FixedOffset::east_opt(7 * 3600).unwrap();
        let now = Now::at(ts, jakarta);
        assert_eq!(now.timestamp, ts);
        assert_eq!(now.time_of_day, TimeOfDay::from_hms(6, 15, 0).unwrap());
    }

    #[test]
    fn should_serialize_as_string() {
        let t = TimeOfDay::from_hms(6, 0, 0).unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"06:00:00\"");
        let parsed: TimeOfDay = serde_json::from_str("\"06:00\"").unwrap();
        assert_eq!(parsed, t);
    }
}
