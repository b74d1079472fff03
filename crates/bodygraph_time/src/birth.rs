//! Birth data and resolution of a local birth time to a UTC instant.
//!
//! A zone is UTC, a fixed offset, or an IANA name resolved through the
//! bundled tz database. For named zones a wall-clock time repeated by a
//! fall-back transition resolves to its earliest instant, and a time skipped
//! by a spring-forward gap is read with the offset in force before the gap,
//! which lands it after the gap.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{
    DateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta,
    TimeZone, Utc,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::TimeError;
use crate::julian::datetime_to_jd;
use crate::utc_time::UtcTime;

/// Largest accepted offset from UTC, in seconds (±14:00).
const MAX_OFFSET_SECONDS: i32 = 14 * 3600;

/// Time zone of a recorded birth time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Zone {
    #[default]
    Utc,
    /// Fixed offset east of UTC, in seconds.
    Fixed(i32),
    /// IANA zone such as `Europe/Berlin`; the offset depends on the date.
    Named(Tz),
}

impl Zone {
    /// Fixed offset from hours and minutes. The sign of `hours` applies to both.
    pub fn from_hm(hours: i32, minutes: u32) -> Result<Self, TimeError> {
        if minutes >= 60 {
            return Err(TimeError::InvalidZone(format!("{hours}:{minutes}")));
        }
        let sign = if hours < 0 { -1 } else { 1 };
        Self::from_seconds(hours * 3600 + sign * minutes as i32 * 60)
    }

    pub fn from_seconds(seconds: i32) -> Result<Self, TimeError> {
        if seconds.abs() > MAX_OFFSET_SECONDS {
            return Err(TimeError::InvalidZone(format!("offset {seconds}s")));
        }
        Ok(if seconds == 0 {
            Self::Utc
        } else {
            Self::Fixed(seconds)
        })
    }

    /// Offset east of UTC in seconds, or `None` for a named zone.
    pub const fn offset_seconds(self) -> Option<i32> {
        match self {
            Self::Utc => Some(0),
            Self::Fixed(s) => Some(s),
            Self::Named(_) => None,
        }
    }

    /// UTC instant of a wall-clock time in this zone.
    pub fn to_utc(self, local: NaiveDateTime) -> Result<DateTime<Utc>, TimeError> {
        let offset = match self {
            Self::Utc => Utc.fix(),
            Self::Fixed(s) => FixedOffset::east_opt(s)
                .ok_or_else(|| TimeError::InvalidZone(self.to_string()))?,
            Self::Named(tz) => return resolve_named(tz, local),
        };
        offset
            .from_local_datetime(&local)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| TimeError::InvalidDate(local.to_string()))
    }
}

fn resolve_named(tz: Tz, local: NaiveDateTime) -> Result<DateTime<Utc>, TimeError> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(a, b) => Ok(a.min(b).with_timezone(&Utc)),
        LocalResult::None => {
            // Gap: apply the offset observed a day earlier.
            let day_before = local
                .checked_sub_signed(TimeDelta::days(1))
                .ok_or_else(|| TimeError::InvalidDate(local.to_string()))?;
            let before = tz.offset_from_utc_datetime(&day_before).fix();
            before
                .from_local_datetime(&local)
                .single()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| TimeError::InvalidDate(local.to_string()))
        }
    }
}

impl Display for Zone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Utc => f.write_str("UTC"),
            Self::Fixed(s) => {
                let sign = if s < 0 { '-' } else { '+' };
                let abs = s.unsigned_abs();
                write!(f, "{sign}{:02}:{:02}", abs / 3600, (abs % 3600) / 60)
            }
            Self::Named(tz) => f.write_str(tz.name()),
        }
    }
}

impl FromStr for Zone {
    type Err = TimeError;

    /// Accepts "UTC", "GMT", "Z", "+05:30", "-0800", "+9" and IANA names
    /// such as "America/New_York".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let invalid = || TimeError::InvalidZone(s.to_string());
        if t.eq_ignore_ascii_case("utc") || t.eq_ignore_ascii_case("gmt") || t == "Z" {
            return Ok(Self::Utc);
        }
        let (sign, rest) = match t.as_bytes().first() {
            Some(b'+') => (1, &t[1..]),
            Some(b'-') => (-1, &t[1..]),
            _ => return t.parse::<Tz>().map(Self::Named).map_err(|_| invalid()),
        };
        if !rest.bytes().all(|b| b.is_ascii_digit() || b == b':') {
            return Err(invalid());
        }
        let (h, m) = match rest.split_once(':') {
            Some((h, m)) => (h, m),
            None if rest.len() == 4 => rest.split_at(2),
            None if (1..=2).contains(&rest.len()) => (rest, "0"),
            None => return Err(invalid()),
        };
        let hours: i32 = h.parse().map_err(|_| invalid())?;
        let minutes: u32 = m.parse().map_err(|_| invalid())?;
        if hours > 14 {
            return Err(invalid());
        }
        Self::from_hm(sign * hours, minutes)
            .map(|z| match z {
                // "-00:30" keeps its sign even though hours is zero
                Self::Fixed(secs) if sign < 0 && secs > 0 => Self::Fixed(-secs),
                other => other,
            })
            .map_err(|_| invalid())
    }
}

impl Serialize for Zone {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Zone {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Named place of birth. Coordinates are informational; gates do not
/// depend on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
}

/// Birth record as entered: local wall-clock date and time plus zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(rename = "timezone", default)]
    pub zone: Zone,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl BirthData {
    pub fn new(date: NaiveDate, time: NaiveTime, zone: Zone) -> Self {
        Self {
            name: None,
            date,
            time,
            zone,
            location: None,
        }
    }

    /// Parse `YYYY-MM-DD`, `HH:MM[:SS]` and a zone string.
    pub fn parse(date: &str, time: &str, zone: &str) -> Result<Self, TimeError> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|e| TimeError::InvalidDate(format!("{date}: {e}")))?;
        let time = NaiveTime::parse_from_str(time.trim(), "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M"))
            .map_err(|e| TimeError::InvalidDate(format!("{time}: {e}")))?;
        Ok(Self::new(date, time, zone.parse()?))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Birth instant as a chrono UTC timestamp.
    pub fn utc_datetime(&self) -> Result<DateTime<Utc>, TimeError> {
        self.zone.to_utc(self.date.and_time(self.time))
    }

    /// Birth instant as a Julian Date on the UTC scale.
    pub fn birth_jd(&self) -> Result<f64, TimeError> {
        self.utc_datetime().map(|dt| datetime_to_jd(&dt))
    }
}

/// Resolve the local birth time to a UTC calendar instant.
pub fn resolve_to_utc(birth: &BirthData) -> Result<UtcTime, TimeError> {
    birth.utc_datetime().map(UtcTime::from)
}
