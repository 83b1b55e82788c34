//! Clock-time fields for type 4A groups.
//!
//! The group carries the UTC date as a Modified Julian Date, the UTC hour
//! and minute, and the local time offset in half hours. Time is never read
//! inside the encoder itself: callers hand in a [`Clock`], which makes the
//! clock-time group reproducible under test.

use chrono::{DateTime, Datelike, Local, Timelike, Utc};
use tracing::warn;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Decoded clock-time fields, ready to be packed into a 4A group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ClockTime {
    /// Modified Julian Date (17 bits).
    pub mjd: u32,
    /// UTC hour, 0–23.
    pub hour: u8,
    /// UTC minute, 0–59.
    pub minute: u8,
    /// Offset sign bit: set when the local offset is zero or negative.
    pub offset_negative: bool,
    /// Magnitude of the local offset in half hours (5 bits).
    pub offset_half_hours: u8,
}

impl ClockTime {
    /// Builds the clock-time fields for a UTC instant and a local offset in hours.
    ///
    /// # Examples
    /// ```rust
    /// use chrono::{TimeZone, Utc};
    /// use rds::time::ClockTime;
    ///
    /// let utc = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    /// let ct = ClockTime::new(utc, 0.0);
    /// assert_eq!(ct.mjd, 60370);
    /// assert!(ct.offset_negative);
    /// ```
    pub fn new(utc: DateTime<Utc>, local_offset_hours: f64) -> Self {
        Self {
            mjd: modified_julian_date(utc.year(), utc.month(), utc.day()),
            hour: utc.hour() as u8,
            minute: utc.minute() as u8,
            offset_negative: local_offset_hours <= 0.0,
            offset_half_hours: ((local_offset_hours.abs() * 2.0) as u8) & 0x1F,
        }
    }
}

/// Converts a civil date to a Modified Julian Date.
///
/// Uses the closed-form conversion from the RDS standard, where January
/// and February count as months 13 and 14 of the previous year. Valid for
/// dates from 1900-03-01 through 2100-02-28.
pub fn modified_julian_date(year: i32, month: u32, day: u32) -> u32 {
    let l = if month == 1 || month == 2 { 1 } else { 0 };
    let y = f64::from(year - 1900 - l);
    let m = f64::from(month as i32 + 1 + l * 12);
    let mjd = 14956 + day as i64 + (y * 365.25).floor() as i64 + (m * 30.6001).floor() as i64;
    u32::try_from(mjd).unwrap_or_else(|_| {
        warn!("{year}-{month:02}-{day:02} precedes the MJD epoch, sending day 0");
        0
    })
}

/// A reading of the current time together with the local offset to report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockReading {
    /// Current UTC instant.
    pub utc: DateTime<Utc>,
    /// Local offset from UTC in hours (half-hour granularity is kept).
    pub local_offset_hours: f64,
}

impl ClockReading {
    /// Converts the reading into clock-time group fields.
    pub fn clock_time(&self) -> ClockTime {
        ClockTime::new(self.utc, self.local_offset_hours)
    }
}

/// Source of the time carried by the clock-time group.
pub trait Clock {
    /// Returns the time to encode.
    fn now(&self) -> ClockReading;
}

/// Wall clock with the offset of the host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> ClockReading {
        let local = Local::now();
        ClockReading {
            utc: local.with_timezone(&Utc),
            local_offset_hours: f64::from(local.offset().local_minus_utc()) / 3600.0,
        }
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClock {
    reading: ClockReading,
}

impl FixedClock {
    /// Creates a clock that always reports `utc` with the given local offset.
    pub fn new(utc: DateTime<Utc>, local_offset_hours: f64) -> Self {
        Self {
            reading: ClockReading {
                utc,
                local_offset_hours,
            },
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> ClockReading {
        self.reading
    }
}
