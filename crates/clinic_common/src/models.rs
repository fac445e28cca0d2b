// --- File: crates/clinic_common/src/models.rs ---

// Time models shared by the scheduler, the oracles and the receptionist.

use chrono::{DateTime, Duration, Timelike};
use chrono_tz::Tz;
use serde::Serialize;
use std::fmt;
use std::num::NonZeroU32;

use crate::error::{validation_error, ClinicError};

/// A half-open time range `[start, end)` with `end > start`.
///
/// Both ends carry the zone they were produced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Interval {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl Interval {
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Result<Self, ClinicError> {
        if end <= start {
            return Err(validation_error(format!(
                "interval end {} must be after start {}",
                end.to_rfc3339(),
                start.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    /// Interval of `minutes` starting at `start`. Cannot fail: the length is non-zero.
    pub fn starting_at(start: DateTime<Tz>, minutes: NonZeroU32) -> Self {
        Self {
            start,
            end: start + Duration::minutes(i64::from(minutes.get())),
        }
    }

    pub fn start(&self) -> DateTime<Tz> {
        self.start
    }

    pub fn end(&self) -> DateTime<Tz> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Half-open overlap: touching intervals do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Interval {
    /// `2025-11-26 09:00 - 09:30 (Asia/Kolkata)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({})",
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%H:%M"),
            self.start.timezone().name()
        )
    }
}

/// Clinic opening hours, applied uniformly to every calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingHours {
    start_hour: u32,
    end_hour: u32,
}

impl WorkingHours {
    /// `start_hour` is inclusive, `end_hour` exclusive. Both are 0..=23 and
    /// `start_hour < end_hour`.
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self, ClinicError> {
        if start_hour > 23 || end_hour > 23 {
            return Err(validation_error(format!(
                "working hours must be within 0..=23, got {}..{}",
                start_hour, end_hour
            )));
        }
        if start_hour >= end_hour {
            return Err(validation_error(format!(
                "working hours start ({}) must be before end ({})",
                start_hour, end_hour
            )));
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    /// Hour-granular check: minutes are ignored, so `end_hour:00` is already closed.
    pub fn contains<T: Timelike>(&self, instant: &T) -> bool {
        let hour = instant.hour();
        self.start_hour <= hour && hour < self.end_hour
    }
}
