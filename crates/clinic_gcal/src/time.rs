// --- File: crates/clinic_gcal/src/time.rs ---
//! Clinic time zone helpers.
//!
//! Everything the scheduler touches is a `DateTime<Tz>` in the clinic zone.
//! Patient input arrives as naive wall-clock time and is localized here.

use chrono::{
    DateTime, Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone,
};
use chrono_tz::Tz;
use clinic_common::WorkingHours;

/// An instant as it reaches the scheduler: with or without a zone attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestedTime {
    /// Wall-clock time with no zone, to be read in the clinic zone.
    Naive(NaiveDateTime),
    /// An absolute instant.
    Zoned(DateTime<FixedOffset>),
}

impl From<NaiveDateTime> for RequestedTime {
    fn from(naive: NaiveDateTime) -> Self {
        RequestedTime::Naive(naive)
    }
}

impl From<DateTime<FixedOffset>> for RequestedTime {
    fn from(zoned: DateTime<FixedOffset>) -> Self {
        RequestedTime::Zoned(zoned)
    }
}

impl From<DateTime<Tz>> for RequestedTime {
    fn from(zoned: DateTime<Tz>) -> Self {
        RequestedTime::Zoned(zoned.fixed_offset())
    }
}

/// Brings an instant into the clinic zone.
///
/// Zoned input is converted, not passed through: the absolute instant is kept
/// but the result carries `zone`'s offset, so 09:00+01:00 comes back as
/// 13:30+05:30 for Asia/Kolkata. Working hours and day boundaries are always
/// judged on this clinic-local form. Naive input is read as wall-clock time
/// in `zone` (see [`localize`]).
pub fn normalize(instant: impl Into<RequestedTime>, zone: Tz) -> DateTime<Tz> {
    match instant.into() {
        RequestedTime::Zoned(zoned) => zoned.with_timezone(&zone),
        RequestedTime::Naive(naive) => localize(naive, zone),
    }
}

/// Attaches `zone` to a wall-clock time, using the offset in force on that date.
///
/// Total over all inputs: a time repeated by a backward transition resolves
/// to its earlier occurrence, and a time skipped by a forward transition is
/// read with the offset from before the gap (02:30 in a 02:00->03:00 gap
/// becomes 03:30).
pub fn localize(naive: NaiveDateTime, zone: Tz) -> DateTime<Tz> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let before_gap = zone
                .offset_from_utc_datetime(&(naive - Duration::days(1)))
                .fix();
            let utc = naive - Duration::seconds(i64::from(before_gap.local_minus_utc()));
            zone.from_utc_datetime(&utc)
        }
    }
}

/// Opening time (`start_hour:00:00`) on `date` in the clinic zone.
pub fn opening_on(date: NaiveDate, hours: &WorkingHours, zone: Tz) -> DateTime<Tz> {
    let opening = date.and_time(NaiveTime::MIN) + Duration::hours(i64::from(hours.start_hour()));
    localize(opening, zone)
}

/// Opening time on the calendar day after `instant`'s clinic-local date.
///
/// `None` only past the last representable date.
pub fn next_day_opening(instant: &DateTime<Tz>, hours: &WorkingHours) -> Option<DateTime<Tz>> {
    let zone = instant.timezone();
    instant
        .date_naive()
        .succ_opt()
        .map(|next| opening_on(next, hours, zone))
}
