// --- File: crates/clinic_gcal/src/logic.rs ---
use chrono::{DateTime, Duration, NaiveDate};
use chrono_tz::Tz;
use clinic_common::services::AvailabilityOracle;
use clinic_common::{config_error, validation_error, ClinicError, Interval, WorkingHours};
use clinic_config::ClinicConfig;
use std::num::NonZeroU32;
use tracing::{debug, trace};

use crate::time::{next_day_opening, normalize, opening_on};

// --- Data Structures ---

/// Where and when the clinic works. Threaded explicitly into every search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClinicSchedule {
    zone: Tz,
    working_hours: WorkingHours,
}

impl ClinicSchedule {
    pub fn new(zone: Tz, working_hours: WorkingHours) -> Self {
        Self {
            zone,
            working_hours,
        }
    }

    /// Fails on an unknown IANA zone name or invalid working hours.
    pub fn from_config(config: &ClinicConfig) -> Result<Self, ClinicError> {
        let zone: Tz = config
            .timezone
            .parse()
            .map_err(|e| config_error(format!("unknown time zone {:?}: {}", config.timezone, e)))?;
        let working_hours = WorkingHours::new(config.workday_start_hour, config.workday_end_hour)?;
        Ok(Self::new(zone, working_hours))
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    pub fn working_hours(&self) -> &WorkingHours {
        &self.working_hours
    }
}

/// Inputs to one slot search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParameters {
    preferred_start: DateTime<Tz>,
    duration_minutes: NonZeroU32,
    step_minutes: NonZeroU32,
    horizon_days: u32,
    max_results: usize,
    calendar_id: String,
}

impl SearchParameters {
    /// `step_minutes` may be shorter than `duration_minutes`; candidates then overlap.
    pub fn new(
        preferred_start: DateTime<Tz>,
        duration_minutes: u32,
        step_minutes: u32,
        horizon_days: u32,
        max_results: usize,
        calendar_id: &str,
    ) -> Result<Self, ClinicError> {
        let duration_minutes = NonZeroU32::new(duration_minutes)
            .ok_or_else(|| validation_error("appointment duration must be positive"))?;
        let step_minutes = NonZeroU32::new(step_minutes)
            .ok_or_else(|| validation_error("slot step must be positive"))?;
        if max_results == 0 {
            return Err(validation_error("max_results must be positive"));
        }
        Ok(Self {
            preferred_start,
            duration_minutes,
            step_minutes,
            horizon_days,
            max_results,
            calendar_id: calendar_id.to_string(),
        })
    }

    /// Parameters for a search starting at `preferred_start`, everything else from config.
    pub fn from_config(
        preferred_start: DateTime<Tz>,
        config: &ClinicConfig,
        calendar_id: &str,
    ) -> Result<Self, ClinicError> {
        Self::new(
            preferred_start,
            config.appointment_duration_minutes,
            config.slot_step_minutes,
            config.max_search_days_ahead,
            config.max_suggestions,
            calendar_id,
        )
    }

    pub fn preferred_start(&self) -> DateTime<Tz> {
        self.preferred_start
    }

    pub fn duration_minutes(&self) -> NonZeroU32 {
        self.duration_minutes
    }

    pub fn step_minutes(&self) -> NonZeroU32 {
        self.step_minutes
    }

    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn calendar_id(&self) -> &str {
        &self.calendar_id
    }
}

// --- Availability Logic ---

/// Hour-granular working-hours check for an instant already in the clinic zone.
///
/// A start at `end_hour:00` is outside; a start at `end_hour - 1:59` is inside.
pub fn within_working_hours(instant: &DateTime<Tz>, hours: &WorkingHours) -> bool {
    hours.contains(instant)
}

/// Single availability check for the slot the patient asked for.
pub async fn check_requested<O>(
    oracle: &O,
    interval: Interval,
    calendar_id: &str,
) -> Result<bool, O::Error>
where
    O: AvailabilityOracle + ?Sized,
{
    let free = oracle.is_free(interval, calendar_id).await?;
    debug!("Requested slot {} on {}: free={}", interval, calendar_id, free);
    Ok(free)
}

/// Finds up to `max_results` free slots at or after the preferred start.
///
/// The cursor walks forward in `step` increments inside working hours and
/// jumps to the next day's opening (`start_hour:00:00`) once it leaves them.
/// Only candidate starts are checked against working hours, so a slot may run
/// past closing time. The walk stops after the last day of the horizon, which
/// bounds the number of oracle queries no matter how busy the calendar is.
///
/// Oracle queries are issued one at a time in chronological order; the first
/// failing query aborts the search.
pub async fn search_slots<O>(
    oracle: &O,
    schedule: &ClinicSchedule,
    params: &SearchParameters,
) -> Result<Vec<Interval>, O::Error>
where
    O: AvailabilityOracle + ?Sized,
{
    let hours = schedule.working_hours();
    let preferred = normalize(params.preferred_start(), schedule.zone());
    let last_allowed_date = preferred
        .date_naive()
        .checked_add_days(chrono::Days::new(u64::from(params.horizon_days())))
        .unwrap_or(NaiveDate::MAX);
    let step = Duration::minutes(i64::from(params.step_minutes().get()));

    debug!(
        "Searching slots from {} until {} (hours {}..{}, duration {}m, step {}m, max {})",
        preferred.to_rfc3339(),
        last_allowed_date,
        hours.start_hour(),
        hours.end_hour(),
        params.duration_minutes(),
        params.step_minutes(),
        params.max_results()
    );

    let mut results = Vec::with_capacity(params.max_results());
    let Some(mut cursor) = first_candidate(preferred, hours) else {
        return Ok(results);
    };

    while results.len() < params.max_results() && cursor.date_naive() <= last_allowed_date {
        if !within_working_hours(&cursor, hours) {
            match next_day_opening(&cursor, hours) {
                Some(next) => cursor = next,
                None => break,
            }
            continue;
        }

        let candidate = Interval::starting_at(cursor, params.duration_minutes());
        let free = oracle.is_free(candidate, params.calendar_id()).await?;
        trace!("Candidate {}: free={}", candidate, free);
        if free {
            results.push(candidate);
        }

        cursor += step;
        if !within_working_hours(&cursor, hours) {
            match next_day_opening(&cursor, hours) {
                Some(next) => cursor = next,
                None => break,
            }
        }
    }

    debug!("Found {} free slot(s)", results.len());
    Ok(results)
}

/// Where the walk starts.
///
/// Inside working hours that is the preferred start itself. Before opening it
/// is opening time the same day; at or after closing it is opening time the
/// next day. Either way the minutes are reset to `:00`.
fn first_candidate(preferred: DateTime<Tz>, hours: &WorkingHours) -> Option<DateTime<Tz>> {
    if within_working_hours(&preferred, hours) {
        return Some(preferred);
    }
    let same_day = opening_on(preferred.date_naive(), hours, preferred.timezone());
    if same_day >= preferred && within_working_hours(&same_day, hours) {
        return Some(same_day);
    }
    next_day_opening(&preferred, hours)
}
