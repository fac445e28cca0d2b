// --- File: crates/clinic_gcal/src/booking.rs ---
//! The booking conversation: collect, check, offer, choose, confirm, persist.
//!
//! Talking to the patient is delegated to a [`Receptionist`]; this module only
//! decides what happens next. Every step is awaited in order, one session at a time.

use chrono::NaiveDateTime;
use clinic_common::services::{AppointmentRecord, AvailabilityOracle, BookingOutcome};
use clinic_common::{validation_error, ClinicError, Interval};
use clinic_config::ClinicConfig;
use std::num::NonZeroU32;
use thiserror::Error;
use tracing::{info, warn};

use crate::logic::{check_requested, search_slots, ClinicSchedule, SearchParameters};
use crate::time::normalize;

#[derive(Error, Debug)]
pub enum BookingError<E: std::error::Error + 'static> {
    #[error("Availability check failed: {0}")]
    Oracle(#[source] E),
    #[error(transparent)]
    Invalid(#[from] ClinicError),
}

/// What the patient told us, before any validation beyond what the prompt enforces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientDetails {
    pub patient_name: String,
    pub reason: Option<String>,
    /// Wall-clock time in the clinic zone
    pub preferred_start: NaiveDateTime,
}

/// Progress updates the receptionist may relay to the patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    CheckingRequested(Interval),
    RequestedAvailable(Interval),
    RequestedUnavailable(Interval),
    Searching,
    NoSlotsFound,
}

/// The patient-facing side of a booking conversation.
#[cfg_attr(test, mockall::automock)]
pub trait Receptionist {
    /// `None` when the patient walked away (e.g. input closed).
    fn collect_details(&mut self) -> Option<PatientDetails>;

    fn notify(&mut self, notice: Notice);

    /// Offer the exact slot the patient asked for. `true` books it.
    fn offer_requested(&mut self, interval: &Interval) -> bool;

    /// Index into `suggestions`, or `None` to cancel.
    fn choose_slot(&mut self, suggestions: &[Interval]) -> Option<usize>;

    /// Final review before anything is written to the calendar.
    fn confirm_booking(&mut self, record: &AppointmentRecord) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationOutcome {
    /// The oracle was asked to book; the outcome says whether it did.
    Submitted(BookingOutcome),
    /// The patient backed out at the final review.
    NotConfirmed,
    /// The patient cancelled instead of picking a suggestion.
    Cancelled,
    /// Nothing free within the search horizon.
    NoSlotsFound,
    /// No details were collected.
    Abandoned,
}

/// Per-clinic booking settings used for every conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingPolicy {
    duration_minutes: NonZeroU32,
    step_minutes: NonZeroU32,
    horizon_days: u32,
    max_suggestions: usize,
    calendar_id: String,
}

impl BookingPolicy {
    pub fn new(
        duration_minutes: u32,
        step_minutes: u32,
        horizon_days: u32,
        max_suggestions: usize,
        calendar_id: &str,
    ) -> Result<Self, ClinicError> {
        let duration_minutes = NonZeroU32::new(duration_minutes)
            .ok_or_else(|| validation_error("appointment duration must be positive"))?;
        let step_minutes = NonZeroU32::new(step_minutes)
            .ok_or_else(|| validation_error("slot step must be positive"))?;
        if max_suggestions == 0 {
            return Err(validation_error("max_suggestions must be positive"));
        }
        Ok(Self {
            duration_minutes,
            step_minutes,
            horizon_days,
            max_suggestions,
            calendar_id: calendar_id.to_string(),
        })
    }

    pub fn from_config(config: &ClinicConfig, calendar_id: &str) -> Result<Self, ClinicError> {
        Self::new(
            config.appointment_duration_minutes,
            config.slot_step_minutes,
            config.max_search_days_ahead,
            config.max_suggestions,
            calendar_id,
        )
    }

    pub fn duration_minutes(&self) -> NonZeroU32 {
        self.duration_minutes
    }

    pub fn calendar_id(&self) -> &str {
        &self.calendar_id
    }

    fn search_from(&self, requested: &Interval) -> Result<SearchParameters, ClinicError> {
        SearchParameters::new(
            requested.start(),
            self.duration_minutes.get(),
            self.step_minutes.get(),
            self.horizon_days,
            self.max_suggestions,
            &self.calendar_id,
        )
    }
}

/// Runs one booking conversation to completion.
///
/// Oracle query failures abort the conversation; a failed booking does not,
/// it comes back as `Submitted(BookingOutcome::Failed { .. })`.
pub async fn run_conversation<O, R>(
    oracle: &O,
    receptionist: &mut R,
    schedule: &ClinicSchedule,
    policy: &BookingPolicy,
) -> Result<ConversationOutcome, BookingError<O::Error>>
where
    O: AvailabilityOracle + ?Sized,
    R: Receptionist + ?Sized,
{
    let Some(details) = receptionist.collect_details() else {
        return Ok(ConversationOutcome::Abandoned);
    };

    let start = normalize(details.preferred_start, schedule.zone());
    let requested = Interval::starting_at(start, policy.duration_minutes());
    let mut record = AppointmentRecord::new(
        &details.patient_name,
        details.reason.as_deref(),
        requested,
        policy.calendar_id(),
    )?;

    receptionist.notify(Notice::CheckingRequested(requested));
    let requested_free = check_requested(oracle, requested, policy.calendar_id())
        .await
        .map_err(BookingError::Oracle)?;

    if requested_free {
        receptionist.notify(Notice::RequestedAvailable(requested));
        if receptionist.offer_requested(&requested) {
            return Ok(finalize(oracle, receptionist, record).await);
        }
    } else {
        receptionist.notify(Notice::RequestedUnavailable(requested));
    }

    receptionist.notify(Notice::Searching);
    let params = policy.search_from(&requested)?;
    let suggestions = search_slots(oracle, schedule, &params)
        .await
        .map_err(BookingError::Oracle)?;

    if suggestions.is_empty() {
        receptionist.notify(Notice::NoSlotsFound);
        return Ok(ConversationOutcome::NoSlotsFound);
    }

    let Some(choice) = receptionist.choose_slot(&suggestions) else {
        return Ok(ConversationOutcome::Cancelled);
    };
    let Some(chosen) = suggestions.get(choice) else {
        warn!(
            "Receptionist picked suggestion {} of {}; treating as cancel",
            choice,
            suggestions.len()
        );
        return Ok(ConversationOutcome::Cancelled);
    };
    record.replace_interval(*chosen);

    Ok(finalize(oracle, receptionist, record).await)
}

async fn finalize<O, R>(
    oracle: &O,
    receptionist: &mut R,
    record: AppointmentRecord,
) -> ConversationOutcome
where
    O: AvailabilityOracle + ?Sized,
    R: Receptionist + ?Sized,
{
    if !receptionist.confirm_booking(&record) {
        return ConversationOutcome::NotConfirmed;
    }

    let interval = record.interval();
    let outcome = oracle.create_event(record).await;
    match &outcome {
        BookingOutcome::Booked { reference, .. } => {
            info!("Booked {} as {}", interval, reference)
        }
        BookingOutcome::Failed { reason } => warn!("Booking {} failed: {}", interval, reason),
    }
    ConversationOutcome::Submitted(outcome)
}
