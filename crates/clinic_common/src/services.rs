// --- File: crates/clinic_common/src/services.rs ---
//! Service abstractions for the calendar backend.
//!
//! The scheduler never talks to a calendar directly. It is handed an
//! [`AvailabilityOracle`], which answers free/busy questions and, once the
//! patient has confirmed, books the appointment. Swapping the demo oracle for
//! the Google one is a matter of injecting a different implementation.

use serde::Serialize;
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::error::{validation_error, ClinicError};
use crate::models::Interval;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Boxed future for booking, which cannot fail: failures are a [`BookingOutcome`].
pub type OutcomeFuture<'a> = Pin<Box<dyn Future<Output = BookingOutcome> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

/// Free/busy queries and event creation against a calendar.
///
/// Calls are awaited one at a time by the scheduler; implementations need not
/// support concurrent use from a single search.
pub trait AvailabilityOracle: Send + Sync {
    /// Error type returned by availability queries.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Whether `[interval.start, interval.end)` has no events on `calendar_id`.
    fn is_free(&self, interval: Interval, calendar_id: &str) -> BoxFuture<'_, bool, Self::Error>;

    /// Books the appointment. Backend failures are reported in the outcome.
    fn create_event(&self, record: AppointmentRecord) -> OutcomeFuture<'_>;
}

/// An appointment the patient has confirmed, ready to hand to the oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentRecord {
    patient_name: String,
    reason: Option<String>,
    interval: Interval,
    calendar_id: String,
}

impl AppointmentRecord {
    /// The patient name is trimmed and must not be empty. A blank reason is
    /// stored as `None`.
    pub fn new(
        patient_name: &str,
        reason: Option<&str>,
        interval: Interval,
        calendar_id: &str,
    ) -> Result<Self, ClinicError> {
        let patient_name = patient_name.trim();
        if patient_name.is_empty() {
            return Err(validation_error("patient name must not be empty"));
        }
        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string);

        Ok(Self {
            patient_name: patient_name.to_string(),
            reason,
            interval,
            calendar_id: calendar_id.to_string(),
        })
    }

    pub fn patient_name(&self) -> &str {
        &self.patient_name
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn calendar_id(&self) -> &str {
        &self.calendar_id
    }

    /// Swap in a different slot, e.g. one the patient picked from the suggestions.
    pub fn replace_interval(&mut self, interval: Interval) {
        self.interval = interval;
    }

    /// Calendar event title.
    pub fn summary(&self) -> String {
        format!("Doctor Appointment - {}", self.patient_name)
    }

    /// Calendar event body: the patient, and the reason when one was given.
    pub fn description(&self) -> String {
        match &self.reason {
            Some(reason) => format!("Patient: {}\nReason: {}", self.patient_name, reason),
            None => format!("Patient: {}", self.patient_name),
        }
    }
}

/// What the oracle did with an [`AppointmentRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BookingOutcome {
    Booked {
        /// Backend event id
        reference: String,
        /// Link the patient can open, if the backend provides one
        link: Option<String>,
    },
    Failed {
        reason: String,
    },
}

impl BookingOutcome {
    pub fn is_booked(&self) -> bool {
        matches!(self, BookingOutcome::Booked { .. })
    }
}
