// --- File: crates/clinic_gcal/src/demo.rs ---
//! Oracles that need no Google account.

use clinic_common::services::{
    AppointmentRecord, AvailabilityOracle, BookingOutcome, BoxFuture, OutcomeFuture,
};
use clinic_common::{internal_error, ClinicError, Interval};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::info;

pub const DEMO_EVENT_LINK: &str = "https://calendar.google.com/demo-mode-no-real-event";

/// Every slot is free and every booking succeeds. Nothing is stored.
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoOracle;

impl DemoOracle {
    pub fn new() -> Self {
        Self
    }
}

impl AvailabilityOracle for DemoOracle {
    type Error = ClinicError;

    fn is_free(&self, _interval: Interval, _calendar_id: &str) -> BoxFuture<'_, bool, Self::Error> {
        Box::pin(async { Ok(true) })
    }

    fn create_event(&self, record: AppointmentRecord) -> OutcomeFuture<'_> {
        Box::pin(async move {
            info!(
                "Demo mode: pretending to book {} for {}",
                record.interval(),
                record.patient_name()
            );
            BookingOutcome::Booked {
                reference: format!("demo-event-{}", uuid::Uuid::new_v4()),
                link: Some(DEMO_EVENT_LINK.to_string()),
            }
        })
    }
}

/// A calendar kept in memory: pre-seeded busy intervals plus whatever was booked.
///
/// Overlapping bookings are refused with a `Failed` outcome.
#[derive(Debug, Default)]
pub struct InMemoryOracle {
    busy: Mutex<HashMap<String, Vec<Interval>>>,
    bookings: Mutex<Vec<(String, AppointmentRecord)>>,
    queries: AtomicUsize,
}

impl InMemoryOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `interval` busy on `calendar_id`.
    pub fn add_busy(&self, calendar_id: &str, interval: Interval) -> Result<(), ClinicError> {
        let mut busy = self
            .busy
            .lock()
            .map_err(|_| internal_error("busy interval lock poisoned"))?;
        busy.entry(calendar_id.to_string()).or_default().push(interval);
        Ok(())
    }

    pub fn with_busy<I>(calendar_id: &str, intervals: I) -> Result<Self, ClinicError>
    where
        I: IntoIterator<Item = Interval>,
    {
        let oracle = Self::new();
        for interval in intervals {
            oracle.add_busy(calendar_id, interval)?;
        }
        Ok(oracle)
    }

    /// Appointments booked so far, with their event references.
    pub fn bookings(&self) -> Vec<(String, AppointmentRecord)> {
        self.bookings
            .lock()
            .map(|bookings| bookings.clone())
            .unwrap_or_default()
    }

    /// Number of `is_free` calls answered.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn conflicts(&self, interval: &Interval, calendar_id: &str) -> Result<bool, ClinicError> {
        let busy = self
            .busy
            .lock()
            .map_err(|_| internal_error("busy interval lock poisoned"))?;
        let bookings = self
            .bookings
            .lock()
            .map_err(|_| internal_error("booking lock poisoned"))?;

        let seeded = busy
            .get(calendar_id)
            .is_some_and(|intervals| intervals.iter().any(|b| b.overlaps(interval)));
        let booked = bookings.iter().any(|(_, record)| {
            record.calendar_id() == calendar_id && record.interval().overlaps(interval)
        });
        Ok(seeded || booked)
    }
}

impl AvailabilityOracle for InMemoryOracle {
    type Error = ClinicError;

    fn is_free(&self, interval: Interval, calendar_id: &str) -> BoxFuture<'_, bool, Self::Error> {
        let calendar_id = calendar_id.to_string();

        Box::pin(async move {
            self.queries.fetch_add(1, Ordering::SeqCst);
            Ok(!self.conflicts(&interval, &calendar_id)?)
        })
    }

    fn create_event(&self, record: AppointmentRecord) -> OutcomeFuture<'_> {
        Box::pin(async move {
            match self.conflicts(&record.interval(), record.calendar_id()) {
                Ok(true) => {
                    return BookingOutcome::Failed {
                        reason: format!("Booking conflict at {}", record.interval()),
                    }
                }
                Ok(false) => {}
                Err(e) => {
                    return BookingOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            }

            let reference = format!("local-event-{}", uuid::Uuid::new_v4());
            match self.bookings.lock() {
                Ok(mut bookings) => {
                    bookings.push((reference.clone(), record));
                    BookingOutcome::Booked {
                        reference,
                        link: None,
                    }
                }
                Err(_) => BookingOutcome::Failed {
                    reason: "booking lock poisoned".to_string(),
                },
            }
        })
    }
}
