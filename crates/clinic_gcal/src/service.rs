// --- File: crates/clinic_gcal/src/service.rs ---
//! Google Calendar availability oracle.
//!
//! This module provides an implementation of the AvailabilityOracle trait for Google Calendar.

use chrono::Utc;
use chrono_tz::Tz;
use clinic_common::services::{
    AppointmentRecord, AvailabilityOracle, BookingOutcome, BoxFuture, OutcomeFuture,
};
use clinic_common::Interval;
use google_calendar3::api::{Event, EventDateTime};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::auth::HubType;

/// Errors that can occur when interacting with Google Calendar.
#[derive(Error, Debug)]
pub enum GcalServiceError {
    #[error("Google API Error: {0}")]
    ApiError(#[from] google_calendar3::Error),
    #[error("Google Calendar returned no event id")]
    MissingEventId,
}

/// Google Calendar oracle.
pub struct GoogleCalendarOracle {
    calendar_hub: Arc<HubType>,
    zone: Tz,
}

impl GoogleCalendarOracle {
    /// Create a new oracle. Events are written with `zone` as their time zone.
    pub fn new(calendar_hub: Arc<HubType>, zone: Tz) -> Self {
        Self { calendar_hub, zone }
    }

    fn event_from_record(&self, record: &AppointmentRecord) -> Event {
        let interval = record.interval();
        let zone_name = self.zone.name().to_string();
        Event {
            summary: Some(record.summary()),
            description: Some(record.description()),
            start: Some(EventDateTime {
                date_time: Some(interval.start().with_timezone(&Utc)),
                time_zone: Some(zone_name.clone()),
                ..Default::default()
            }),
            end: Some(EventDateTime {
                date_time: Some(interval.end().with_timezone(&Utc)),
                time_zone: Some(zone_name),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

impl AvailabilityOracle for GoogleCalendarOracle {
    type Error = GcalServiceError;

    /// Checks whether a calendar has no events overlapping an interval.
    ///
    /// Lists the events of `calendar_id` between the interval's start and end
    /// (recurring events expanded, cancelled events excluded by the API). The
    /// slot is free when the list is empty. Google treats both bounds as
    /// exclusive against event ends and starts, so an event ending exactly at
    /// `interval.start` does not make the slot busy.
    ///
    /// # Errors
    ///
    /// Returns `GcalServiceError::ApiError` if the API call fails. The caller
    /// decides what a failed check means; nothing is retried here.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let oracle = GoogleCalendarOracle::new(Arc::new(hub), chrono_tz::Asia::Kolkata);
    /// let slot = Interval::starting_at(start, NonZeroU32::new(30).unwrap());
    /// if oracle.is_free(slot, "primary").await? {
    ///     info!("{} is free", slot);
    /// }
    /// ```
    fn is_free(&self, interval: Interval, calendar_id: &str) -> BoxFuture<'_, bool, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            let (_response, events_list) = calendar_hub
                .events()
                .list(&calendar_id)
                .time_min(interval.start().with_timezone(&Utc))
                .time_max(interval.end().with_timezone(&Utc))
                .single_events(true) // Expand recurring events
                .order_by("startTime")
                .doit()
                .await?;

            let conflicts = events_list.items.map(|items| items.len()).unwrap_or(0);
            debug!(
                "Google Calendar {}: {} event(s) overlap {}",
                calendar_id, conflicts, interval
            );
            Ok(conflicts == 0)
        })
    }

    /// Inserts the appointment into the record's calendar.
    ///
    /// Start and end are sent as RFC-3339 instants together with the clinic's
    /// IANA zone name, so the event shows up at clinic-local time. The event
    /// title is `Doctor Appointment - <patient>` and the description lists the
    /// patient and, if given, the reason.
    ///
    /// This call never fails outright: API errors become
    /// `BookingOutcome::Failed` so the patient can simply try again.
    fn create_event(&self, record: AppointmentRecord) -> OutcomeFuture<'_> {
        let calendar_hub = self.calendar_hub.clone();
        let event = self.event_from_record(&record);

        Box::pin(async move {
            let result = calendar_hub
                .events()
                .insert(event, record.calendar_id())
                .doit()
                .await
                .map_err(GcalServiceError::from)
                .and_then(|(_response, created)| match created.id {
                    Some(id) => Ok((id, created.html_link)),
                    None => Err(GcalServiceError::MissingEventId),
                });

            match result {
                Ok((reference, link)) => {
                    info!(
                        "Created Google Calendar event {} for {}",
                        reference,
                        record.interval()
                    );
                    BookingOutcome::Booked { reference, link }
                }
                Err(e) => {
                    error!("Failed to create Google Calendar event: {}", e);
                    BookingOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            }
        })
    }
}
