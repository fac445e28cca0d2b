// --- File: crates/services/clinic_receptionist/src/oracle_factory.rs ---
//! Oracle factory.
//!
//! Picks the availability backend from configuration: Google Calendar when it
//! is enabled and configured, the demo oracle otherwise. Either way the result
//! is a type-erased oracle so the rest of the binary is backend-agnostic.
use chrono_tz::Tz;
use clinic_common::{external_service_error, is_gcal_enabled};
use clinic_common::services::{
    AppointmentRecord, AvailabilityOracle, BoxFuture, BoxedError, OutcomeFuture,
};
use clinic_common::Interval;
use clinic_config::AppConfig;
use clinic_gcal::{auth::create_calendar_hub, demo::DemoOracle, service::GoogleCalendarOracle};
use std::sync::Arc;
use tracing::info;

pub type SharedOracle = Arc<dyn AvailabilityOracle<Error = BoxedError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Demo,
    GoogleCalendar,
}

/// Wraps an oracle so its error type becomes [`BoxedError`].
struct BoxedOracle<O> {
    inner: O,
}

impl<O: AvailabilityOracle> AvailabilityOracle for BoxedOracle<O> {
    type Error = BoxedError;

    fn is_free(&self, interval: Interval, calendar_id: &str) -> BoxFuture<'_, bool, Self::Error> {
        let query = self.inner.is_free(interval, calendar_id);
        Box::pin(async move { query.await.map_err(|e| BoxedError(Box::new(e))) })
    }

    fn create_event(&self, record: AppointmentRecord) -> OutcomeFuture<'_> {
        self.inner.create_event(record)
    }
}

fn shared<O: AvailabilityOracle + 'static>(inner: O) -> SharedOracle {
    Arc::new(BoxedOracle { inner })
}

pub struct OracleFactory {
    oracle: SharedOracle,
    backend: Backend,
}

impl OracleFactory {
    /// Build the oracle for `config`. Events are written in `zone`.
    ///
    /// Fails when Google Calendar is enabled but the hub cannot be built
    /// (missing or unreadable credentials, failed OAuth flow).
    pub async fn new(config: &AppConfig, zone: Tz) -> Result<Self, BoxedError> {
        let gcal = config.gcal.as_ref().filter(|_| is_gcal_enabled(config));

        match gcal {
            Some(gcal_config) => {
                info!("Initializing Google Calendar oracle...");
                let hub = create_calendar_hub(gcal_config).await.map_err(|e| {
                    BoxedError(Box::new(external_service_error("Google Calendar", e)))
                })?;
                Ok(Self {
                    oracle: shared(GoogleCalendarOracle::new(Arc::new(hub), zone)),
                    backend: Backend::GoogleCalendar,
                })
            }
            None => {
                info!("Google Calendar disabled, using the demo oracle");
                Ok(Self {
                    oracle: shared(DemoOracle::new()),
                    backend: Backend::Demo,
                })
            }
        }
    }

    pub fn oracle(&self) -> SharedOracle {
        self.oracle.clone()
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Asia::Kolkata;
    use clinic_config::GcalConfig;
    use std::num::NonZeroU32;

    #[tokio::test]
    async fn test_demo_backend_when_gcal_disabled() {
        let config = AppConfig {
            gcal: Some(GcalConfig::default()),
            ..Default::default()
        };

        let factory = OracleFactory::new(&config, Kolkata).await.unwrap();

        assert_eq!(factory.backend(), Backend::Demo);
        let slot = Interval::starting_at(
            Kolkata.with_ymd_and_hms(2025, 11, 26, 9, 0, 0).unwrap(),
            NonZeroU32::new(30).unwrap(),
        );
        assert!(factory.oracle().is_free(slot, "primary").await.unwrap());
    }

    #[tokio::test]
    async fn test_enabled_gcal_without_credentials_fails() {
        let config = AppConfig {
            use_gcal: true,
            gcal: Some(GcalConfig::default()),
            ..Default::default()
        };

        let result = OracleFactory::new(&config, Kolkata).await;

        let err = result.err().expect("missing credentials must fail");
        assert!(err
            .to_string()
            .starts_with("External service error: Google Calendar - "));
        assert!(err.to_string().contains("credentials_path"));
    }
}
