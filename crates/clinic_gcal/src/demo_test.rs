#[cfg(test)]
mod tests {
    use crate::demo::{DemoOracle, InMemoryOracle, DEMO_EVENT_LINK};
    use chrono::{DateTime, TimeZone};
    use chrono_tz::Asia::Kolkata;
    use chrono_tz::Tz;
    use clinic_common::services::{AppointmentRecord, AvailabilityOracle, BookingOutcome};
    use clinic_common::Interval;
    use std::num::NonZeroU32;

    fn at(hour: u32, minute: u32) -> DateTime<Tz> {
        Kolkata
            .with_ymd_and_hms(2025, 11, 26, hour, minute, 0)
            .unwrap()
    }

    fn slot(hour: u32, minute: u32) -> Interval {
        Interval::starting_at(at(hour, minute), NonZeroU32::new(30).unwrap())
    }

    fn record(name: &str, interval: Interval) -> AppointmentRecord {
        AppointmentRecord::new(name, Some("follow-up"), interval, "primary").unwrap()
    }

    #[tokio::test]
    async fn test_demo_oracle_is_always_free_and_books_with_demo_link() {
        let oracle = DemoOracle::new();
        assert!(oracle.is_free(slot(9, 0), "primary").await.unwrap());

        let outcome = oracle.create_event(record("Asha Rao", slot(9, 0))).await;
        match outcome {
            BookingOutcome::Booked { reference, link } => {
                assert!(reference.starts_with("demo-event-"));
                assert_eq!(link.as_deref(), Some(DEMO_EVENT_LINK));
            }
            other => panic!("Expected booking, got {:?}", other),
        }
        // Demo mode stores nothing
        assert!(oracle.is_free(slot(9, 0), "primary").await.unwrap());
    }

    #[tokio::test]
    async fn test_in_memory_booking_makes_slot_busy() {
        let oracle = InMemoryOracle::new();
        assert!(oracle.is_free(slot(10, 0), "primary").await.unwrap());

        let outcome = oracle.create_event(record("Asha Rao", slot(10, 0))).await;
        assert!(outcome.is_booked());

        assert!(!oracle.is_free(slot(10, 0), "primary").await.unwrap());
        assert!(!oracle.is_free(slot(10, 15), "primary").await.unwrap());
        assert!(oracle.is_free(slot(10, 30), "primary").await.unwrap());
        assert!(oracle.is_free(slot(10, 0), "other-calendar").await.unwrap());

        let bookings = oracle.bookings();
        assert_eq!(bookings.len(), 1);
        assert!(bookings[0].0.starts_with("local-event-"));
        assert_eq!(bookings[0].1.patient_name(), "Asha Rao");
        assert_eq!(oracle.query_count(), 5);
    }

    #[tokio::test]
    async fn test_in_memory_refuses_double_booking() {
        let oracle = InMemoryOracle::with_busy("primary", [slot(11, 0)]).unwrap();

        let outcome = oracle.create_event(record("Ravi Kumar", slot(11, 15))).await;
        assert!(matches!(outcome, BookingOutcome::Failed { ref reason } if reason.contains("conflict")));

        let first = oracle.create_event(record("Ravi Kumar", slot(12, 0))).await;
        let second = oracle.create_event(record("Meera Iyer", slot(12, 0))).await;
        assert!(first.is_booked());
        assert!(!second.is_booked());
        assert_eq!(oracle.bookings().len(), 1);
    }

    #[tokio::test]
    async fn test_demo_outcome_serializes_with_status_tag() {
        let outcome = DemoOracle.create_event(record("Asha Rao", slot(9, 0))).await;
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["status"], "booked");
        assert_eq!(json["link"], DEMO_EVENT_LINK);
        assert!(json["reference"].as_str().unwrap().starts_with("demo-event-"));
    }
}
