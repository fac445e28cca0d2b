#[cfg(test)]
mod tests {
    use crate::demo::{DemoOracle, InMemoryOracle};
    use crate::logic::{search_slots, within_working_hours, ClinicSchedule, SearchParameters};
    use chrono::{DateTime, Duration, TimeZone, Timelike};
    use chrono_tz::Tz;
    use clinic_common::{Interval, WorkingHours};
    use proptest::prelude::*;

    const CALENDAR: &str = "primary";

    // Helper to run an async search from inside a proptest body
    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("Failed to build runtime")
            .block_on(future)
    }

    fn preferred(zone: Tz, day: u32, hour: u32, minute: u32) -> DateTime<Tz> {
        zone.with_ymd_and_hms(2025, 11, day, hour, minute, 0)
            .single()
            .expect("no transitions in these zones after November 2")
    }

    fn zone_strategy() -> impl Strategy<Value = Tz> {
        prop_oneof![
            Just(Tz::Asia__Kolkata),
            Just(Tz::Europe__Zurich),
            Just(Tz::America__New_York),
            Just(Tz::Australia__Adelaide),
        ]
    }

    proptest! {
        // An always-free calendar yields exactly max_results slots, in order,
        // each starting inside working hours, each a fixed duration long.
        #[test]
        fn test_free_calendar_fills_every_result(
            zone in zone_strategy(),
            day in 3..28u32,
            hour in 0..24u32,
            minute in 0..60u32,
            work_start in 0..12u32,
            work_len in 1..12u32,
            duration in 5..120u32,
            step in 5..90u32,
            max_results in 1..20usize,
        ) {
            let hours = WorkingHours::new(work_start, work_start + work_len).unwrap();
            let schedule = ClinicSchedule::new(zone, hours);
            // Horizon wide enough that max_results always fits
            let params = SearchParameters::new(
                preferred(zone, day, hour, minute), duration, step, 30, max_results, CALENDAR,
            ).unwrap();

            let slots = block_on(search_slots(&DemoOracle, &schedule, &params)).unwrap();

            prop_assert_eq!(slots.len(), max_results);
            for slot in &slots {
                prop_assert!(within_working_hours(&slot.start(), &hours),
                    "Slot {} outside {}..{}", slot, hours.start_hour(), hours.end_hour());
                prop_assert_eq!(slot.duration(), Duration::minutes(i64::from(duration)));
            }
            for pair in slots.windows(2) {
                let gap = pair[1].start() - pair[0].start();
                prop_assert!(gap > Duration::zero());
                // Same day: exactly one step apart. New day: restart on the hour.
                if pair[0].start().date_naive() == pair[1].start().date_naive() {
                    prop_assert_eq!(gap, Duration::minutes(i64::from(step)));
                } else {
                    prop_assert_eq!(pair[1].start().hour(), hours.start_hour());
                    prop_assert_eq!(pair[1].start().minute(), 0);
                }
            }
        }

        // A fully booked calendar returns nothing and stops after the horizon.
        #[test]
        fn test_busy_calendar_terminates_empty(
            day in 1..20u32,
            hour in 0..24u32,
            step in 5..120u32,
            horizon in 0..5u32,
        ) {
            let zone = Tz::Asia__Kolkata;
            let everything = Interval::new(
                zone.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap(),
                zone.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            ).unwrap();
            let oracle = InMemoryOracle::with_busy(CALENDAR, [everything]).unwrap();
            let schedule = ClinicSchedule::new(zone, WorkingHours::new(9, 17).unwrap());
            let params = SearchParameters::new(
                preferred(zone, day, hour, 0), 30, step, horizon, 3, CALENDAR,
            ).unwrap();

            let slots = block_on(search_slots(&oracle, &schedule, &params)).unwrap();

            prop_assert!(slots.is_empty());
            // At most one query per step-sized start in each working day
            let per_day = (8 * 60 / step as usize) + 1;
            prop_assert!(oracle.query_count() <= per_day * (horizon as usize + 1));
        }

        // A start at or after closing time opens the next morning on the hour.
        #[test]
        fn test_after_hours_snaps_to_next_opening(
            zone in zone_strategy(),
            day in 3..28u32,
            hour in 17..24u32,
            minute in 0..60u32,
        ) {
            let hours = WorkingHours::new(9, 17).unwrap();
            let schedule = ClinicSchedule::new(zone, hours);
            let start = preferred(zone, day, hour, minute);
            let params = SearchParameters::new(start, 30, 30, 7, 1, CALENDAR).unwrap();

            let slots = block_on(search_slots(&DemoOracle, &schedule, &params)).unwrap();

            prop_assert_eq!(slots.len(), 1);
            let first = slots[0].start();
            prop_assert_eq!(first.date_naive(), start.date_naive().succ_opt().unwrap());
            prop_assert_eq!((first.hour(), first.minute(), first.second()), (9, 0, 0));
        }
    }
}
