// File: services/clinic_receptionist/src/main.rs
mod console;
mod input;
mod oracle_factory;

use chrono::Utc;
use chrono_tz::Tz;
use clinic_common::{log_error, logging};
use clinic_config::load_config;
use clinic_gcal::booking::{run_conversation, BookingError, BookingPolicy, ConversationOutcome};
use clinic_gcal::logic::ClinicSchedule;
use std::error::Error;
use std::io;
use std::process::ExitCode;
use tracing::{error, info, Level};

use console::ConsoleReceptionist;
use oracle_factory::{Backend, OracleFactory};

fn today_in(zone: Tz) -> chrono::NaiveDate {
    Utc::now().with_timezone(&zone).date_naive()
}

async fn run() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = load_config()?;
    let schedule = ClinicSchedule::from_config(&config.clinic)?;
    let policy = BookingPolicy::from_config(&config.clinic, config.calendar_id())?;
    let factory = OracleFactory::new(&config, schedule.zone()).await?;
    let oracle = factory.oracle();

    info!(
        "Clinic zone {}, hours {}..{}, calendar {}",
        schedule.zone(),
        schedule.working_hours().start_hour(),
        schedule.working_hours().end_hour(),
        policy.calendar_id()
    );

    let zone = schedule.zone();
    let mut receptionist =
        ConsoleReceptionist::new(io::stdin().lock(), io::stdout(), zone, today_in(zone));
    receptionist.greet(factory.backend() == Backend::Demo);

    loop {
        receptionist.set_today(today_in(zone));
        match run_conversation(oracle.as_ref(), &mut receptionist, &schedule, &policy).await {
            Ok(ConversationOutcome::Abandoned) => break,
            Ok(outcome) => receptionist.report(&outcome),
            Err(BookingError::Invalid(e)) => receptionist.report_error(&e.to_string()),
            Err(BookingError::Oracle(e)) => {
                log_error(&e, "Availability check failed");
                receptionist.report_error("the calendar could not be reached, please try again");
            }
        }

        if !receptionist.book_another() {
            break;
        }
    }

    receptionist.farewell();
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init_with_level(Level::WARN);
    info!("Starting Doctor Appointment Booking Bot...");

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Receptionist stopped: {}", e);
            ExitCode::FAILURE
        }
    }
}
