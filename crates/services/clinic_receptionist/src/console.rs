// File: services/clinic_receptionist/src/console.rs
//! The receptionist as a line-oriented console conversation.

use chrono::NaiveDate;
use chrono_tz::Tz;
use clinic_common::services::{AppointmentRecord, BookingOutcome};
use clinic_common::Interval;
use clinic_gcal::booking::{ConversationOutcome, Notice, PatientDetails, Receptionist};
use std::io::{BufRead, Write};
use tracing::warn;

use crate::input::{
    parse_choice, parse_date, parse_non_empty, parse_reason, parse_time, parse_yes_no,
    InputError, SlotChoice,
};

/// Reads answers from `input` and prints prompts to `output`.
///
/// Closed input ends the conversation: `collect_details` returns `None` and
/// every question is answered "no".
pub struct ConsoleReceptionist<R, W> {
    input: R,
    output: W,
    zone: Tz,
    today: NaiveDate,
}

impl<R: BufRead, W: Write> ConsoleReceptionist<R, W> {
    /// `today` is the current date in the clinic zone; past dates are refused.
    pub fn new(input: R, output: W, zone: Tz, today: NaiveDate) -> Self {
        Self {
            input,
            output,
            zone,
            today,
        }
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    pub fn greet(&mut self, demo_mode: bool) {
        self.say("Hello! I'm your AI receptionist. I'll help you book a doctor appointment.");
        if demo_mode {
            self.say("(Demo mode: no real calendar events will be created.)");
        }
    }

    /// Tell the patient how the conversation ended.
    pub fn report(&mut self, outcome: &ConversationOutcome) {
        match outcome {
            ConversationOutcome::Submitted(BookingOutcome::Booked { link, .. }) => {
                self.say("\nAppointment booked successfully!");
                if let Some(link) = link {
                    self.say(&format!("View it in Google Calendar: {}", link));
                }
            }
            ConversationOutcome::Submitted(BookingOutcome::Failed { reason }) => {
                self.say("Error while creating the calendar event:");
                self.say(reason);
            }
            ConversationOutcome::NotConfirmed
            | ConversationOutcome::Cancelled
            | ConversationOutcome::NoSlotsFound
            | ConversationOutcome::Abandoned => {}
        }
    }

    pub fn report_error(&mut self, message: &str) {
        self.say(&format!("Sorry, something went wrong: {}", message));
    }

    pub fn book_another(&mut self) -> bool {
        self.ask_yes_no("\nWould you like to book another appointment?")
            .unwrap_or(false)
    }

    pub fn farewell(&mut self) {
        self.say("Goodbye! Stay healthy.");
    }

    pub fn say(&mut self, message: &str) {
        if let Err(e) = writeln!(self.output, "{}", message) {
            warn!("Failed to write to console: {}", e);
        }
    }

    /// Prompt and read one line. `None` on end of input.
    fn prompt(&mut self, prompt: &str) -> Option<String> {
        if let Err(e) = write!(self.output, "{}", prompt).and_then(|_| self.output.flush()) {
            warn!("Failed to write to console: {}", e);
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line),
            Err(e) => {
                warn!("Failed to read from console: {}", e);
                None
            }
        }
    }

    /// Re-prompt until `parse` accepts the line.
    fn ask<T>(&mut self, prompt: &str, parse: impl Fn(&str) -> Result<T, InputError>) -> Option<T> {
        loop {
            let line = self.prompt(prompt)?;
            match parse(&line) {
                Ok(value) => return Some(value),
                Err(e) => self.say(&e.to_string()),
            }
        }
    }

    fn ask_yes_no(&mut self, question: &str) -> Option<bool> {
        self.ask(&format!("{} (y/n): ", question), parse_yes_no)
    }
}

impl<R: BufRead, W: Write> Receptionist for ConsoleReceptionist<R, W> {
    fn collect_details(&mut self) -> Option<PatientDetails> {
        self.say("\n--- Doctor Appointment Booking ---");

        let patient_name = self.ask("Your full name: ", parse_non_empty)?;
        let reason = parse_reason(&self.prompt("Reason for visit (optional, press Enter to skip): ")?);
        let today = self.today;
        let date = self.ask("Preferred appointment date (YYYY-MM-DD): ", |line| {
            parse_date(line, today)
        })?;
        let time = self.ask("Preferred time (24h, HH:MM, e.g. 14:30): ", parse_time)?;

        Some(PatientDetails {
            patient_name,
            reason,
            preferred_start: date.and_time(time),
        })
    }

    fn notify(&mut self, notice: Notice) {
        match notice {
            Notice::CheckingRequested(_) => {
                self.say("\nChecking availability for your requested time...")
            }
            Notice::RequestedAvailable(interval) => {
                self.say(&format!("Great news! {} is available.", interval))
            }
            Notice::RequestedUnavailable(_) => {
                self.say("That time is not available, there is a scheduling conflict.")
            }
            Notice::Searching => self.say("Searching for the next available slots..."),
            Notice::NoSlotsFound => self.say(
                "Sorry, I couldn't find any available slots in the next few days. \
                 Please try another date.",
            ),
        }
    }

    fn offer_requested(&mut self, _interval: &Interval) -> bool {
        let accepted = self
            .ask_yes_no("Do you want to book this appointment?")
            .unwrap_or(false);
        if !accepted {
            self.say("Okay, let's look for another time.");
        }
        accepted
    }

    fn choose_slot(&mut self, suggestions: &[Interval]) -> Option<usize> {
        self.say("\nHere are the next available slots:");
        for (idx, slot) in suggestions.iter().enumerate() {
            self.say(&format!("{}. {}", idx + 1, slot));
        }
        self.say("0. Cancel");

        let count = suggestions.len();
        match self.ask("Choose a slot by number (0 to cancel): ", |line| {
            parse_choice(line, count)
        })? {
            SlotChoice::Slot(index) => Some(index),
            SlotChoice::Cancel => {
                self.say("Okay, cancelling the booking.");
                None
            }
        }
    }

    fn confirm_booking(&mut self, record: &AppointmentRecord) -> bool {
        let interval = record.interval();
        self.say("\nPlease review your appointment details:");
        self.say(&format!("Patient name : {}", record.patient_name()));
        self.say(&format!(
            "Reason       : {}",
            record.reason().unwrap_or("(not specified)")
        ));
        self.say(&format!(
            "Date & time  : {} to {} {}",
            interval.start().format("%Y-%m-%d %H:%M"),
            interval.end().format("%H:%M"),
            self.zone.name()
        ));

        let confirmed = self
            .ask_yes_no("Confirm and save this appointment to the calendar?")
            .unwrap_or(false);
        if !confirmed {
            self.say("Appointment not saved. You can start again if you like.");
        }
        confirmed
    }
}
