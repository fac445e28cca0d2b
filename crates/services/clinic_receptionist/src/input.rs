// File: services/clinic_receptionist/src/input.rs
//! Parsing of what the patient types at the console.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

/// Why a line of input was rejected. The message is shown to the patient as is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter something (it cannot be empty).")]
    Empty,
    #[error("Invalid date format. Please use YYYY-MM-DD (e.g. 2025-11-25).")]
    InvalidDate,
    #[error("That date is in the past. Please choose a future date.")]
    PastDate,
    #[error("Invalid time format. Please use HH:MM in 24-hour format.")]
    InvalidTime,
    #[error("Please answer with 'y' or 'n'.")]
    NotYesNo,
    #[error("Please enter a number.")]
    NotANumber,
    #[error("Please choose a valid number from the list.")]
    OutOfRange,
}

/// A pick from the numbered suggestion list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotChoice {
    Cancel,
    /// Zero-based index into the suggestions
    Slot(usize),
}

pub fn parse_non_empty(input: &str) -> Result<String, InputError> {
    let value = input.trim();
    if value.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(value.to_string())
}

/// Blank means "no reason given".
pub fn parse_reason(input: &str) -> Option<String> {
    let value = input.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// `YYYY-MM-DD`, not before `today`. Today itself is allowed.
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate, InputError> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| InputError::InvalidDate)?;
    if date < today {
        return Err(InputError::PastDate);
    }
    Ok(date)
}

/// `HH:MM`, 24-hour clock.
pub fn parse_time(input: &str) -> Result<NaiveTime, InputError> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M").map_err(|_| InputError::InvalidTime)
}

pub fn parse_yes_no(input: &str) -> Result<bool, InputError> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(InputError::NotYesNo),
    }
}

/// `0` cancels, `1..=count` picks a suggestion.
pub fn parse_choice(input: &str, count: usize) -> Result<SlotChoice, InputError> {
    let value = input.trim();
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(InputError::NotANumber);
    }
    match value.parse::<usize>() {
        Ok(0) => Ok(SlotChoice::Cancel),
        Ok(n) if n <= count => Ok(SlotChoice::Slot(n - 1)),
        _ => Err(InputError::OutOfRange),
    }
}
