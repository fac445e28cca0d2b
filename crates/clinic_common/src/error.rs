// --- File: crates/clinic_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for the clinic booking crates.
///
/// Backends with richer failures keep their own error type (see `GcalServiceError`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClinicError {
    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A value failed a construction-time invariant
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The calendar backend or another external collaborator failed
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    #[error("Internal error: {0}")]
    InternalError(String),
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> ClinicError {
    ClinicError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> ClinicError {
    ClinicError::ValidationError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> ClinicError {
    ClinicError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> ClinicError {
    ClinicError::InternalError(message.to_string())
}
