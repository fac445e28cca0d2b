// --- File: crates/clinic_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod features; // Runtime feature flags
pub mod logging; // Logging utilities
pub mod models; // Shared time models
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{
    config_error, external_service_error, internal_error, validation_error, ClinicError,
};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_error};

pub use features::{is_feature_enabled, is_gcal_enabled};

pub use models::{Interval, WorkingHours};
pub use services::{AppointmentRecord, AvailabilityOracle, BookingOutcome, BoxedError};
