// --- File: crates/clinic_config/src/models.rs ---

use serde::{Deserialize, Serialize};

pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";
pub const DEFAULT_CALENDAR_ID: &str = "primary";
pub const DEFAULT_TOKEN_PATH: &str = "token.json";

// --- Clinic Scheduling Config ---
// Plain values consumed by the scheduler. Validation happens when the
// scheduler builds its own types from these, not here.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ClinicConfig {
    /// IANA time zone all wall-clock times are interpreted in
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Opening hour (24h, inclusive)
    #[serde(default = "default_workday_start_hour")]
    pub workday_start_hour: u32,
    /// Closing hour (24h, exclusive)
    #[serde(default = "default_workday_end_hour")]
    pub workday_end_hour: u32,
    #[serde(default = "default_appointment_duration_minutes")]
    pub appointment_duration_minutes: u32,
    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,
    /// How many calendar days past the preferred date the search may look
    #[serde(default = "default_max_search_days_ahead")]
    pub max_search_days_ahead: u32,
    /// Slot granularity
    #[serde(default = "default_slot_step_minutes")]
    pub slot_step_minutes: u32,
    /// How many alternatives to offer when the requested slot is taken
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}
fn default_workday_start_hour() -> u32 {
    9
}
fn default_workday_end_hour() -> u32 {
    17
}
fn default_appointment_duration_minutes() -> u32 {
    30
}
fn default_calendar_id() -> String {
    DEFAULT_CALENDAR_ID.to_string()
}
fn default_max_search_days_ahead() -> u32 {
    7
}
fn default_slot_step_minutes() -> u32 {
    30
}
fn default_max_suggestions() -> usize {
    3
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            workday_start_hour: default_workday_start_hour(),
            workday_end_hour: default_workday_end_hour(),
            appointment_duration_minutes: default_appointment_duration_minutes(),
            calendar_id: default_calendar_id(),
            max_search_days_ahead: default_max_search_days_ahead(),
            slot_step_minutes: default_slot_step_minutes(),
            max_suggestions: default_max_suggestions(),
        }
    }
}

// --- Google Calendar Config ---
// Either a service account key or an installed-app OAuth client is required.
// Credential files are referenced by path only.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct GcalConfig {
    pub key_path: Option<String>,         // service account JSON
    pub credentials_path: Option<String>, // OAuth client secret JSON (desktop app)
    pub token_path: Option<String>,       // token cache for the OAuth flow
    pub calendar_id: Option<String>,      // overrides clinic.calendar_id
}

impl GcalConfig {
    pub fn token_path_or_default(&self) -> &str {
        self.token_path.as_deref().unwrap_or(DEFAULT_TOKEN_PATH)
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_gcal: bool,

    #[serde(default)]
    pub clinic: ClinicConfig,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub gcal: Option<GcalConfig>,
}

impl AppConfig {
    /// Calendar the receptionist books into: the Google override if present,
    /// otherwise the clinic default.
    pub fn calendar_id(&self) -> &str {
        self.gcal
            .as_ref()
            .and_then(|gcal| gcal.calendar_id.as_deref())
            .unwrap_or(&self.clinic.calendar_id)
    }
}
