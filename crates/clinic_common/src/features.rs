//! Runtime feature flags.
//!
//! The receptionist runs in demo mode unless Google Calendar is both switched
//! on (`use_gcal = true`) and configured (a `[gcal]` section is present).

use clinic_config::AppConfig;

/// A feature is enabled when its flag is set and its configuration section exists.
pub fn is_feature_enabled<T>(use_feature: bool, feature_config: Option<&T>) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if the Google Calendar backend should be used.
pub fn is_gcal_enabled(config: &AppConfig) -> bool {
    is_feature_enabled(config.use_gcal, config.gcal.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_config::GcalConfig;

    #[test]
    fn test_gcal_needs_flag_and_section() {
        let mut config = AppConfig::default();
        assert!(!is_gcal_enabled(&config));

        config.use_gcal = true;
        assert!(!is_gcal_enabled(&config));

        config.gcal = Some(GcalConfig::default());
        assert!(is_gcal_enabled(&config));

        config.use_gcal = false;
        assert!(!is_gcal_enabled(&config));
    }
}
