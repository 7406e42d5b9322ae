//! Full configuration validation.
//!
//! Each section has its own validator; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod chrome;
mod helpers;
mod misc;


use crate::schema::AppDockConfig;
use appdock_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &AppDockConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    chrome::validate_chrome(&mut errors, config);
    misc::validate_hibernation(&mut errors, config);
    misc::validate_persistence(&mut errors, config);
    misc::validate_window(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
