//! Validation for smaller config sections: hibernation, persistence, window.

use crate::schema::AppDockConfig;

use super::helpers::{validate_range, validate_range_u64};

pub(crate) fn validate_hibernation(errors: &mut Vec<String>, config: &AppDockConfig) {
    validate_range_u64(
        errors,
        "hibernation.sweep_interval_secs",
        config.hibernation.sweep_interval_secs,
        10,
        3600,
    );
    validate_range(
        errors,
        "hibernation.default_idle_minutes",
        config.hibernation.default_idle_minutes,
        1,
        1440,
    );
}

pub(crate) fn validate_persistence(errors: &mut Vec<String>, config: &AppDockConfig) {
    let persistence = &config.persistence;
    if persistence.file_name.trim().is_empty() {
        errors.push("persistence.file_name must not be empty".into());
    }
    if persistence.file_name.contains(['/', '\\']) {
        errors.push(format!(
            "persistence.file_name = {:?} must be a bare file name",
            persistence.file_name
        ));
    }
    validate_range_u64(
        errors,
        "persistence.retry_initial_ms",
        persistence.retry_initial_ms,
        10,
        60_000,
    );
    if persistence.retry_max_ms < persistence.retry_initial_ms {
        errors.push(format!(
            "persistence.retry_max_ms = {} is below persistence.retry_initial_ms = {}",
            persistence.retry_max_ms, persistence.retry_initial_ms
        ));
    }
}

pub(crate) fn validate_window(errors: &mut Vec<String>, config: &AppDockConfig) {
    validate_range(errors, "window.width", config.window.width, 480, 7680);
    validate_range(errors, "window.height", config.window.height, 320, 4320);
}
