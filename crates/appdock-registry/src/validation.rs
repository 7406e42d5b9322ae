//! Field validation for registry mutations.

use appdock_common::{DockError, Result};

pub const ZOOM_MIN: f64 = 0.5;
pub const ZOOM_MAX: f64 = 2.0;

pub fn validate_name(field: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(DockError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Accepts absolute `http`/`https` URLs only.
pub fn validate_url(raw: &str) -> Result<()> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| DockError::validation(format!("invalid url '{raw}': {e}")))?;
    match parsed.scheme() {
        "http" | "https" if parsed.has_host() => Ok(()),
        "http" | "https" => Err(DockError::validation(format!("url '{raw}' has no host"))),
        other => Err(DockError::validation(format!(
            "url scheme '{other}' is not supported, use http or https"
        ))),
    }
}

pub fn validate_zoom(level: f64) -> Result<()> {
    if !level.is_finite() || !(ZOOM_MIN..=ZOOM_MAX).contains(&level) {
        return Err(DockError::validation(format!(
            "zoomLevel = {level}, must be between {ZOOM_MIN} and {ZOOM_MAX}"
        )));
    }
    Ok(())
}

pub fn validate_dock_size(size: u32, min: u32, max: u32) -> Result<()> {
    if size < min || size > max {
        return Err(DockError::validation(format!(
            "dockSize = {size}, must be between {min} and {max}"
        )));
    }
    Ok(())
}

pub fn validate_idle_minutes(minutes: u32) -> Result<()> {
    if minutes < 1 {
        return Err(DockError::validation("idleTimeMinutes must be at least 1"));
    }
    Ok(())
}
