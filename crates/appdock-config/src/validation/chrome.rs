//! Chrome validation (toolbar, status bar, dock-size bounds).

use crate::schema::AppDockConfig;

use super::helpers::validate_range;

/// Validate chrome heights and dock-size bounds.
pub(crate) fn validate_chrome(errors: &mut Vec<String>, config: &AppDockConfig) {
    let chrome = &config.chrome;
    validate_range(errors, "chrome.toolbar_height", chrome.toolbar_height, 0, 200);
    validate_range(
        errors,
        "chrome.status_bar_height",
        chrome.status_bar_height,
        0,
        100,
    );
    validate_range(errors, "chrome.dock_min", chrome.dock_min, 16, 400);
    validate_range(errors, "chrome.dock_max", chrome.dock_max, 16, 400);

    if chrome.dock_min > chrome.dock_max {
        errors.push(format!(
            "chrome.dock_min = {} exceeds chrome.dock_max = {}",
            chrome.dock_min, chrome.dock_max
        ));
    } else {
        validate_range(
            errors,
            "chrome.default_dock_size",
            chrome.default_dock_size,
            chrome.dock_min,
            chrome.dock_max,
        );
    }
}
