//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# AppDock Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[chrome]
# toolbar_height = 40      # 0-200
# status_bar_height = 24   # 0-100
# dock_min = 48
# dock_max = 120
# default_dock_size = 64   # dock_min-dock_max

[hibernation]
# sweep_interval_secs = 60     # 10-3600
# default_enabled = true
# default_idle_minutes = 30    # 1-1440

[persistence]
# file_name = "store.json"
# retry_initial_ms = 250
# retry_max_ms = 30000

[window]
# title = "AppDock"
# width = 1280
# height = 800

[logging]
# level = "INFO"           # TRACE, DEBUG, INFO, WARN, ERROR
"##
    .to_string()
}
