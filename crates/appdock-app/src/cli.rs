use clap::Parser;
use std::path::PathBuf;

/// AppDock, a desktop container for web apps organized into workspaces.
#[derive(Parser, Debug)]
#[command(name = "appdock", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Load the UI shell from a development server instead of the bundled assets.
    #[arg(long, env = "APPDOCK_DEV_URL")]
    pub dev_url: Option<String>,

    /// Directory for the store and partition data.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory holding the bundled UI shell.
    #[arg(long)]
    pub assets_dir: Option<PathBuf>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let args = Args::try_parse_from([
            "appdock",
            "--log-level",
            "debug",
            "--dev-url",
            "http://localhost:5173",
            "--data-dir",
            "/tmp/appdock",
        ])
        .unwrap();
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.dev_url.as_deref(), Some("http://localhost:5173"));
        assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/appdock")));
        assert!(args.config.is_none());
    }
}
