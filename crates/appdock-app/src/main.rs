mod app_state;
mod bridge;
mod cli;

use std::path::PathBuf;

use appdock_config::{toml_loader, ReloadManager};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use app_state::{AppDockApp, LaunchOptions};

/// Relative path from the working directory to the bundled shell.
const ASSETS_DIR: &str = "assets";

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        eprintln!("\n--- AppDock crashed ---");
        eprintln!("{info}");
        eprintln!("-----------------------\n");
        default_hook(info);
    }));
}

fn init_logging(directive: &str) {
    let parsed = directive
        .parse::<Directive>()
        .or_else(|_| "appdock=info".parse::<Directive>());
    let filter = match parsed {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() {
    install_panic_hook();

    let args = cli::parse();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to start tokio runtime: {e}");
            std::process::exit(1);
        }
    };

    let config_path = match args.config.clone() {
        Some(path) => path,
        None => toml_loader::default_config_path().unwrap_or_else(|_| PathBuf::from("config.toml")),
    };
    if args.config.is_none() && !config_path.exists() {
        if let Err(e) = toml_loader::create_default_config(&config_path) {
            eprintln!("failed to write default config: {e}");
        }
    }
    let (config, config_rx) = runtime.block_on(ReloadManager::start(config_path.clone()));

    let directive = args
        .log_level
        .as_deref()
        .map(|level| format!("appdock={level}"))
        .unwrap_or_else(|| config.logging.level.directive().to_string());
    init_logging(&directive);

    tracing::info!("AppDock v{} starting...", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_path.display(), "config loaded");

    let data_dir = args
        .data_dir
        .clone()
        .or_else(|| dirs::data_dir().map(|d| d.join("appdock")))
        .unwrap_or_else(|| PathBuf::from(".appdock"));
    let assets_dir = args.assets_dir.clone().unwrap_or_else(|| {
        std::env::current_dir()
            .unwrap_or_default()
            .join(ASSETS_DIR)
    });
    if let Some(url) = &args.dev_url {
        tracing::info!(url = %url, "using development shell");
    }

    let options = LaunchOptions {
        data_dir,
        assets_dir,
        dev_url: args.dev_url,
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("failed to create event loop: {e}");
            return;
        }
    };
    let mut app = AppDockApp::new(config, options, runtime, config_rx);

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
