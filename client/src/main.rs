//! Deploywatch - Entry Point
//!
//! Live terminal dashboard for the deployment pipeline backend. Combines a
//! one-shot snapshot fetch with a reconnecting change-event stream and
//! renders the filtered, sorted view.

use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::time::Duration;

use deploywatch::app::options::{AppOptions, Credentials};
use deploywatch::app::run::run;
use deploywatch::config::Settings;
use deploywatch::logs::{init_logging, LogOptions};
use deploywatch::store::projector::ViewFilter;
use deploywatch::workers::{renderer, stream};

use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut cli_args: HashMap<String, String> = HashMap::new();

    for arg in args.iter().skip(1) {
        if let Some((key, value)) = arg.split_once('=') {
            // Handle --key=value format
            let clean_key = key.trim_start_matches('-');
            cli_args.insert(clean_key.to_string(), value.to_string());
        } else if arg.starts_with("--") {
            // Handle standalone flags like --version
            let clean_key = arg.trim_start_matches('-');
            cli_args.insert(clean_key.to_string(), "true".to_string());
        }
    }

    // Print version and exit
    if cli_args.contains_key("version") {
        println!("deploywatch {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    // Load the settings file, if one was given
    let mut settings = Settings::default();
    if let Some(path) = cli_args.get("config") {
        settings = match Settings::load(Path::new(path)) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Unable to read settings file {}: {}", path, e);
                return;
            }
        };
    }

    // Initialize logging
    let mut log_options = LogOptions {
        log_level: settings.log_level.clone(),
        ..Default::default()
    };
    if let Some(level) = cli_args.get("log-level") {
        match level.parse() {
            Ok(level) => log_options.log_level = level,
            Err(e) => {
                eprintln!("{}", e);
                return;
            }
        }
    }
    if let Err(e) = init_logging(log_options) {
        eprintln!("Failed to initialize logging: {e}");
    }

    // Credentials: flags first, environment as fallback
    let username = cli_args
        .get("username")
        .cloned()
        .or_else(|| env::var("DEPLOYWATCH_USERNAME").ok());
    let password = cli_args
        .get("password")
        .cloned()
        .or_else(|| env::var("DEPLOYWATCH_PASSWORD").ok());

    let (Some(username), Some(password)) = (username, password) else {
        error!("Missing credentials");
        error!("Run: deploywatch --username=<user> --password=<pass> [--base-url=<url>]");
        return;
    };

    // Display filter
    let mut filter = ViewFilter::default();
    if let Some(search) = cli_args.get("search") {
        filter.search = search.clone();
    }
    if let Some(status) = cli_args.get("status") {
        match status.parse() {
            Ok(status) => filter.status = Some(status),
            Err(e) => {
                error!("{}", e);
                return;
            }
        }
    }

    let options = AppOptions {
        backend_base_url: cli_args
            .get("base-url")
            .cloned()
            .unwrap_or(settings.backend.base_url),
        stream: stream::Options {
            reconnect_delay: Duration::from_secs(settings.reconnect_delay_secs),
        },
        renderer: renderer::Options { filter },
        ..Default::default()
    };

    info!("Running deploywatch against {}", options.backend_base_url);
    let credentials = Credentials { username, password };
    let result = run(options, credentials, await_shutdown_signal()).await;
    if let Err(e) = result {
        error!("Failed to run deploywatch: {e}");
    }
}

async fn await_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                return;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => {
                info!("SIGTERM received, shutting down...");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl+C received, shutting down...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        info!("Ctrl+C received, shutting down...");
    }
}
