//! Bandeco - USP university restaurant menus in the terminal
//!
//! Resolves the requested day and restaurant, serves the week's menu from the local
//! cache when available and fetches the current week from USP otherwise.

use std::process::ExitCode;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bandeco::cache::CacheManager;
use bandeco::cli::{Cli, StartupConfig};
use bandeco::data::UspMenuClient;
use bandeco::display::{render_json, render_pretty};
use bandeco::service::MenuService;

/// Timeout for the single menu request
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Installs the stderr diagnostics subscriber
///
/// `RUST_LOG` takes precedence over the `--verbose` flag.
fn init_tracing(config: &StartupConfig) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_directive().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Resolves the request and renders it
async fn run(config: &StartupConfig) -> Result<String, Box<dyn std::error::Error>> {
    let cache = match &config.cache_dir {
        Some(dir) => Some(CacheManager::with_dir(dir.clone())),
        None => CacheManager::new(),
    };
    if cache.is_none() {
        tracing::warn!("no cache directory available, menus will not be cached");
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?;
    let today = Local::now().date_naive();
    let service = MenuService::new(UspMenuClient::with_client(client), cache, today);

    let resolution = service.resolve(&config.day, &config.restaurant).await?;
    tracing::debug!(origin = ?resolution.origin, entries = resolution.entries.len(), "menu served");

    let output = if config.json {
        let mut json = render_json(
            &resolution.entries,
            resolution.restaurant,
            resolution.date,
            config.display,
        )?;
        json.push('\n');
        json
    } else {
        render_pretty(
            &resolution.entries,
            resolution.restaurant,
            resolution.date,
            config.display,
        )
    };

    Ok(output)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config);

    match run(&config).await {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
