use std::{sync::Arc, time::Duration};

use actix_web::{middleware, web, App, HttpServer};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

use fmi_warnings::{
    api::{self, AppState},
    check,
    config::AppConfig,
    feed::HttpFeedSource,
    observability,
    pipeline::{self, DataSource},
    state::SnapshotStore,
    tasks,
};

/// CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Area to filter warnings by, e.g. "Helsinki" (overrides FMI_AREA)
    #[clap(long, global = true)]
    area: Option<String>,

    /// Feed URL (overrides FMI_FEED_URL)
    #[clap(long, global = true)]
    feed_url: Option<String>,

    /// Seconds between refreshes (overrides FMI_SCAN_INTERVAL)
    #[clap(long)]
    interval: Option<u64>,

    /// HTTP port (overrides FMI_PORT)
    #[clap(long)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll the feed and serve the warnings API (default)
    Serve,
    /// Fetch the feed once and print the filtered warnings as JSON
    Check {
        /// Print how each of these areas would match every alert instead
        #[clap(long, num_args = 1..)]
        explain: Vec<String>,
    },
}

fn main() -> std::io::Result<()> {
    dotenv().ok();
    observability::init_logging();

    let args = Args::parse();
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    match args.command {
        Some(Command::Check { explain }) => run_check(config, explain),
        Some(Command::Serve) | None => run_server(config),
    }
}

fn load_config(args: &Args) -> Result<AppConfig, fmi_warnings::errors::ConfigError> {
    let mut config = AppConfig::from_env()?;
    if let Some(area) = &args.area {
        config.area = area.clone();
    }
    if let Some(feed_url) = &args.feed_url {
        config.feed_url = feed_url.clone();
    }
    if let Some(interval) = args.interval {
        if interval == 0 {
            return Err(fmi_warnings::errors::ConfigError::invalid(
                "--interval",
                "0",
                "must be positive",
            ));
        }
        config.scan_interval = Duration::from_secs(interval);
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    Ok(config)
}

fn feed_source(config: &AppConfig) -> std::io::Result<HttpFeedSource> {
    HttpFeedSource::new(config.feed_url.clone(), config.fetch_timeout)
        .map_err(|e| std::io::Error::other(e.to_string()))
}

#[actix_web::main]
async fn run_check(config: AppConfig, explain: Vec<String>) -> std::io::Result<()> {
    let source = feed_source(&config)?;
    let entries = source
        .fetch_raw_entries()
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let output = if explain.is_empty() {
        serde_json::to_string_pretty(&pipeline::process(&entries, &config.filter()))
    } else {
        serde_json::to_string_pretty(&check::explain(&entries, &explain))
    }?;
    println!("{output}");
    Ok(())
}

#[actix_web::main]
async fn run_server(config: AppConfig) -> std::io::Result<()> {
    let filter = config.filter();
    let store = SnapshotStore::new();
    let source = feed_source(&config)?;

    tracing::info!(instance = %filter.instance_id(), "Starting {}", filter.display_name());
    tracing::info!(
        "Starting server at http://{}:{}",
        config.bind_address,
        config.port
    );

    tokio::spawn(tasks::poller::runner::start(
        Arc::new(source),
        Arc::new(store.clone()),
        filter.clone(),
        config.scan_interval,
    ));

    let state = web::Data::new(AppState { store, filter });

    HttpServer::new(move || {
        App::new()
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(middleware::Compress::default())
            .wrap(middleware::NormalizePath::new(
                middleware::TrailingSlash::Trim,
            ))
            .app_data(state.clone())
            .service(api::health::routes())
            .service(api::routes())
    })
    .workers(1)
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await
}
