mod catalog;
mod config;
mod console;
mod display;
mod predict;
mod skytrack;

use chrono::Utc;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use thiserror::Error;
use tokio::runtime::Runtime;

use crate::catalog::{CatalogError, OrbitalElements};
use crate::config::{CatalogSource, Config, Overrides};
use crate::display::SkyTrackApp;
use crate::predict::{PredictError, Satellite};
use crate::skytrack::PathSample;

const STALE_ELEMENTS: chrono::Duration = chrono::Duration::days(14);

#[derive(Parser)]
#[command(name = "sky-track")]
#[command(about = "Real-time polar sky track of a satellite over a fixed observer")]
struct Cli {
    #[command(flatten)]
    overrides: Overrides,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Open the animated sky chart (default)
    Plot,
    /// Print the live position every interval until Ctrl-C
    Track,
    /// Print the predicted three-hour path as JSON
    Path,
}

#[derive(Debug, Error)]
enum LoadError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Predict(#[from] PredictError),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match Config::load(&cli.overrides) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match Runtime::new() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let satellite = match runtime.block_on(load_satellite(&config)) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command.unwrap_or(Commands::Plot) {
        Commands::Plot => plot(config, satellite),
        Commands::Track => track(&runtime, &config, &satellite),
        Commands::Path => path(&config, &satellite),
    }
}

async fn load_satellite(config: &Config) -> Result<Satellite, LoadError> {
    let text = match &config.catalog {
        CatalogSource::Url(url) => catalog::fetch_catalog(url).await?,
        CatalogSource::File(path) => catalog::read_catalog(path)?,
    };
    let elements: OrbitalElements = catalog::find_elements(&text, &config.satellite)?;
    let satellite = Satellite::from_elements(&elements)?;

    let age = Utc::now() - satellite.epoch();
    if age > STALE_ELEMENTS {
        log::warn!(
            "Elements for {} are {} days old; positions may be inaccurate",
            satellite.name,
            age.num_days()
        );
    }
    Ok(satellite)
}

fn plot(config: Config, satellite: Satellite) -> ExitCode {
    let path = match PathSample::compute(&satellite, &config.station, Utc::now()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to compute orbit path: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let app = SkyTrackApp::new(satellite, config.station, path, config.update_interval);
    match display::run(app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn track(runtime: &Runtime, config: &Config, satellite: &Satellite) -> ExitCode {
    let stop = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };
    runtime.block_on(console::track(
        satellite,
        &config.station,
        config.update_interval,
        Utc::now,
        stop,
    ));
    ExitCode::SUCCESS
}

fn path(config: &Config, satellite: &Satellite) -> ExitCode {
    let result = PathSample::compute(satellite, &config.station, Utc::now())
        .map_err(|e| e.to_string())
        .and_then(|p| serde_json::to_string_pretty(&p).map_err(|e| e.to_string()));

    match result {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to compute orbit path: {}", e);
            ExitCode::FAILURE
        }
    }
}
