// File: crates/drawstrava/src/main.rs
// Summary: Fetches the trailing window of Strava activities and renders one merged elevation profile PNG.

mod cli;
mod settings;

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use elevation_core::{Pipeline, RunReport};
use elevation_strava::StravaClient;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{normalize_legacy_flags, Cli};
use crate::settings::{apply_cli, load_settings, resolve_token, Settings, TOKEN_ENV};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_legacy_flags(std::env::args_os()));

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let settings = match load_settings(cli.config.as_deref()).and_then(|s| {
        let s = apply_cli(s, &cli);
        s.validate()?;
        Ok(s)
    }) {
        Ok(s) => s,
        Err(err) => {
            error!("{err:#}");
            return ExitCode::FAILURE;
        }
    };

    let env_token = std::env::var(TOKEN_ENV).ok();
    let Some(token) = resolve_token(cli.token.as_deref(), env_token.as_deref(), settings.token.as_deref())
    else {
        eprintln!(
            "\nPlease provide an access token via the --token flag or the '{TOKEN_ENV}' environment variable; \
             one can be found at https://www.strava.com/settings/api\n"
        );
        eprintln!("{}", Cli::command().render_help());
        return ExitCode::FAILURE;
    };

    debug!(activity = cli.activity, "activity flag is accepted but not used");
    match run(&settings, token).await {
        Ok(report) => {
            println!("Wrote {}", report.output_path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(settings: &Settings, token: String) -> Result<RunReport> {
    let client = StravaClient::new(settings.strava_config(token)).context("building HTTP client")?;
    let pipeline = Pipeline::new(Arc::new(client), settings.pipeline_config());
    info!(
        athlete = settings.athlete,
        days = settings.days,
        output = %settings.output.display(),
        "drawing elevation profile"
    );
    Ok(pipeline.run().await?)
}
