use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cityweather_core::{Config, Pipeline, PipelineState};
use inquire::{CustomType, InquireError, Text};
use tracing::debug;

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Current weather for any city")]
pub struct Cli {
    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Edit service endpoints and request timeout.
    Configure,

    /// Show weather for a city.
    Show {
        /// City name, e.g. "Mumbai" or "New York".
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Look up cities interactively until cancelled (Esc / Ctrl-C).
    Search,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        debug!(command = ?self.command, "running command");
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, json } => show(&city.join(" "), json).await,
            Command::Search => search().await,
        }
    }
}

fn pipeline() -> anyhow::Result<Pipeline> {
    let config = Config::load()?;
    debug!(
        geocoding_url = %config.geocoding_url,
        forecast_url = %config.forecast_url,
        timeout_secs = ?config.request_timeout_secs,
        "loaded configuration"
    );
    Pipeline::from_config(&config)
}

async fn show(query: &str, json: bool) -> anyhow::Result<ExitCode> {
    let pipeline = pipeline()?;

    match pipeline.run(query).await {
        Ok(result) if json => println!("{}", output::render_json(&result)?),
        Ok(result) => print!("{}", output::render(&result)),
        Err(err) if json => {
            println!("{}", output::render_error_json(&err));
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => {
            eprintln!("{err}");
            return Ok(ExitCode::FAILURE);
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn search() -> anyhow::Result<ExitCode> {
    let pipeline = pipeline()?;

    loop {
        let query = match Text::new("City:")
            .with_placeholder("e.g. Mumbai, Shimla, New York")
            .prompt()
        {
            Ok(q) => q,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read city name"),
        };

        // Each search replaces the previous output entirely.
        let outcome = pipeline
            .run_observed(&query, |state| match state {
                PipelineState::Resolving => eprintln!("Searching..."),
                PipelineState::Fetching => eprintln!("Fetching weather..."),
                _ => {}
            })
            .await;

        match outcome {
            Ok(result) => println!("\n{}", output::render(&result)),
            Err(err) => eprintln!("\n{err}\n"),
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn configure() -> anyhow::Result<ExitCode> {
    let mut config = Config::load()?;

    let geocoding_url = Text::new("Geocoding endpoint:")
        .with_default(&config.geocoding_url)
        .prompt()
        .context("Failed to read geocoding endpoint")?;

    let forecast_url = Text::new("Forecast endpoint:")
        .with_default(&config.forecast_url)
        .prompt()
        .context("Failed to read forecast endpoint")?;

    let timeout = CustomType::<u64>::new("Request timeout in seconds (0 = transport default):")
        .with_default(config.request_timeout_secs.unwrap_or(0))
        .with_error_message("Please enter a whole number of seconds")
        .prompt()
        .context("Failed to read request timeout")?;

    config.set_endpoints(&geocoding_url, &forecast_url);
    config.set_timeout(Some(timeout));
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(ExitCode::SUCCESS)
}
