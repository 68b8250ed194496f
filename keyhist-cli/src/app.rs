use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use derive_more::From;
use keyhist::{BuildOptions, Histogram, LessonDigest, Millis};
use strum::Display;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{ConfigError, Settings};
use crate::report;
use crate::steps::{StepLog, StepLogError};

#[derive(Debug, From, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(ConfigError),

    #[error(transparent)]
    StepLog(StepLogError),

    #[error("Failed to render report: {0}")]
    Render(toml::ser::Error),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Toml,
}

/// Per-character typing statistics from a recorded keystroke log
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// TOML file with the recorded steps
    pub steps: PathBuf,

    /// directory containing settings.toml
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// timestamp the lesson started at, overriding the step log
    #[clap(short = 's', long)]
    pub started_at: Option<Millis>,

    /// output format
    #[clap(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// include key transition counts
    #[clap(short, long)]
    pub digest: bool,
}

/// Load the step log, aggregate it and render the report
pub fn run(cli: &Cli) -> Result<String, AppError> {
    let settings = Settings::get(cli.config.clone())?;
    let config = settings.configuration();

    let log = StepLog::load(&cli.steps)?;
    let started_at = cli.started_at.or(log.started_at);
    info!(
        steps = log.steps.len(),
        ?started_at,
        format = %cli.format,
        "aggregating step log"
    );

    let options = BuildOptions {
        started_at,
        config,
    };
    let histogram = Histogram::from_steps(&log.steps, options);
    if !histogram.validate_with(&config) {
        warn!(
            complexity = histogram.complexity(),
            "histogram is not usable for adapting lessons"
        );
    }

    let digest = cli
        .digest
        .then(|| LessonDigest::new(&histogram, &log.steps));

    let output = match cli.format {
        OutputFormat::Text => report::render_text(&histogram, &config, digest.as_ref()),
        OutputFormat::Toml => report::render_toml(&histogram, &config, digest.as_ref())?,
    };

    Ok(output)
}
