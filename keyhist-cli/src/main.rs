//! keyhist - per-character typing statistics from recorded keystrokes.
//!
//! Run with:  `RUST_LOG=info keyhist lesson.toml`

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod report;
mod steps;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = app::Cli::parse();

    match app::run(&cli) {
        Ok(output) => print!("{output}"),
        Err(error) => {
            tracing::error!(%error, "keyhist failed");
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    }
}
