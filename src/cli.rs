//! Command-line interface and application wiring.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::advanced::AdvancedWorker;
use crate::calculator::{AngleUnit, EvalContext, evaluate_expression};
use crate::config::Config;
use crate::state::AppState;
use crate::ui;

/// Scientific calculator for the terminal with an AI-assisted advanced mode.
#[derive(Parser, Debug)]
#[command(name = "scicalc", version)]
#[command(about = "Scientific calculator for the terminal with an AI-assisted advanced mode")]
pub struct CliArgs {
    /// Evaluate one expression non-interactively and print the result.
    pub expression: Option<String>,

    /// Start in radians mode (overrides the config file).
    #[arg(long)]
    pub radians: bool,

    /// Path to an alternative config file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. "scicalc=debug" (overrides RUST_LOG).
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,
}

/// Run the main application logic.
pub fn run() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.log.as_deref());

    let config = Config::load(args.config.as_deref()).context("loading configuration")?;
    let angle_unit = if args.radians {
        AngleUnit::Radians
    } else {
        config.calculator.angle_unit
    };

    if let Some(expression) = args.expression.as_deref() {
        return run_once(expression, angle_unit);
    }

    let worker = AdvancedWorker::spawn(config.advanced.model.clone(), config.api_key())
        .context("starting advanced-mode worker")?;
    ui::run(AppState::new(angle_unit), &worker)
}

fn run_once(expression: &str, angle_unit: AngleUnit) -> Result<()> {
    let ctx = EvalContext {
        angle_unit,
        ..EvalContext::default()
    };
    match evaluate_expression(expression, &ctx).formatted() {
        Some(formatted) => {
            println!("{formatted}");
            Ok(())
        }
        None => {
            println!("Error");
            #[allow(clippy::exit)]
            std::process::exit(1);
        }
    }
}

fn init_logging(filter: Option<&str>) {
    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::from_default_env(),
    };
    // Raw mode owns stdout; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expression_argument_is_positional() {
        let args = CliArgs::parse_from(["scicalc", "2+3×4"]);
        assert_eq!(args.expression.as_deref(), Some("2+3×4"));
        assert!(!args.radians);
    }

    #[test]
    fn flags_parse() {
        let args = CliArgs::parse_from(["scicalc", "--radians", "--log", "scicalc=debug"]);
        assert!(args.radians);
        assert_eq!(args.log.as_deref(), Some("scicalc=debug"));
        assert!(args.expression.is_none());
    }
}
