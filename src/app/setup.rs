//! This module handles the initial setup of the command-line tool.
use super::args::AppArgs;
use crate::formatting::SimpleJsonFormatter;
use crate::logging::JsonLogCollector;
use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

/// Configures diagnostic logging.
///
/// Diagnostics are themselves formatted as JSON events and written to
/// stderr, keeping stdout for the formatted input records.
pub fn configure_logging(args: &AppArgs) -> Result<()> {
    let filter = resolve_log_filter(args)?;
    JsonLogCollector::init_subscriber(SimpleJsonFormatter::default(), io::stderr(), filter)
        .map_err(|err| anyhow!("failed to install log collector: {}", err))
}

/// Resolves the log filter.
///
/// The filter can be provided via a command-line argument or the `RUST_LOG`
/// environment variable.
fn resolve_log_filter(args: &AppArgs) -> Result<EnvFilter> {
    let directives = args
        .log_filter
        .clone()
        .or_else(|| std::env::var(EnvFilter::DEFAULT_ENV).ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    EnvFilter::try_new(&directives).with_context(|| format!("invalid log filter '{}'", directives))
}

/// Opens the record source: the `--input` file, or stdin.
pub fn open_input(args: &AppArgs) -> Result<Box<dyn BufRead>> {
    match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open input file '{}'", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}
