pub mod args;
mod setup;

pub use args::AppArgs;

use crate::events::EventRecord;
use crate::formatting::{SimpleJsonFormatter, TextFormatter};
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

/// Counts of what a run did with its input lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub formatted: usize,
    pub skipped: usize,
}

pub fn launch() -> Result<()> {
    launch_with_args(AppArgs::from_cli())
}

pub fn launch_with_args(args: AppArgs) -> Result<()> {
    setup::configure_logging(&args)?;

    let formatter = SimpleJsonFormatter::new(args.omit_enclosing_object);
    let input = setup::open_input(&args)?;
    let stdout = io::stdout();
    let mut output = stdout.lock();

    let summary = run(&formatter, input, &mut output)?;
    tracing::info!(
        formatted = summary.formatted,
        skipped = summary.skipped,
        "finished formatting event records"
    );
    Ok(())
}

/// Formats every record line of `input` into `output`, one event per line.
///
/// Blank lines are ignored. Lines that are not UTF-8 or not a valid record
/// are skipped with a warning naming the line number.
///
/// # Errors
///
/// Returns an error if reading `input` or writing `output` fails.
pub fn run<F, R, W>(formatter: &F, input: R, output: &mut W) -> Result<RunSummary>
where
    F: TextFormatter + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut summary = RunSummary::default();

    for (index, bytes) in input.split(b'\n').enumerate() {
        let line_number = index + 1;
        let mut bytes = bytes.with_context(|| format!("failed to read input line {}", line_number))?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }

        let line = match String::from_utf8(bytes) {
            Ok(line) => line,
            Err(err) => {
                tracing::warn!(line = line_number, error = %err, "skipping event record that is not UTF-8");
                summary.skipped += 1;
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let record = match EventRecord::parse(&line) {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(line = line_number, error = %err, "skipping malformed event record");
                summary.skipped += 1;
                continue;
            }
        };

        formatter
            .format(&record.into_event(), output)
            .context("failed to write formatted event")?;
        output.write_all(b"\n")?;
        summary.formatted += 1;
    }

    output.flush()?;
    Ok(summary)
}
