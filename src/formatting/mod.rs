//! This module contains the formatters that turn log events into text.
//!
//! Hosts such as the `tracing` layer and the command-line tool depend on the
//! `TextFormatter` trait only, so any formatter can be plugged in.
mod cursor;
pub mod json;

pub use json::{write_literal, SimpleJsonFormatter};

use crate::error::FormatError;
use crate::events::LogEvent;
use std::io::Write;

/// Renders a log event as text into a writer.
pub trait TextFormatter: Send + Sync {
    /// Writes the textual form of `event` to `output`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `output` fails.
    fn format(&self, event: &LogEvent, output: &mut dyn Write) -> Result<(), FormatError>;
}
