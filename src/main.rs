//! The main entry point for the simple-json-log command.
use anyhow::Result;

/// Reads event records from the configured input and writes each one to
/// stdout as compact JSON.
///
/// # Errors
///
/// Returns an error if logging cannot be configured, the input cannot be
/// read, or stdout cannot be written.
fn main() -> Result<()> {
    simple_json_log::app::launch()
}
