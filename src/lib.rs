//! Compact JSON formatting for structured log events.
//!
//! [`SimpleJsonFormatter`] streams a [`LogEvent`] into any `io::Write` as a
//! single JSON object. The [`logging`] module plugs it into `tracing`, and
//! [`app`] drives it from newline-delimited input records.
pub mod app;
pub mod error;
pub mod events;
pub mod formatting;
pub mod logging;

pub use error::{FormatError, RecordError};
pub use events::{LogEvent, LogEventLevel, LogEventProperty, PropertyValue, ScalarValue, StructureValue};
pub use formatting::{SimpleJsonFormatter, TextFormatter};
