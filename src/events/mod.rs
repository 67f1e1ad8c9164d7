//! This module contains the log event model that formatters consume.
//!
//! Events are built upstream (by the `tracing` layer or from input records)
//! and are only read during formatting.
pub mod event;
pub mod level;
pub mod record;
pub mod value;

pub use event::{EventException, LogEvent, MessageTemplate};
pub use level::LogEventLevel;
pub use record::EventRecord;
pub use value::{Decimal, LogEventProperty, PropertyValue, ScalarValue, StructureValue, TYPE_TAG_PROPERTY};
