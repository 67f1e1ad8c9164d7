//! This module provides a `tracing` layer that writes every event through a
//! `TextFormatter`, one event per line.
use crate::error::{ExceptionText, FormatError};
use crate::events::{EventException, LogEvent, LogEventLevel, LogEventProperty, PropertyValue};
use crate::formatting::TextFormatter;
use chrono::Utc;
use std::error::Error;
use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::{
    layer::{Context, SubscriberExt},
    registry::LookupSpan,
    EnvFilter, Layer,
};

/// Property that records the `tracing` target of a captured event.
pub const SOURCE_CONTEXT_PROPERTY: &str = "SourceContext";

/// A `tracing` layer that converts events into `LogEvent`s and formats them
/// into a shared sink.
pub struct JsonLogCollector<F, W> {
    formatter: F,
    sink: Mutex<W>,
}

impl<F, W> JsonLogCollector<F, W>
where
    F: TextFormatter + 'static,
    W: Write + Send + 'static,
{
    /// Creates a new `JsonLogCollector`.
    ///
    /// # Arguments
    ///
    /// * `formatter` - Renders each captured event.
    /// * `sink` - Receives the rendered events, each followed by a newline.
    pub fn new(formatter: F, sink: W) -> Self {
        Self {
            formatter,
            sink: Mutex::new(sink),
        }
    }

    /// Installs a collector as the global default subscriber, behind `filter`.
    ///
    /// # Errors
    ///
    /// This function will return an error if a global default subscriber has
    /// already been set.
    pub fn init_subscriber(
        formatter: F,
        sink: W,
        filter: EnvFilter,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(JsonLogCollector::new(formatter, sink));

        tracing::subscriber::set_global_default(subscriber)?;
        Ok(())
    }

    /// Writes one event and its line terminator while holding the sink lock,
    /// so lines from concurrent events never interleave.
    fn emit(&self, event: &LogEvent) -> Result<(), FormatError> {
        // A panic mid-write leaves at worst a partial line; keep writing.
        let mut sink = self
            .sink
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.formatter.format(event, &mut *sink)?;
        sink.write_all(b"\n")?;
        sink.flush()?;
        Ok(())
    }
}

/// Builds a `LogEvent` from a `tracing` event.
///
/// The `message` field becomes the message template, an error field becomes
/// the exception and every other field becomes a property in record order.
pub fn capture_event(event: &Event<'_>) -> LogEvent {
    let metadata = event.metadata();

    let mut visitor = PropertyVisitor::default();
    event.record(&mut visitor);

    let mut log_event = LogEvent::new(
        Utc::now().fixed_offset(),
        LogEventLevel::from(*metadata.level()),
        visitor.exception,
        visitor.message.unwrap_or_default(),
        visitor.properties,
    );
    log_event.add_property_if_absent(LogEventProperty::new(
        SOURCE_CONTEXT_PROPERTY,
        metadata.target(),
    ));
    log_event
}

impl<S, F, W> Layer<S> for JsonLogCollector<F, W>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    F: TextFormatter + 'static,
    W: Write + Send + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let log_event = capture_event(event);
        // The tracing call site has nowhere to receive a sink error.
        let _ = self.emit(&log_event);
    }
}

/// A `tracing::field::Visit` implementation that collects event fields.
#[derive(Default)]
struct PropertyVisitor {
    message: Option<String>,
    exception: Option<EventException>,
    properties: Vec<LogEventProperty>,
}

impl PropertyVisitor {
    fn push(&mut self, field: &Field, value: impl Into<PropertyValue>) {
        self.properties.push(LogEventProperty::new(field.name(), value));
    }
}

impl Visit for PropertyVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let text = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(text);
        } else {
            self.push(field, text);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.push(field, value);
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, value);
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, value);
    }

    fn record_i128(&mut self, field: &Field, value: i128) {
        self.push(field, value);
    }

    fn record_u128(&mut self, field: &Field, value: u128) {
        self.push(field, value);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, value);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, value);
    }

    fn record_error(&mut self, _field: &Field, value: &(dyn Error + 'static)) {
        self.exception = Some(Arc::new(ExceptionText(value.to_string())));
    }
}
