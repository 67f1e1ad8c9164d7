//! The log event consumed by formatters.
use super::{LogEventLevel, LogEventProperty, PropertyValue};
use chrono::{DateTime, FixedOffset};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Shared handle to the error attached to an event.
pub type EventException = Arc<dyn Error + Send + Sync>;

/// The message template of an event, kept as its raw text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageTemplate {
    text: String,
}

impl MessageTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for MessageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for MessageTemplate {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for MessageTemplate {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// One structured log record.
///
/// Properties keep their insertion order and names stay unique: every
/// mutation goes through the `*_property*` methods below.
#[derive(Debug, Clone)]
pub struct LogEvent {
    timestamp: DateTime<FixedOffset>,
    level: LogEventLevel,
    message_template: MessageTemplate,
    exception: Option<EventException>,
    properties: Vec<LogEventProperty>,
}

impl LogEvent {
    /// Creates an event. Later properties with an already used name replace
    /// the earlier value in place.
    pub fn new(
        timestamp: DateTime<FixedOffset>,
        level: LogEventLevel,
        exception: Option<EventException>,
        message_template: impl Into<MessageTemplate>,
        properties: impl IntoIterator<Item = LogEventProperty>,
    ) -> Self {
        let mut event = Self {
            timestamp,
            level,
            message_template: message_template.into(),
            exception,
            properties: Vec::new(),
        };
        for property in properties {
            event.add_or_update_property(property);
        }
        event
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn level(&self) -> LogEventLevel {
        self.level
    }

    pub fn message_template(&self) -> &MessageTemplate {
        &self.message_template
    }

    pub fn exception(&self) -> Option<&EventException> {
        self.exception.as_ref()
    }

    /// Properties in insertion order.
    pub fn properties(&self) -> impl ExactSizeIterator<Item = &LogEventProperty> {
        self.properties.iter()
    }

    pub fn has_properties(&self) -> bool {
        !self.properties.is_empty()
    }

    /// Looks up a property value by name.
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }

    /// Sets a property, replacing an existing value with the same name
    /// without moving it.
    pub fn add_or_update_property(&mut self, property: LogEventProperty) {
        match self.properties.iter_mut().find(|p| p.name == property.name) {
            Some(existing) => existing.value = property.value,
            None => self.properties.push(property),
        }
    }

    /// Adds a property only if no property with that name exists.
    ///
    /// Returns `true` if the property was added.
    pub fn add_property_if_absent(&mut self, property: LogEventProperty) -> bool {
        if self.properties.iter().any(|p| p.name == property.name) {
            return false;
        }
        self.properties.push(property);
        true
    }

    /// Removes a property by name, returning its value if it was present.
    pub fn remove_property_if_present(&mut self, name: &str) -> Option<PropertyValue> {
        let index = self.properties.iter().position(|p| p.name == name)?;
        Some(self.properties.remove(index).value)
    }
}
