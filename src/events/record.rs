//! Newline-delimited JSON input records describing log events.
use super::{EventException, LogEvent, LogEventLevel, LogEventProperty, PropertyValue};
use crate::error::{ExceptionText, RecordError};
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// One input line, using the same field names the JSON formatter writes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EventRecord {
    #[serde(rename = "TimeStamp")]
    pub timestamp: DateTime<FixedOffset>,
    pub level: LogEventLevel,
    pub message_template: String,
    #[serde(default)]
    pub exception: Option<String>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl EventRecord {
    /// Parses a single JSON line.
    pub fn parse(line: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(line)?)
    }

    pub fn into_event(self) -> LogEvent {
        let exception = self
            .exception
            .map(|text| -> EventException { Arc::new(ExceptionText(text)) });
        let properties = self
            .properties
            .into_iter()
            .map(|(name, value)| LogEventProperty::new(name, PropertyValue::from(value)));
        LogEvent::new(
            self.timestamp,
            self.level,
            exception,
            self.message_template,
            properties,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_record() {
        let record = EventRecord::parse(
            r#"{"TimeStamp":"2021-01-01T10:00:00+02:00","Level":"Warning","MessageTemplate":"disk {Pct}","Exception":"boom","Properties":{"Pct":93,"Host":"a"}}"#,
        )
        .unwrap();
        let event = record.into_event();
        assert_eq!(event.level(), LogEventLevel::Warning);
        assert_eq!(event.message_template().text(), "disk {Pct}");
        assert_eq!(event.timestamp().offset().local_minus_utc(), 7200);
        assert_eq!(event.exception().map(|e| e.to_string()).as_deref(), Some("boom"));
        let names: Vec<_> = event.properties().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Pct", "Host"]);
    }

    #[test]
    fn exception_and_properties_are_optional() {
        let event = EventRecord::parse(
            r#"{"TimeStamp":"2021-01-01T00:00:00Z","Level":"Debug","MessageTemplate":"x"}"#,
        )
        .unwrap()
        .into_event();
        assert!(event.exception().is_none());
        assert!(!event.has_properties());
    }

    #[test]
    fn unknown_level_is_rejected() {
        let err = EventRecord::parse(
            r#"{"TimeStamp":"2021-01-01T00:00:00Z","Level":"Loud","MessageTemplate":"x"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, RecordError::Json(_)));
    }
}
