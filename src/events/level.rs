//! Severity levels attached to every log event.
use serde::Deserialize;
use std::fmt;

/// The severity of a log event, from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum LogEventLevel {
    Verbose,
    Debug,
    Information,
    Warning,
    Error,
    Fatal,
}

impl LogEventLevel {
    /// The textual rendering used in formatted output.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogEventLevel::Verbose => "Verbose",
            LogEventLevel::Debug => "Debug",
            LogEventLevel::Information => "Information",
            LogEventLevel::Warning => "Warning",
            LogEventLevel::Error => "Error",
            LogEventLevel::Fatal => "Fatal",
        }
    }
}

impl fmt::Display for LogEventLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<tracing::Level> for LogEventLevel {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => LogEventLevel::Verbose,
            tracing::Level::DEBUG => LogEventLevel::Debug,
            tracing::Level::INFO => LogEventLevel::Information,
            tracing::Level::WARN => LogEventLevel::Warning,
            tracing::Level::ERROR => LogEventLevel::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracing_levels_map_onto_event_levels() {
        assert_eq!(LogEventLevel::from(tracing::Level::TRACE), LogEventLevel::Verbose);
        assert_eq!(LogEventLevel::from(tracing::Level::INFO), LogEventLevel::Information);
        assert_eq!(LogEventLevel::from(tracing::Level::WARN), LogEventLevel::Warning);
        assert_eq!(LogEventLevel::from(tracing::Level::ERROR), LogEventLevel::Error);
    }

    #[test]
    fn levels_render_as_variant_names() {
        assert_eq!(LogEventLevel::Information.to_string(), "Information");
        assert_eq!(LogEventLevel::Fatal.to_string(), "Fatal");
    }

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(LogEventLevel::Verbose < LogEventLevel::Debug);
        assert!(LogEventLevel::Error < LogEventLevel::Fatal);
    }
}
