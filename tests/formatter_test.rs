//! Output-shape tests for the JSON formatter through the public API.

use chrono::{FixedOffset, TimeZone, Utc};
use serde_json::json;
use simple_json_log::events::{Decimal, MessageTemplate};
use simple_json_log::{
    LogEvent, LogEventLevel, LogEventProperty, PropertyValue, SimpleJsonFormatter, StructureValue, TextFormatter,
};

fn format(event: &LogEvent) -> String {
    let mut out = Vec::new();
    SimpleJsonFormatter::default().format(event, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn sequence_free_events_are_valid_json() {
    let timestamp = FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(2022, 3, 4, 5, 6, 7)
        .unwrap();
    let event = LogEvent::new(
        timestamp,
        LogEventLevel::Warning,
        None,
        MessageTemplate::new("Disk {Drive} at {Pct}%"),
        [
            LogEventProperty::new("Drive", "C"),
            LogEventProperty::new("Pct", Decimal::new(935, 1)),
            LogEventProperty::new(
                "Host",
                StructureValue::new(Some("Machine".into()), Vec::new()).with_property("Name", "srv-1"),
            ),
        ],
    );

    let text = format(&event);
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(
        parsed,
        json!({
            "TimeStamp": "2022-03-04T05:06:07.0000000+02:00",
            "Level": "Warning",
            "MessageTemplate": "Disk {Drive} at {Pct}%",
            "Properties": {
                "Drive": "C",
                "Pct": 93.5,
                "Host": {"$typeTag": "Machine", "Name": "srv-1"}
            }
        })
    );
}

#[test]
fn literal_values_through_the_trait_object() {
    let event = LogEvent::new(
        Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap().fixed_offset(),
        LogEventLevel::Verbose,
        None,
        "seq",
        [LogEventProperty::new(
            "Items",
            vec![PropertyValue::from(1), PropertyValue::from(2)],
        )],
    );
    let formatter: &dyn TextFormatter = &SimpleJsonFormatter::default();
    let mut out = Vec::new();
    formatter.format(&event, &mut out).unwrap();
    assert!(String::from_utf8(out).unwrap().ends_with(r#""Properties":{"Items":[1,2,]}}"#));
}
