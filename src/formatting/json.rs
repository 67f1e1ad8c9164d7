//! A compact JSON formatter for log events.
//!
//! Output is streamed straight into the sink: nothing is buffered, so a
//! failing sink leaves whatever fragment was already written.
//!
//! The escaping is deliberately minimal. Only `"` is escaped inside strings;
//! backslashes, control characters and non-ASCII text are written as-is, and
//! property names are written without any escaping. Sequences carry a comma
//! after every element, including the last (`[1,2,]`). Downstream readers
//! of this format depend on both behaviours.
//!
//! Date/times use the round-trip form with seven fractional digits. Every
//! offset-bearing value, the event `TimeStamp` as well as `DateTimeOffset`
//! scalars, renders a zero offset as `Z`, never `+00:00`; other offsets are
//! written `±hh:mm`, with `:ss` appended when the offset is not a whole
//! number of minutes.
use super::cursor::FieldCursor;
use super::TextFormatter;
use crate::error::FormatError;
use crate::events::{LogEvent, PropertyValue, ScalarValue, StructureValue, TYPE_TAG_PROPERTY};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Timelike};
use std::fmt::{self, Display};
use std::io::{self, Write};

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Writes log events as single JSON objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleJsonFormatter {
    omit_enclosing_object: bool,
}

impl SimpleJsonFormatter {
    /// Creates a formatter.
    ///
    /// # Arguments
    ///
    /// * `omit_enclosing_object` - Leave out the outer `{`/`}` so the fields
    ///   can be spliced into an object the caller is writing.
    pub fn new(omit_enclosing_object: bool) -> Self {
        Self {
            omit_enclosing_object,
        }
    }

    /// Whether the outer `{`/`}` is left out of formatted events.
    pub fn omits_enclosing_object(&self) -> bool {
        self.omit_enclosing_object
    }

    /// Writes `event` to `output`.
    ///
    /// Fields are written in a fixed order: `TimeStamp`, `Level`,
    /// `MessageTemplate`, `Exception` (only when present) and `Properties`
    /// (only when the event has any). No trailing newline is written.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::Io` as soon as the sink fails; the sink then
    /// holds a truncated fragment.
    pub fn format<W: Write + ?Sized>(&self, event: &LogEvent, output: &mut W) -> Result<(), FormatError> {
        if !self.omit_enclosing_object {
            output.write_all(b"{")?;
        }

        let mut cursor = FieldCursor::new();
        write_field_name(&mut cursor, "TimeStamp", output)?;
        write_date_time_offset(&event.timestamp(), output)?;
        write_field_name(&mut cursor, "Level", output)?;
        write_text(&event.level(), output)?;
        write_field_name(&mut cursor, "MessageTemplate", output)?;
        write_text(event.message_template(), output)?;

        if let Some(exception) = event.exception() {
            write_field_name(&mut cursor, "Exception", output)?;
            write_text(exception, output)?;
        }

        if event.has_properties() {
            write_field_name(&mut cursor, "Properties", output)?;
            output.write_all(b"{")?;
            let mut properties = FieldCursor::new();
            for property in event.properties() {
                write_property(&mut properties, &property.name, &property.value, output)?;
            }
            output.write_all(b"}")?;
        }

        if !self.omit_enclosing_object {
            output.write_all(b"}")?;
        }
        Ok(())
    }
}

impl TextFormatter for SimpleJsonFormatter {
    fn format(&self, event: &LogEvent, output: &mut dyn Write) -> Result<(), FormatError> {
        SimpleJsonFormatter::format(self, event, output)
    }
}

/// Writes one property value as a JSON literal, recursing into sequences
/// and structures.
pub fn write_literal<W: Write + ?Sized>(value: &PropertyValue, output: &mut W) -> io::Result<()> {
    match value {
        PropertyValue::Null => output.write_all(b"null"),
        PropertyValue::Scalar(scalar) => write_scalar(scalar, output),
        PropertyValue::Sequence(elements) => write_sequence(elements, output),
        PropertyValue::Structure(structure) => write_structure(structure, output),
    }
}

fn write_scalar<W: Write + ?Sized>(value: &ScalarValue, output: &mut W) -> io::Result<()> {
    match value {
        ScalarValue::I8(v) => write!(output, "{}", v),
        ScalarValue::I16(v) => write!(output, "{}", v),
        ScalarValue::I32(v) => write!(output, "{}", v),
        ScalarValue::I64(v) => write!(output, "{}", v),
        ScalarValue::I128(v) => write!(output, "{}", v),
        ScalarValue::U8(v) => write!(output, "{}", v),
        ScalarValue::U16(v) => write!(output, "{}", v),
        ScalarValue::U32(v) => write!(output, "{}", v),
        ScalarValue::U64(v) => write!(output, "{}", v),
        ScalarValue::U128(v) => write!(output, "{}", v),
        ScalarValue::F32(v) => write!(output, "{}", v),
        ScalarValue::F64(v) => write!(output, "{}", v),
        ScalarValue::Decimal(v) => write!(output, "{}", v),
        ScalarValue::String(v) => write_string(v, output),
        ScalarValue::DateTime(v) => write_date_time(v, output),
        ScalarValue::DateTimeOffset(v) => write_date_time_offset(v, output),
        ScalarValue::Other(v) => write_text(v, output),
    }
}

fn write_structure<W: Write + ?Sized>(structure: &StructureValue, output: &mut W) -> io::Result<()> {
    output.write_all(b"{")?;

    let mut cursor = FieldCursor::new();
    if let Some(type_tag) = &structure.type_tag {
        write_field_name(&mut cursor, TYPE_TAG_PROPERTY, output)?;
        write_string(type_tag, output)?;
    }
    for property in &structure.properties {
        write_property(&mut cursor, &property.name, &property.value, output)?;
    }

    output.write_all(b"}")
}

fn write_sequence<W: Write + ?Sized>(elements: &[PropertyValue], output: &mut W) -> io::Result<()> {
    output.write_all(b"[")?;
    for element in elements {
        write_literal(element, output)?;
        output.write_all(b",")?;
    }
    output.write_all(b"]")
}

fn write_property<W: Write + ?Sized>(
    cursor: &mut FieldCursor,
    name: &str,
    value: &PropertyValue,
    output: &mut W,
) -> io::Result<()> {
    write_field_name(cursor, name, output)?;
    write_literal(value, output)
}

fn write_field_name<W: Write + ?Sized>(cursor: &mut FieldCursor, name: &str, output: &mut W) -> io::Result<()> {
    cursor.advance(output)?;
    output.write_all(b"\"")?;
    output.write_all(name.as_bytes())?;
    output.write_all(b"\":")
}

fn write_string<W: Write + ?Sized>(value: &str, output: &mut W) -> io::Result<()> {
    output.write_all(b"\"")?;
    write_escaped(value, output)?;
    output.write_all(b"\"")
}

/// Writes the `Display` form of `value` as a quoted string without
/// materializing it first.
fn write_text<T: Display + ?Sized, W: Write + ?Sized>(value: &T, output: &mut W) -> io::Result<()> {
    output.write_all(b"\"")?;
    let mut adapter = EscapingAdapter {
        inner: &mut *output,
        error: None,
    };
    if fmt::write(&mut adapter, format_args!("{}", value)).is_err() {
        return Err(adapter
            .error
            .take()
            .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "value formatting failed")));
    }
    output.write_all(b"\"")
}

fn write_escaped<W: Write + ?Sized>(value: &str, output: &mut W) -> io::Result<()> {
    for (index, segment) in value.split('"').enumerate() {
        if index > 0 {
            output.write_all(b"\\\"")?;
        }
        output.write_all(segment.as_bytes())?;
    }
    Ok(())
}

/// Bridges `Display` output into an `io::Write`, escaping quotes on the way.
struct EscapingAdapter<'a, W: ?Sized> {
    inner: &'a mut W,
    error: Option<io::Error>,
}

impl<W: Write + ?Sized> fmt::Write for EscapingAdapter<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        write_escaped(s, self.inner).map_err(|err| {
            self.error = Some(err);
            fmt::Error
        })
    }
}

// Round-trip form with seven fractional digits, as in 2015-01-01T00:00:00.0000000.
fn write_date_time<W: Write + ?Sized>(value: &NaiveDateTime, output: &mut W) -> io::Result<()> {
    write!(
        output,
        "\"{}.{:07}\"",
        value.format(DATE_TIME_FORMAT),
        fraction_ticks(value.nanosecond())
    )
}

fn write_date_time_offset<W: Write + ?Sized>(value: &DateTime<FixedOffset>, output: &mut W) -> io::Result<()> {
    let local = value.naive_local();
    write!(
        output,
        "\"{}.{:07}",
        local.format(DATE_TIME_FORMAT),
        fraction_ticks(local.nanosecond())
    )?;

    let offset = value.offset().local_minus_utc();
    if offset == 0 {
        return output.write_all(b"Z\"");
    }
    let sign = if offset < 0 { '-' } else { '+' };
    let offset = offset.unsigned_abs();
    write!(output, "{}{:02}:{:02}", sign, offset / 3600, offset % 3600 / 60)?;
    // Sub-minute offsets keep their seconds so the instant survives a re-parse.
    if offset % 60 != 0 {
        write!(output, ":{:02}", offset % 60)?;
    }
    output.write_all(b"\"")
}

// 100ns ticks; leap-second nanos (>= 1s) fold back into the same second.
fn fraction_ticks(nanos: u32) -> u32 {
    nanos % 1_000_000_000 / 100
}
