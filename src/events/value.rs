//! The recursive value type carried by event properties.
//!
//! A `PropertyValue` is tree-shaped: sequences and structures own their
//! children, so values can nest to any depth but never form cycles.
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Member name that carries a structure's type tag in JSON form.
pub const TYPE_TAG_PROPERTY: &str = "$typeTag";

/// A fixed-point decimal number stored as `mantissa * 10^-scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decimal {
    mantissa: i128,
    scale: u8,
}

impl Decimal {
    pub fn new(mantissa: i128, scale: u8) -> Self {
        Self { mantissa, scale }
    }

    pub fn mantissa(&self) -> i128 {
        self.mantissa
    }

    pub fn scale(&self) -> u8 {
        self.scale
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self::new(value as i128, 0)
    }
}

impl fmt::Display for Decimal {
    /// Renders with exactly `scale` fractional digits, trailing zeros kept.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.mantissa);
        }

        let scale = self.scale as usize;
        let digits = self.mantissa.unsigned_abs().to_string();
        let digits = if digits.len() <= scale {
            format!("{:0>width$}", digits, width = scale + 1)
        } else {
            digits
        };
        let (whole, fraction) = digits.split_at(digits.len() - scale);

        if self.mantissa < 0 {
            f.write_str("-")?;
        }
        write!(f, "{}.{}", whole, fraction)
    }
}

/// A single primitive value.
///
/// `Other` is the fallback for scalar kinds without a dedicated variant; it
/// is rendered through its `Display` implementation.
#[derive(Clone)]
pub enum ScalarValue {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
    String(String),
    /// A date/time without offset information.
    DateTime(NaiveDateTime),
    DateTimeOffset(DateTime<FixedOffset>),
    Other(Arc<dyn fmt::Display + Send + Sync>),
}

impl ScalarValue {
    /// Wraps any displayable value that has no dedicated variant.
    pub fn other<T>(value: T) -> Self
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        ScalarValue::Other(Arc::new(value))
    }
}

impl fmt::Debug for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::I8(v) => f.debug_tuple("I8").field(v).finish(),
            ScalarValue::I16(v) => f.debug_tuple("I16").field(v).finish(),
            ScalarValue::I32(v) => f.debug_tuple("I32").field(v).finish(),
            ScalarValue::I64(v) => f.debug_tuple("I64").field(v).finish(),
            ScalarValue::I128(v) => f.debug_tuple("I128").field(v).finish(),
            ScalarValue::U8(v) => f.debug_tuple("U8").field(v).finish(),
            ScalarValue::U16(v) => f.debug_tuple("U16").field(v).finish(),
            ScalarValue::U32(v) => f.debug_tuple("U32").field(v).finish(),
            ScalarValue::U64(v) => f.debug_tuple("U64").field(v).finish(),
            ScalarValue::U128(v) => f.debug_tuple("U128").field(v).finish(),
            ScalarValue::F32(v) => f.debug_tuple("F32").field(v).finish(),
            ScalarValue::F64(v) => f.debug_tuple("F64").field(v).finish(),
            ScalarValue::Decimal(v) => f.debug_tuple("Decimal").field(v).finish(),
            ScalarValue::String(v) => f.debug_tuple("String").field(v).finish(),
            ScalarValue::DateTime(v) => f.debug_tuple("DateTime").field(v).finish(),
            ScalarValue::DateTimeOffset(v) => f.debug_tuple("DateTimeOffset").field(v).finish(),
            ScalarValue::Other(v) => f.debug_tuple("Other").field(&v.to_string()).finish(),
        }
    }
}

/// A named property, either on an event or inside a structure.
#[derive(Debug, Clone)]
pub struct LogEventProperty {
    pub name: String,
    pub value: PropertyValue,
}

impl LogEventProperty {
    pub fn new(name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A keyed structure with an optional type tag.
#[derive(Debug, Clone, Default)]
pub struct StructureValue {
    pub type_tag: Option<String>,
    pub properties: Vec<LogEventProperty>,
}

impl StructureValue {
    pub fn new(type_tag: Option<String>, properties: Vec<LogEventProperty>) -> Self {
        Self {
            type_tag,
            properties,
        }
    }

    /// Builder-style helper that appends one property.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.push(LogEventProperty::new(name, value));
        self
    }
}

/// The value of a property.
#[derive(Debug, Clone)]
pub enum PropertyValue {
    Null,
    Scalar(ScalarValue),
    Sequence(Vec<PropertyValue>),
    Structure(StructureValue),
}

impl PropertyValue {
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }
}

macro_rules! scalar_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for ScalarValue {
                fn from(value: $ty) -> Self {
                    ScalarValue::$variant(value)
                }
            }

            impl From<$ty> for PropertyValue {
                fn from(value: $ty) -> Self {
                    PropertyValue::Scalar(ScalarValue::$variant(value))
                }
            }
        )*
    };
}

scalar_from! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    f32 => F32,
    f64 => F64,
    Decimal => Decimal,
    String => String,
    NaiveDateTime => DateTime,
    DateTime<FixedOffset> => DateTimeOffset,
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Scalar(ScalarValue::String(value.to_string()))
    }
}

impl From<DateTime<Utc>> for PropertyValue {
    fn from(value: DateTime<Utc>) -> Self {
        PropertyValue::Scalar(ScalarValue::DateTimeOffset(value.fixed_offset()))
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Scalar(ScalarValue::other(value))
    }
}

impl From<char> for PropertyValue {
    fn from(value: char) -> Self {
        PropertyValue::Scalar(ScalarValue::other(value))
    }
}

impl From<ScalarValue> for PropertyValue {
    fn from(value: ScalarValue) -> Self {
        PropertyValue::Scalar(value)
    }
}

impl From<StructureValue> for PropertyValue {
    fn from(value: StructureValue) -> Self {
        PropertyValue::Structure(value)
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(elements: Vec<PropertyValue>) -> Self {
        PropertyValue::Sequence(elements)
    }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(PropertyValue::Null, Into::into)
    }
}

impl From<Value> for PropertyValue {
    /// Converts parsed JSON into a property value.
    ///
    /// Objects become structures; a string `$typeTag` member is lifted into
    /// the structure's type tag instead of becoming a property.
    fn from(value: Value) -> Self {
        match value {
            Value::Null => PropertyValue::Null,
            Value::Bool(b) => b.into(),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i.into()
                } else if let Some(u) = n.as_u64() {
                    u.into()
                } else if let Some(f) = n.as_f64() {
                    f.into()
                } else {
                    PropertyValue::Scalar(ScalarValue::other(n))
                }
            }
            Value::String(s) => s.into(),
            Value::Array(elements) => {
                PropertyValue::Sequence(elements.into_iter().map(PropertyValue::from).collect())
            }
            Value::Object(members) => {
                let mut type_tag = None;
                let mut properties = Vec::with_capacity(members.len());
                for (name, value) in members {
                    match value {
                        Value::String(tag) if name == TYPE_TAG_PROPERTY && type_tag.is_none() => {
                            type_tag = Some(tag)
                        }
                        value => properties.push(LogEventProperty::new(name, value)),
                    }
                }
                PropertyValue::Structure(StructureValue::new(type_tag, properties))
            }
        }
    }
}
