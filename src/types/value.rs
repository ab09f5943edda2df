//! Values bound into prepared statements.

use bytes::Bytes;
use chrono::NaiveDateTime;
use std::fmt;

/// A value destined for a bind placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    /// NULL value.
    Null,
    /// Signed integer.
    Integer(i64),
    /// Boolean (Oracle 23ai BOOLEAN, or NUMBER(1) on older servers).
    Boolean(bool),
    /// Floating point number. Bound as text to keep Oracle NUMBER precision.
    Float(f64),
    /// Character data (VARCHAR2, CHAR, etc.).
    String(String),
    /// Binary data, bound as a BLOB.
    Bytes(Bytes),
    /// Date/time value (DATE type).
    Timestamp(NaiveDateTime),
}

impl BindValue {
    /// Check if the value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, BindValue::Null)
    }

    /// Whether the value is an integer.
    pub fn is_integer(&self) -> bool {
        matches!(self, BindValue::Integer(_))
    }

    /// Whether the value can stand for a boolean: a real boolean, or the
    /// integers 0 and 1.
    pub fn is_boolean_like(&self) -> bool {
        matches!(self, BindValue::Boolean(_) | BindValue::Integer(0 | 1))
    }

    /// Whether the value is binary large-object data.
    pub fn is_lob(&self) -> bool {
        matches!(self, BindValue::Bytes(_))
    }

    /// Try to get the value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            BindValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for BindValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindValue::Null => write!(f, "NULL"),
            BindValue::Integer(n) => write!(f, "{}", n),
            BindValue::Boolean(b) => write!(f, "{}", b),
            BindValue::Float(x) => write!(f, "{}", x),
            BindValue::String(s) => write!(f, "{}", s),
            BindValue::Bytes(b) => write!(f, "<BLOB: {} bytes>", b.len()),
            BindValue::Timestamp(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for BindValue {
                fn from(value: $ty) -> Self {
                    BindValue::Integer(i64::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for BindValue {
    fn from(value: bool) -> Self {
        BindValue::Boolean(value)
    }
}

impl From<f32> for BindValue {
    fn from(value: f32) -> Self {
        BindValue::Float(f64::from(value))
    }
}

impl From<f64> for BindValue {
    fn from(value: f64) -> Self {
        BindValue::Float(value)
    }
}

impl From<&str> for BindValue {
    fn from(value: &str) -> Self {
        BindValue::String(value.to_string())
    }
}

impl From<String> for BindValue {
    fn from(value: String) -> Self {
        BindValue::String(value)
    }
}

impl From<Vec<u8>> for BindValue {
    fn from(value: Vec<u8>) -> Self {
        BindValue::Bytes(Bytes::from(value))
    }
}

impl From<&[u8]> for BindValue {
    fn from(value: &[u8]) -> Self {
        BindValue::Bytes(Bytes::copy_from_slice(value))
    }
}

impl From<Bytes> for BindValue {
    fn from(value: Bytes) -> Self {
        BindValue::Bytes(value)
    }
}

impl From<NaiveDateTime> for BindValue {
    fn from(value: NaiveDateTime) -> Self {
        BindValue::Timestamp(value)
    }
}

impl<T: Into<BindValue>> From<Option<T>> for BindValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(BindValue::Null, Into::into)
    }
}
