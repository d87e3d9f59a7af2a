//! Dynamically typed values accepted by [`append_value`](crate::append_value).

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, TimeZone};
use serde::Serialize;

use crate::error::{BoxError, Result};

/// A type that appends its own JSON representation.
///
/// Implementations must append a single complete JSON value.
pub trait AppendJson {
    fn append_json(&self, buf: &mut Vec<u8>) -> Result<()>;
}

/// A type that renders itself to a complete JSON document.
///
/// The bytes are appended verbatim; they are not validated.
pub trait MarshalJson {
    fn marshal_json(&self) -> core::result::Result<Vec<u8>, BoxError>;
}

/// Anything serde can serialize. Encoded through
/// [`append_serialize`](crate::ser::append_serialize).
pub trait Reflective {
    fn append_reflect(&self, buf: &mut Vec<u8>) -> Result<()>;
}

impl<T: Serialize + ?Sized> Reflective for T {
    fn append_reflect(&self, buf: &mut Vec<u8>) -> Result<()> {
        crate::ser::append_serialize(buf, self)
    }
}

pub enum Value {
    Null,
    Bool(bool),
    String(String),
    F64(f64),
    I64(i64),
    U64(u64),
    Time(DateTime<FixedOffset>),
    /// Keys come out in the map's iteration order, which is unspecified.
    Object(HashMap<String, Value>),
    Array(Vec<Value>),
    Appender(Box<dyn AppendJson>),
    Marshaler(Box<dyn MarshalJson>),
    Reflect(Box<dyn Reflective>),
}

impl Value {
    pub fn appender<T: AppendJson + 'static>(v: T) -> Self {
        Value::Appender(Box::new(v))
    }

    pub fn marshaler<T: MarshalJson + 'static>(v: T) -> Self {
        Value::Marshaler(Box::new(v))
    }

    /// Wraps a value of any other shape; it is encoded with serde.
    ///
    /// Unlike [`Value::F64`], NaN and the infinities inside `v` do not fail:
    /// serde_json writes them as `null`.
    pub fn reflect<T: Serialize + 'static>(v: T) -> Self {
        Value::Reflect(Box::new(v))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Value::Null
                | Value::Bool(_)
                | Value::String(_)
                | Value::F64(_)
                | Value::I64(_)
                | Value::U64(_)
                | Value::Time(_)
        )
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::F64(n) => f.debug_tuple("F64").field(n).finish(),
            Value::I64(n) => f.debug_tuple("I64").field(n).finish(),
            Value::U64(n) => f.debug_tuple("U64").field(n).finish(),
            Value::Time(t) => f.debug_tuple("Time").field(t).finish(),
            Value::Object(m) => f.debug_tuple("Object").field(m).finish(),
            Value::Array(a) => f.debug_tuple("Array").field(a).finish(),
            Value::Appender(_) => f.write_str("Appender(..)"),
            Value::Marshaler(_) => f.write_str("Marshaler(..)"),
            Value::Reflect(_) => f.write_str("Reflect(..)"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::F64(n)
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::I64(n as i64)
            }
        }
    )*};
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::U64(n as u64)
            }
        }
    )*};
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(t: DateTime<Tz>) -> Self {
        Value::Time(t.fixed_offset())
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(m: HashMap<String, Value>) -> Self {
        Value::Object(m)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::I64(i)
                } else if let Some(u) = n.as_u64() {
                    Value::U64(u)
                } else {
                    Value::F64(n.as_f64().unwrap_or_default())
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(a) => Value::Array(a.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(m) => {
                Value::Object(m.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
