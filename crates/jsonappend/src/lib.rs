#![doc = include_str!("../README.md")]

pub mod error;
pub mod options;
pub mod encode;
pub mod number;
pub mod ser;
pub mod value;

pub use crate::encode::encoders::{append_array, append_object, append_value};
pub use crate::encode::primitives::{
    append_bool, append_field_name, append_i64, append_null, append_u64,
};
pub use crate::encode::string::{append_bytes_str, append_str};
pub use crate::encode::time::append_time;
pub use crate::encode::writer::JsonWriter;
pub use crate::error::{BoxError, Error, Result};
pub use crate::number::{append_f32, append_f64};
pub use crate::options::WriterOptions;
pub use crate::value::{AppendJson, MarshalJson, Reflective, Value};
