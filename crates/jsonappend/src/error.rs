use std::io;
use std::sync::Arc;

use thiserror::Error;

/// Opaque error type returned by [`MarshalJson`](crate::value::MarshalJson) implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while encoding.
///
/// Opaque sources are reference counted so a [`JsonWriter`](crate::JsonWriter)
/// can hand out its latched error as often as it is asked for it.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// NaN and the infinities have no JSON representation.
    #[error("unsupported value: {}", non_finite_name(.0))]
    UnsupportedFloat(f64),

    /// RFC 3339 only allows four digit years.
    #[error("year outside of range [0,9999]: {0}")]
    YearOutOfRange(i32),

    /// Surfaced unchanged from an `AppendJson` or `MarshalJson` implementation.
    #[error(transparent)]
    Marshal(Arc<dyn std::error::Error + Send + Sync>),

    #[error("serde_json error: {0}")]
    SerdeJson(#[source] Arc<serde_json::Error>),

    #[error("I/O error: {0}")]
    Io(#[source] Arc<io::Error>),
}

impl Error {
    /// Wraps an arbitrary error raised by a caller-defined encoder.
    pub fn marshal<E: Into<BoxError>>(err: E) -> Self {
        Error::Marshal(Arc::from(err.into()))
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(Arc::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerdeJson(Arc::new(err))
    }
}

fn non_finite_name(value: &f64) -> &'static str {
    if value.is_nan() {
        "NaN"
    } else if value.is_sign_positive() {
        "+Inf"
    } else {
        "-Inf"
    }
}

pub type Result<T> = core::result::Result<T, Error>;
