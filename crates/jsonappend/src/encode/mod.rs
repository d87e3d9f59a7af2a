//! Append-style encoders.
//!
//! Every function appends to a caller-owned `Vec<u8>`. Scalar encoders that
//! can fail leave the buffer untouched when they do.

pub mod encoders;
pub mod primitives;
pub mod string;
pub mod time;
pub mod writer;
