//! Serde encoding through the crate's escaping and number formatting.
//!
//! This is the generic path for values of unknown shape. Its output matches
//! the append functions for every type they cover.

use std::io;

use serde::Serialize;
use serde_json::ser::{CharEscape, Formatter};

use crate::{Result, encode::string, number};

/// A compact `serde_json` formatter producing HTML-safe strings and
/// ECMAScript-style floats.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSafeFormatter;

impl Formatter for HtmlSafeFormatter {
    fn write_f32<W>(&mut self, writer: &mut W, value: f32) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut tmp = Vec::with_capacity(24);
        number::append_f32(&mut tmp, value).map_err(io::Error::other)?;
        writer.write_all(&tmp)
    }

    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut tmp = Vec::with_capacity(24);
        number::append_f64(&mut tmp, value).map_err(io::Error::other)?;
        writer.write_all(&tmp)
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        string::escape_with(fragment, |part| writer.write_all(part))
    }

    fn write_char_escape<W>(&mut self, writer: &mut W, char_escape: CharEscape) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let control = match char_escape {
            CharEscape::Quote => return writer.write_all(b"\\\""),
            CharEscape::ReverseSolidus => return writer.write_all(b"\\\\"),
            CharEscape::Solidus => return writer.write_all(b"\\/"),
            CharEscape::LineFeed => return writer.write_all(b"\\n"),
            CharEscape::CarriageReturn => return writer.write_all(b"\\r"),
            CharEscape::Tab => return writer.write_all(b"\\t"),
            CharEscape::Backspace => 0x08,
            CharEscape::FormFeed => 0x0C,
            CharEscape::AsciiControl(byte) => byte,
        };
        static HEX_DIGITS: [u8; 16] = *b"0123456789abcdef";
        writer.write_all(&[
            b'\\',
            b'u',
            b'0',
            b'0',
            HEX_DIGITS[(control >> 4) as usize],
            HEX_DIGITS[(control & 0xF) as usize],
        ])
    }
}

/// Serializes `value` straight into `buf`.
///
/// On error `buf` is truncated back to its original length.
pub fn append_serialize<T: Serialize + ?Sized>(buf: &mut Vec<u8>, value: &T) -> Result<()> {
    let start = buf.len();
    let mut ser = serde_json::Serializer::with_formatter(&mut *buf, HtmlSafeFormatter);
    if let Err(err) = value.serialize(&mut ser) {
        buf.truncate(start);
        return Err(err.into());
    }
    Ok(())
}

pub fn to_vec<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(128);
    append_serialize(&mut buf, value)?;
    Ok(buf)
}

pub fn to_writer<W: io::Write, T: Serialize + ?Sized>(writer: W, value: &T) -> Result<()> {
    let mut ser = serde_json::Serializer::with_formatter(writer, HtmlSafeFormatter);
    value.serialize(&mut ser)?;
    Ok(())
}
