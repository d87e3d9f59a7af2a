//! Reference encoder and generators shared by the integration tests.
//!
//! The reference is `serde_json` driven by a formatter written independently
//! of the crate: char-by-char escaping and std float formatting.
#![allow(dead_code)]

use std::io::{self, Write};

use chrono::{DateTime, Datelike, FixedOffset, SecondsFormat};
use quickcheck::{Arbitrary, Gen};
use serde::Serialize;
use serde_json::ser::{CharEscape, Formatter};

pub const TESTS: u64 = 2_000;

pub struct ReferenceFormatter;

impl Formatter for ReferenceFormatter {
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let text = reference_float(value).ok_or_else(|| io::Error::other("non-finite"))?;
        writer.write_all(text.as_bytes())
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        for ch in fragment.chars() {
            match ch {
                '<' | '>' | '&' | '\u{2028}' | '\u{2029}' => {
                    write!(writer, "\\u{:04x}", ch as u32)?;
                }
                _ => {
                    let mut tmp = [0u8; 4];
                    writer.write_all(ch.encode_utf8(&mut tmp).as_bytes())?;
                }
            }
        }
        Ok(())
    }

    fn write_char_escape<W>(&mut self, writer: &mut W, char_escape: CharEscape) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        match char_escape {
            CharEscape::Quote => writer.write_all(b"\\\""),
            CharEscape::ReverseSolidus => writer.write_all(b"\\\\"),
            CharEscape::Solidus => writer.write_all(b"\\/"),
            CharEscape::LineFeed => writer.write_all(b"\\n"),
            CharEscape::CarriageReturn => writer.write_all(b"\\r"),
            CharEscape::Tab => writer.write_all(b"\\t"),
            CharEscape::Backspace => write!(writer, "\\u{:04x}", 0x08),
            CharEscape::FormFeed => write!(writer, "\\u{:04x}", 0x0c),
            CharEscape::AsciiControl(byte) => write!(writer, "\\u{:04x}", byte),
        }
    }
}

pub fn reference<T: Serialize + ?Sized>(value: &T) -> String {
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, ReferenceFormatter);
    value.serialize(&mut ser).expect("reference encoding");
    String::from_utf8(out).expect("reference output is utf-8")
}

/// ECMAScript number-to-string, or `None` where JSON has no representation.
pub fn reference_float(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    let abs = value.abs();
    if abs != 0.0 && (abs < 1e-6 || abs >= 1e21) {
        let text = format!("{value:e}");
        let (mantissa, exp) = text.split_once('e').expect("exponent present");
        if exp.starts_with('-') {
            Some(format!("{mantissa}e{exp}"))
        } else {
            Some(format!("{mantissa}e+{exp}"))
        }
    } else {
        Some(format!("{value}"))
    }
}

/// Quoted string for arbitrary bytes: one replacement escape per bad byte.
pub fn reference_bytes_str(mut bytes: &[u8]) -> String {
    let mut out = String::from("\"");
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                push_unquoted(&mut out, valid);
                break;
            }
            Err(err) => {
                let (valid, rest) = bytes.split_at(err.valid_up_to());
                push_unquoted(&mut out, std::str::from_utf8(valid).expect("validated prefix"));
                let bad = err.error_len().unwrap_or(rest.len());
                for _ in 0..bad {
                    out.push_str("\\ufffd");
                }
                bytes = &rest[bad..];
            }
        }
    }
    out.push('"');
    out
}

fn push_unquoted(out: &mut String, s: &str) {
    let quoted = reference(s);
    out.push_str(&quoted[1..quoted.len() - 1]);
}

/// RFC 3339 with trimmed nanoseconds, or `None` for years that need more
/// than four digits.
pub fn reference_time(t: &DateTime<FixedOffset>) -> Option<String> {
    if !(0..=9999).contains(&t.year()) {
        return None;
    }
    let full = t.to_rfc3339_opts(SecondsFormat::Nanos, true);
    // Fraction starts after "YYYY-MM-DDTHH:MM:SS".
    let (head, tail) = full.split_at(19);
    let frac = &tail[1..10];
    let zone = &tail[10..];
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        Some(format!("\"{head}{zone}\""))
    } else {
        Some(format!("\"{head}.{frac}{zone}\""))
    }
}

pub fn with_prefix(prefix: &[u8], tail: &str) -> Vec<u8> {
    let mut out = prefix.to_vec();
    out.extend_from_slice(tail.as_bytes());
    out
}

/// Compares parsed documents, treating numbers by value rather than by
/// integer/float representation.
pub fn json_eq(a: &serde_json::Value, b: &serde_json::Value) -> bool {
    use serde_json::Value as J;
    match (a, b) {
        (J::Number(x), J::Number(y)) => match (x.as_i64(), y.as_i64(), x.as_u64(), y.as_u64()) {
            (Some(x), Some(y), _, _) => x == y,
            (_, _, Some(x), Some(y)) => x == y,
            _ => x.as_f64() == y.as_f64(),
        },
        (J::Array(x), J::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(x, y)| json_eq(x, y))
        }
        (J::Object(x), J::Object(y)) => {
            x.len() == y.len()
                && x.iter().all(|(k, v)| y.get(k).is_some_and(|w| json_eq(v, w)))
        }
        _ => a == b,
    }
}

const TRICKY: &[char] = &[
    '<', '>', '&', '"', '\\', '/', '\n', '\r', '\t', '\u{0}', '\u{1}', '\u{8}', '\u{c}', '\u{1f}',
    '\u{7f}', '\u{80}', '\u{2028}', '\u{2029}', '\u{fffd}', '\u{e9}', '\u{1f600}', ' ', 'a', 'Z',
];

/// Text biased towards characters with special escaping rules.
#[derive(Debug, Clone)]
pub struct Text(pub String);

impl Arbitrary for Text {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % (g.size() + 1);
        let mut s = String::with_capacity(len);
        for _ in 0..len {
            if bool::arbitrary(g) {
                s.push(*g.choose(TRICKY).expect("non-empty"));
            } else {
                s.push(char::arbitrary(g));
            }
        }
        Text(s)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Text))
    }
}

const BYTE_RUNS: &[&[u8]] = &[
    b"\xE2\x80\xA8",
    b"\xE2\x80\xA9",
    b"\xE2\x80",
    b"\xED\xA0\x80",
    b"\xF0\x9F\x98",
    b"\xF0\x9F\x98\x80",
    b"\xC0\x80",
    b"\xFF",
    b"\x80",
    b"<&>",
    b"\x00\x1f",
];

/// Raw bytes mixing valid text, truncated sequences and encoded surrogates.
#[derive(Debug, Clone)]
pub struct Bytes(pub Vec<u8>);

impl Arbitrary for Bytes {
    fn arbitrary(g: &mut Gen) -> Self {
        let parts = usize::arbitrary(g) % 8;
        let mut out = Vec::new();
        for _ in 0..parts {
            match u8::arbitrary(g) % 3 {
                0 => out.extend_from_slice(g.choose(BYTE_RUNS).expect("non-empty")),
                1 => out.extend_from_slice(Text::arbitrary(g).0.as_bytes()),
                _ => out.extend(Vec::<u8>::arbitrary(g)),
            }
        }
        Bytes(out)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Bytes))
    }
}

/// Any f64 bit pattern, including subnormals, NaNs and infinities.
#[derive(Debug, Clone, Copy)]
pub struct Bits(pub f64);

impl Arbitrary for Bits {
    fn arbitrary(g: &mut Gen) -> Self {
        const EDGES: &[f64] = &[
            0.0,
            -0.0,
            1e-6,
            9.999999999999999e-7,
            1e21,
            9.999999999999999e20,
            5e-7,
            f64::MIN_POSITIVE,
            5e-324,
            f64::MAX,
            f64::MIN,
            f64::EPSILON,
            f64::NAN,
            f64::INFINITY,
            f64::NEG_INFINITY,
        ];
        match u8::arbitrary(g) % 4 {
            0 => Bits(*g.choose(EDGES).expect("non-empty")),
            1 => Bits(f64::arbitrary(g)),
            _ => Bits(f64::from_bits(u64::arbitrary(g))),
        }
    }
}

const YEAR_ZERO: i64 = -62_167_219_200;
const YEAR_TEN_THOUSAND: i64 = 253_402_300_800;
const YEAR_SECS: i64 = 31_556_952;

/// Timestamps spanning a little beyond the four digit year range, with
/// whole-minute offsets.
#[derive(Debug, Clone)]
pub struct Stamp(pub DateTime<FixedOffset>);

impl Arbitrary for Stamp {
    fn arbitrary(g: &mut Gen) -> Self {
        let lo = YEAR_ZERO - 20 * YEAR_SECS;
        let hi = YEAR_TEN_THOUSAND + 20 * YEAR_SECS;
        let secs = match u8::arbitrary(g) % 6 {
            0 => *g
                .choose(&[YEAR_ZERO, YEAR_ZERO - 1, YEAR_TEN_THOUSAND, YEAR_TEN_THOUSAND - 1, 0])
                .expect("non-empty"),
            _ => lo + i64::arbitrary(g).rem_euclid(hi - lo),
        };
        let nanos = match u8::arbitrary(g) % 4 {
            0 => 0,
            1 => (u32::arbitrary(g) % 1_000) * 1_000_000,
            _ => u32::arbitrary(g) % 1_000_000_000,
        };
        let offset_minutes = match u8::arbitrary(g) % 3 {
            0 => 0,
            _ => i32::arbitrary(g).rem_euclid(28 * 60 + 1) - 14 * 60,
        };
        let offset = FixedOffset::east_opt(offset_minutes * 60).expect("offset in range");
        let utc = DateTime::from_timestamp(secs, nanos).expect("timestamp in range");
        Stamp(utc.with_timezone(&offset))
    }
}

/// Finite-number JSON documents of bounded depth.
#[derive(Debug, Clone)]
pub struct Doc(pub serde_json::Value);

impl Arbitrary for Doc {
    fn arbitrary(g: &mut Gen) -> Self {
        fn gen_val(g: &mut Gen, depth: usize) -> serde_json::Value {
            use serde_json::Value as J;
            let kinds = if depth == 0 { 6 } else { 8 };
            match usize::arbitrary(g) % kinds {
                0 => J::Null,
                1 => J::Bool(bool::arbitrary(g)),
                2 => J::from(i64::arbitrary(g)),
                3 => J::from(u64::arbitrary(g)),
                4 => {
                    let mut v = Bits::arbitrary(g).0;
                    while !v.is_finite() {
                        v = Bits::arbitrary(g).0;
                    }
                    J::from(v)
                }
                5 => J::String(Text::arbitrary(g).0),
                6 => {
                    let len = usize::arbitrary(g) % 4;
                    J::Array((0..len).map(|_| gen_val(g, depth - 1)).collect())
                }
                _ => {
                    let len = usize::arbitrary(g) % 4;
                    let mut map = serde_json::Map::new();
                    for _ in 0..len {
                        map.insert(Text::arbitrary(g).0, gen_val(g, depth - 1));
                    }
                    J::Object(map)
                }
            }
        }

        let depth = usize::arbitrary(g) % 3;
        Doc(gen_val(g, depth))
    }
}

/// A sink that fails every write after `budget` bytes.
pub struct FailingSink {
    pub written: Vec<u8>,
    pub budget: usize,
    pub flushes: usize,
}

impl FailingSink {
    pub fn new(budget: usize) -> Self {
        FailingSink {
            written: Vec::new(),
            budget,
            flushes: 0,
        }
    }
}

impl Write for FailingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written.len() + buf.len() > self.budget {
            return Err(io::Error::new(io::ErrorKind::WriteZero, "sink full"));
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}
