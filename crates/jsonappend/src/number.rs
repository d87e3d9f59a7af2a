//! Float formatting.
//!
//! Output follows the ECMAScript number-to-string layout that most JSON
//! generators use: shortest round-trip digits, fixed notation for magnitudes
//! in `[1e-6, 1e21)`, exponential notation otherwise, and exponents that are
//! never zero padded (`5e-7`, `1e+21`).

use crate::error::{Error, Result};

// Shortest f64 digits never exceed 17; f32 needs 9.
const MAX_DIGITS: usize = 20;

/// Appends `value` as a JSON number.
///
/// NaN and the infinities fail with [`Error::UnsupportedFloat`] and leave
/// `buf` untouched.
pub fn append_f64(buf: &mut Vec<u8>, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::UnsupportedFloat(value));
    }
    let abs = value.abs();
    let exponential = abs != 0.0 && (abs < 1e-6 || abs >= 1e21);
    append_finite(buf, value, exponential);
    Ok(())
}

/// Like [`append_f64`], using 32-bit shortest digits and 32-bit thresholds.
pub fn append_f32(buf: &mut Vec<u8>, value: f32) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::UnsupportedFloat(f64::from(value)));
    }
    let abs = value.abs();
    let exponential = abs != 0.0 && (abs < 1e-6 || abs >= 1e21);
    append_finite(buf, value, exponential);
    Ok(())
}

fn append_finite<F: ryu::Float>(buf: &mut Vec<u8>, value: F, exponential: bool) {
    let mut fmt = ryu::Buffer::new();
    let decimal = Decimal::parse(fmt.format_finite(value));
    if exponential {
        decimal.write_exponential(buf);
    } else {
        decimal.write_fixed(buf);
    }
}

/// Shortest digits of a finite float: `0.d1d2..dn * 10^point`.
///
/// `len == 0` means the value is zero. Digits carry no leading or trailing
/// zeros.
struct Decimal {
    negative: bool,
    digits: [u8; MAX_DIGITS],
    len: usize,
    point: i32,
}

impl Decimal {
    /// Reads the layout ryu produces: `-?d+(.d+)?(e-?d+)?`.
    fn parse(raw: &str) -> Self {
        let bytes = raw.as_bytes();
        let (negative, rest) = match bytes.split_first() {
            Some((b'-', rest)) => (true, rest),
            _ => (false, bytes),
        };
        let (mantissa, exp) = match rest.iter().position(|&b| b == b'e' || b == b'E') {
            Some(idx) => (&rest[..idx], parse_exponent(&rest[idx + 1..])),
            None => (rest, 0),
        };

        let mut digits = [0u8; MAX_DIGITS];
        let mut len = 0usize;
        let mut int_digits = 0i32;
        let mut seen_point = false;
        let mut leading_zeros = 0i32;
        for &b in mantissa {
            if b == b'.' {
                seen_point = true;
                continue;
            }
            if !seen_point {
                int_digits += 1;
            }
            if len == 0 && b == b'0' {
                leading_zeros += 1;
                continue;
            }
            if len < MAX_DIGITS {
                digits[len] = b;
                len += 1;
            }
        }
        while len > 0 && digits[len - 1] == b'0' {
            len -= 1;
        }

        Decimal {
            negative,
            digits,
            len,
            point: int_digits + exp - leading_zeros,
        }
    }

    fn digits(&self) -> &[u8] {
        &self.digits[..self.len]
    }

    fn write_fixed(&self, buf: &mut Vec<u8>) {
        if self.negative {
            buf.push(b'-');
        }
        let digits = self.digits();
        if digits.is_empty() {
            buf.push(b'0');
            return;
        }
        if self.point <= 0 {
            buf.extend_from_slice(b"0.");
            push_zeros(buf, self.point.unsigned_abs() as usize);
            buf.extend_from_slice(digits);
        } else {
            let point = self.point as usize;
            if point >= digits.len() {
                buf.extend_from_slice(digits);
                push_zeros(buf, point - digits.len());
            } else {
                buf.extend_from_slice(&digits[..point]);
                buf.push(b'.');
                buf.extend_from_slice(&digits[point..]);
            }
        }
    }

    fn write_exponential(&self, buf: &mut Vec<u8>) {
        if self.negative {
            buf.push(b'-');
        }
        let digits = self.digits();
        let Some((first, rest)) = digits.split_first() else {
            buf.push(b'0');
            return;
        };
        buf.push(*first);
        if !rest.is_empty() {
            buf.push(b'.');
            buf.extend_from_slice(rest);
        }
        let exp = self.point - 1;
        buf.push(b'e');
        buf.push(if exp < 0 { b'-' } else { b'+' });
        let mut itoa = itoa::Buffer::new();
        buf.extend_from_slice(itoa.format(exp.unsigned_abs()).as_bytes());
    }
}

fn parse_exponent(bytes: &[u8]) -> i32 {
    let (negative, digits) = match bytes.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, bytes),
    };
    let magnitude = digits
        .iter()
        .fold(0i32, |acc, &d| acc * 10 + i32::from(d - b'0'));
    if negative { -magnitude } else { magnitude }
}

fn push_zeros(buf: &mut Vec<u8>, count: usize) {
    buf.resize(buf.len() + count, b'0');
}
