use chrono::{DateTime, Datelike, Offset, TimeZone, Timelike};

use crate::error::{Error, Result};

/// Appends `t` as a quoted RFC 3339 timestamp with up to nanosecond precision.
///
/// Trailing zeros of the fraction are trimmed and a zero offset is written as
/// `Z`. Years outside `0..=9999` cannot be written with four digits and fail
/// with [`Error::YearOutOfRange`], leaving `buf` untouched.
pub fn append_time<Tz: TimeZone>(buf: &mut Vec<u8>, t: &DateTime<Tz>) -> Result<()> {
    let local = t.naive_local();
    let year = local.year();
    if !(0..10000).contains(&year) {
        return Err(Error::YearOutOfRange(year));
    }

    let mut second = local.second();
    let mut nanos = local.nanosecond();
    if nanos >= 1_000_000_000 {
        // chrono keeps leap seconds in the nanosecond field.
        second += 1;
        nanos -= 1_000_000_000;
    }

    buf.push(b'"');
    push_digits(buf, year as u32, 4);
    buf.push(b'-');
    push_digits(buf, local.month(), 2);
    buf.push(b'-');
    push_digits(buf, local.day(), 2);
    buf.push(b'T');
    push_digits(buf, local.hour(), 2);
    buf.push(b':');
    push_digits(buf, local.minute(), 2);
    buf.push(b':');
    push_digits(buf, second, 2);
    if nanos != 0 {
        let mut fraction = 9;
        while nanos % 10 == 0 {
            nanos /= 10;
            fraction -= 1;
        }
        buf.push(b'.');
        push_digits(buf, nanos, fraction);
    }
    push_offset(buf, t.offset().fix().local_minus_utc());
    buf.push(b'"');
    Ok(())
}

fn push_offset(buf: &mut Vec<u8>, offset_secs: i32) {
    if offset_secs == 0 {
        buf.push(b'Z');
        return;
    }
    // Sub-minute parts of the offset are dropped.
    let minutes = offset_secs / 60;
    buf.push(if minutes < 0 { b'-' } else { b'+' });
    let minutes = minutes.unsigned_abs();
    push_digits(buf, minutes / 60, 2);
    buf.push(b':');
    push_digits(buf, minutes % 60, 2);
}

/// Writes `value` zero padded to exactly `width` digits.
fn push_digits(buf: &mut Vec<u8>, mut value: u32, width: usize) {
    let start = buf.len();
    buf.resize(start + width, b'0');
    for slot in buf[start..].iter_mut().rev() {
        *slot = b'0' + (value % 10) as u8;
        value /= 10;
    }
}
