//! HTML-safe JSON string escaping.
//!
//! Besides what JSON requires, `<`, `>` and `&` are escaped so the output can
//! be embedded in a `<script>` element, and U+2028/U+2029 are escaped because
//! JavaScript (and therefore JSONP) treats them as line terminators.

use core::convert::Infallible;

static HEX_DIGITS: [u8; 16] = *b"0123456789abcdef";

const QU: u8 = b'"'; // \x22
const BS: u8 = b'\\'; // \x5C
const NN: u8 = b'n'; // \x0A
const RR: u8 = b'r'; // \x0D
const TT: u8 = b't'; // \x09
const UU: u8 = b'u'; // \u00XX: other controls and <, >, &
const LS: u8 = 0xE2; // lead byte of U+2028 / U+2029
const __: u8 = 0;

// Lookup table of escape classes. 0 means the byte is copied verbatim.
static ESCAPE: [u8; 256] = [
    //   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
    UU, UU, UU, UU, UU, UU, UU, UU, UU, TT, NN, UU, UU, RR, UU, UU, // 0
    UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, // 1
    __, __, QU, __, __, __, UU, __, __, __, __, __, __, __, __, __, // 2
    __, __, __, __, __, __, __, __, __, __, __, __, UU, __, UU, __, // 3
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 4
    __, __, __, __, __, __, __, __, __, __, __, __, BS, __, __, __, // 5
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 6
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 7
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 8
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 9
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // A
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // B
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // C
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // D
    __, __, LS, __, __, __, __, __, __, __, __, __, __, __, __, __, // E
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // F
];

const REPLACEMENT: &[u8] = b"\\ufffd";

/// Appends `s` as a quoted, escaped JSON string.
pub fn append_str(buf: &mut Vec<u8>, s: &str) {
    buf.push(b'"');
    append_str_contents(buf, s);
    buf.push(b'"');
}

/// Appends arbitrary bytes as a quoted JSON string.
///
/// Every byte that is not part of a valid UTF-8 sequence is written as the
/// replacement-character escape, one escape per offending byte.
pub fn append_bytes_str(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.push(b'"');
    for chunk in bytes.utf8_chunks() {
        append_str_contents(buf, chunk.valid());
        for _ in chunk.invalid() {
            buf.extend_from_slice(REPLACEMENT);
        }
    }
    buf.push(b'"');
}

/// Appends the escaped contents of `s` without surrounding quotes.
pub fn append_str_contents(buf: &mut Vec<u8>, s: &str) {
    let res: Result<(), Infallible> = escape_with(s, |part| {
        buf.extend_from_slice(part);
        Ok(())
    });
    if let Err(never) = res {
        match never {}
    }
}

/// Feeds the escaped form of `s` to `emit`, in order.
///
/// Unescaped runs are passed through as single slices.
pub(crate) fn escape_with<E>(
    s: &str,
    mut emit: impl FnMut(&[u8]) -> Result<(), E>,
) -> Result<(), E> {
    let bytes = s.as_bytes();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i];
        let escape = ESCAPE[byte as usize];
        if escape == __ {
            i += 1;
            continue;
        }
        if escape == LS {
            // U+2028 is E2 80 A8, U+2029 is E2 80 A9.
            match bytes.get(i + 1..i + 3) {
                Some([0x80, last @ (0xA8 | 0xA9)]) => {
                    if start < i {
                        emit(&bytes[start..i])?;
                    }
                    let sep = [b'\\', b'u', b'2', b'0', b'2', HEX_DIGITS[(last & 0xF) as usize]];
                    emit(&sep)?;
                    i += 3;
                    start = i;
                }
                _ => i += 1,
            }
            continue;
        }

        if start < i {
            emit(&bytes[start..i])?;
        }
        match escape {
            QU => emit(b"\\\"")?,
            BS => emit(b"\\\\")?,
            NN => emit(b"\\n")?,
            RR => emit(b"\\r")?,
            TT => emit(b"\\t")?,
            _ => emit(&[
                b'\\',
                b'u',
                b'0',
                b'0',
                HEX_DIGITS[(byte >> 4) as usize],
                HEX_DIGITS[(byte & 0xF) as usize],
            ])?,
        }
        i += 1;
        start = i;
    }
    if start < bytes.len() {
        emit(&bytes[start..])?;
    }
    Ok(())
}
