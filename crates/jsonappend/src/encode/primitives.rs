use crate::encode::string::append_str;

pub fn append_i64(buf: &mut Vec<u8>, v: i64) {
    let mut itoa = itoa::Buffer::new();
    buf.extend_from_slice(itoa.format(v).as_bytes());
}

pub fn append_u64(buf: &mut Vec<u8>, v: u64) {
    let mut itoa = itoa::Buffer::new();
    buf.extend_from_slice(itoa.format(v).as_bytes());
}

pub fn append_bool(buf: &mut Vec<u8>, b: bool) {
    buf.extend_from_slice(format_bool(b).as_bytes());
}

pub fn append_null(buf: &mut Vec<u8>) {
    buf.extend_from_slice(format_null().as_bytes());
}

/// Appends `"name":`, ready for the field's value.
pub fn append_field_name(buf: &mut Vec<u8>, name: &str) {
    append_str(buf, name);
    buf.push(b':');
}

pub fn format_bool(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}

pub fn format_null() -> &'static str {
    "null"
}
