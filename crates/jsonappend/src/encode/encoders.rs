use crate::{
    Result,
    encode::{primitives, string, time},
    error::Error,
    number,
    value::Value,
};

/// Appends any [`Value`].
///
/// Scalars keep the no-partial-write guarantee of their encoders. Containers
/// and caller-defined encoders do not: on error `buf` holds whatever was
/// written before the failure and must be discarded.
pub fn append_value(buf: &mut Vec<u8>, value: &Value) -> Result<()> {
    match value {
        Value::Null => primitives::append_null(buf),
        Value::Bool(b) => primitives::append_bool(buf, *b),
        Value::String(s) => string::append_str(buf, s),
        Value::F64(f) => number::append_f64(buf, *f)?,
        Value::I64(i) => primitives::append_i64(buf, *i),
        Value::U64(u) => primitives::append_u64(buf, *u),
        Value::Time(t) => time::append_time(buf, t)?,
        Value::Object(map) => append_object(buf, map)?,
        Value::Array(items) => append_array(buf, items)?,
        Value::Appender(v) => v.append_json(buf)?,
        Value::Marshaler(v) => {
            let bytes = v.marshal_json().map_err(Error::marshal)?;
            buf.extend_from_slice(&bytes);
        }
        Value::Reflect(v) => v.append_reflect(buf)?,
    }
    Ok(())
}

/// Appends a JSON object with one member per entry, in iteration order.
///
/// Pass an ordered source (a `BTreeMap`, or `pairs.iter().map(|(k, v)| (k, v))`)
/// when the key order matters; `HashMap` order is unspecified.
pub fn append_object<'a, I, K>(buf: &mut Vec<u8>, entries: I) -> Result<()>
where
    I: IntoIterator<Item = (K, &'a Value)>,
    K: AsRef<str>,
{
    buf.push(b'{');
    for (idx, (key, value)) in entries.into_iter().enumerate() {
        if idx > 0 {
            buf.push(b',');
        }
        primitives::append_field_name(buf, key.as_ref());
        append_value(buf, value)?;
    }
    buf.push(b'}');
    Ok(())
}

/// Appends a JSON array of `items`, preserving their order.
pub fn append_array<'a, I>(buf: &mut Vec<u8>, items: I) -> Result<()>
where
    I: IntoIterator<Item = &'a Value>,
{
    buf.push(b'[');
    for (idx, item) in items.into_iter().enumerate() {
        if idx > 0 {
            buf.push(b',');
        }
        append_value(buf, item)?;
    }
    buf.push(b']');
    Ok(())
}
