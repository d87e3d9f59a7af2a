#![no_main]
use libfuzzer_sys::{arbitrary, fuzz_target};
use serde_json::{Number, Value};
use arbitrary::Arbitrary;

const MAX_DEPTH: usize = 8;
const MAX_ARRAY_SIZE: usize = 20;
const MAX_OBJECT_SIZE: usize = 20;

#[derive(Arbitrary, Debug)]
struct FuzzValue {
    choice: u8,
}

impl FuzzValue {
    fn to_json_value(&self, u: &mut arbitrary::Unstructured, depth: usize) -> arbitrary::Result<Value> {
        if depth >= MAX_DEPTH {
            return Ok(Value::Null);
        }

        Ok(match self.choice % 10 {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => Value::Number(Number::from(u.arbitrary::<i64>()?)),
            3 => Value::Number(Number::from(u.arbitrary::<u64>()?)),
            4 => {
                let n: f64 = u.arbitrary()?;
                Number::from_f64(n).map_or(Value::Null, Value::Number)
            }
            5 => Value::String(u.arbitrary()?),
            6 | 7 => {
                let size = u.int_in_range(0..=MAX_ARRAY_SIZE)?;
                let mut arr = Vec::with_capacity(size);
                for _ in 0..size {
                    let fv: FuzzValue = u.arbitrary()?;
                    arr.push(fv.to_json_value(u, depth + 1)?);
                }
                Value::Array(arr)
            }
            _ => {
                let size = u.int_in_range(0..=MAX_OBJECT_SIZE)?;
                let mut obj = serde_json::Map::new();
                for _ in 0..size {
                    let key: String = u.arbitrary()?;
                    let fv: FuzzValue = u.arbitrary()?;
                    obj.insert(key, fv.to_json_value(u, depth + 1)?);
                }
                Value::Object(obj)
            }
        })
    }
}

fuzz_target!(|data: &[u8]| {
    let mut u = arbitrary::Unstructured::new(data);

    if let Ok(fv) = u.arbitrary::<FuzzValue>() {
        if let Ok(value) = fv.to_json_value(&mut u, 0) {
            let mut buf = Vec::new();
            jsonappend::append_value(&mut buf, &jsonappend::Value::from(value.clone()))
                .expect("finite documents always encode");
            let decoded: Value = serde_json::from_slice(&buf).unwrap_or_else(|e| {
                panic!("invalid output {}: {e}", String::from_utf8_lossy(&buf))
            });

            let mut fallback = Vec::new();
            jsonappend::ser::append_serialize(&mut fallback, &value).expect("serializable");
            let reparsed: Value = serde_json::from_slice(&fallback).expect("fallback output parses");
            assert_eq!(decoded, reparsed, "value and serde paths disagree");
        }
    }
});
