#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|bits: u64| {
    let value = f64::from_bits(bits);
    let mut buf = b"[".to_vec();
    match jsonappend::append_f64(&mut buf, value) {
        Ok(()) => {
            let text = std::str::from_utf8(&buf[1..]).expect("ascii output");
            let back: f64 = text.parse().expect("output parses as a float");
            assert_eq!(back.to_bits(), value.to_bits(), "{text}");
        }
        Err(_) => {
            assert!(!value.is_finite());
            assert_eq!(buf, b"[");
        }
    }
});
