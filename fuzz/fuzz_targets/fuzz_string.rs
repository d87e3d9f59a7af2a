#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut buf = Vec::new();
    jsonappend::append_bytes_str(&mut buf, data);
    let decoded: String = serde_json::from_slice(&buf).expect("output must be a valid JSON string");

    // One replacement character per invalid byte.
    let mut want = String::new();
    for chunk in data.utf8_chunks() {
        want.push_str(chunk.valid());
        want.extend(chunk.invalid().iter().map(|_| char::REPLACEMENT_CHARACTER));
    }
    assert_eq!(decoded, want);

    // Escaped output never carries raw HTML metacharacters.
    assert!(!buf.iter().any(|b| matches!(b, b'<' | b'>' | b'&')));
});
