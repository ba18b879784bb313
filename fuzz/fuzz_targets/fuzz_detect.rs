#![no_main]

use chkrecover::{detect_bytes, document_timestamp_bytes};
use libfuzzer_sys::fuzz_target;

// Arbitrary fragments must never panic, and a detected document must
// survive timestamp extraction.
fuzz_target!(|data: &[u8]| {
    let file_type = detect_bytes(data);
    assert_eq!(file_type, detect_bytes(data));

    if file_type.is_document() {
        let _ = document_timestamp_bytes(data, file_type);
    }
});
