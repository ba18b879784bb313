#![no_main]

use chkrecover::metadata::ooxml::modified_from_core_xml;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(Some(timestamp)) = modified_from_core_xml(data) {
        let _ = timestamp.file_stem();
    }
});
