//! Fuzz target for `ImageSets/Main/<split>.txt` parsing and image id
//! derivation.

#![no_main]

use libfuzzer_sys::fuzz_target;
use voc2coco::conversion::parse_image_id;
use voc2coco::ir::io_voc_xml::fuzz_parse_image_set;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = fuzz_parse_image_set(text);
    for line in text.lines() {
        let _ = parse_image_id(line);
    }
});
