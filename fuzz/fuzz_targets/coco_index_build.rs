//! Fuzz target for building a ground-truth index from COCO JSON.
//!
//! Exercises the lookup tables (duplicate image ids, annotations pointing at
//! unknown images) on top of plain parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use voc2coco::ir::CocoIndex;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(index) = CocoIndex::from_json_str(text) {
        for id in index.image_ids() {
            let _ = index.annotations_for_image(*id);
        }
        let _ = index.category_names();
    }
});
