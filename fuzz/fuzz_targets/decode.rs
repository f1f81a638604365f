#![no_main]

use libfuzzer_sys::fuzz_target;
use obml_driver::{DisplayList, DriverConfig, link_at};

// Fuzz target: full decoder entry point, then the driver on whatever
// came out.
//
// Catches bugs in:
// - Header version check and string reads
// - Metadata scanning (unknown tags, record bound)
// - Link section length accounting
// - Content fencing at content_length, image sections
// - Display list building on hostile page sizes and coordinates
fuzz_target!(|data: &[u8]| {
    let doc = match obml_decoder::ObmlDecoder::decode(data) {
        Ok(doc) => doc,
        Err(partial) => {
            assert!(!partial.document.status.is_ok());
            partial.into_parts().0
        }
    };

    if let Ok(list) = DisplayList::build(&doc, &DriverConfig::default()) {
        assert!(list.ops.len() + list.culled <= doc.tiles.len());
    }
    let _ = link_at(&doc, 1.0, 1.0);
});
