#![no_main]

use libfuzzer_sys::fuzz_target;

use dyn_cbor::{decode_with, DecodeOptions, Decoder, TagPolicy};

fuzz_target!(|data: &[u8]| {
    let _ = decode_with(data, &DecodeOptions::new());

    let passthrough = DecodeOptions::new().with_tags(TagPolicy::Passthrough);
    if let Ok(decoder) = Decoder::new(data, passthrough) {
        for item in decoder {
            let _ = item;
        }
    }
});
