#![no_main]

use libfuzzer_sys::fuzz_target;

use dyn_cbor::{decode_with, encode, DecodeLimits, DecodeOptions, TagPolicy};

fn fuzz_options(input_len: usize) -> DecodeOptions {
    // Tight enough to avoid pathological allocations while still exploring structure.
    let mut limits = DecodeLimits::for_bytes(input_len.min(1 << 20));
    limits.max_depth = 64;
    DecodeOptions::new()
        .with_limits(limits)
        .with_tags(TagPolicy::Passthrough)
}

fuzz_target!(|data: &[u8]| {
    let options = fuzz_options(data.len());
    if let Ok(v) = decode_with(data, &options) {
        // Re-encoding is shortest-form and definite-length; it must decode back to itself.
        let out = encode(&v);
        let again = decode_with(&out, &fuzz_options(out.len())).expect("re-decode");
        assert_eq!(encode(&again), out);
    }
});
