use hex_literal::hex;

use dyn_cbor::{decode, decode_with, encode, DecodeLimits, DecodeOptions, ErrorCode, TagPolicy, Value};

fn assert_rejected(bytes: &[u8], code: ErrorCode) -> usize {
    let err = decode(bytes).unwrap_err();
    assert_eq!(err.code, code, "input {bytes:02x?}");
    err.offset
}

fn nested_arrays(depth: usize) -> Vec<u8> {
    let mut bytes = vec![0x81; depth - 1];
    bytes.push(0x80);
    bytes
}

#[test]
fn integers() {
    assert_eq!(decode(&hex!("00")).unwrap(), Value::Unsigned(0));
    assert_eq!(decode(&hex!("17")).unwrap(), Value::Unsigned(23));
    assert_eq!(decode(&hex!("1818")).unwrap(), Value::Unsigned(24));
    assert_eq!(decode(&hex!("190100")).unwrap(), Value::Unsigned(256));
    assert_eq!(decode(&hex!("1a00010000")).unwrap(), Value::Unsigned(65_536));
    assert_eq!(
        decode(&hex!("1bffffffffffffffff")).unwrap(),
        Value::Unsigned(u64::MAX)
    );
    assert_eq!(decode(&hex!("20")).unwrap().as_i64(), Some(-1));
    assert_eq!(decode(&hex!("3863")).unwrap().as_i64(), Some(-100));
    assert_eq!(
        decode(&hex!("3bffffffffffffffff")).unwrap().as_i128(),
        Some(-18_446_744_073_709_551_616)
    );
}

#[test]
fn non_shortest_integers_are_accepted() {
    assert_eq!(decode(&hex!("1800")).unwrap(), Value::Unsigned(0));
    assert_eq!(decode(&hex!("1b0000000000000001")).unwrap(), Value::Unsigned(1));
}

#[test]
fn floats_widen_exactly() {
    assert_eq!(decode(&hex!("f93e00")).unwrap(), Value::Float(1.5));
    assert_eq!(decode(&hex!("f97bff")).unwrap(), Value::Float(65504.0));
    assert_eq!(decode(&hex!("f90001")).unwrap(), Value::Float(5.960_464_477_539_063e-8));
    assert_eq!(decode(&hex!("fa47c35000")).unwrap(), Value::Float(100_000.0));
    assert_eq!(decode(&hex!("fb3ff199999999999a")).unwrap(), Value::Float(1.1));
    assert_eq!(decode(&hex!("f97c00")).unwrap(), Value::Float(f64::INFINITY));
    assert_eq!(decode(&hex!("f9fc00")).unwrap(), Value::Float(f64::NEG_INFINITY));
    assert!(decode(&hex!("f97e00")).unwrap().as_f64().unwrap().is_nan());
    assert!(decode(&hex!("fa7fc00000")).unwrap().as_f64().unwrap().is_nan());

    let neg_zero = decode(&hex!("f98000")).unwrap().as_f64().unwrap();
    assert!(neg_zero == 0.0 && neg_zero.is_sign_negative());
}

#[test]
fn strings() {
    assert_eq!(decode(&hex!("60")).unwrap(), Value::Text(String::new()));
    assert_eq!(decode(&hex!("6449455446")).unwrap(), Value::from("IETF"));
    assert_eq!(decode(&hex!("62c3bc")).unwrap(), Value::from("\u{00fc}"));
    assert_eq!(decode(&hex!("40")).unwrap(), Value::bytes(vec![]));
    assert_eq!(decode(&hex!("4401020304")).unwrap(), Value::bytes(vec![1, 2, 3, 4]));
}

#[test]
fn simple_values() {
    assert_eq!(decode(&hex!("f4")).unwrap(), Value::Bool(false));
    assert_eq!(decode(&hex!("f5")).unwrap(), Value::Bool(true));
    assert_eq!(decode(&hex!("f6")).unwrap(), Value::Null);
}

#[test]
fn unsupported_simple_values() {
    assert_eq!(assert_rejected(&hex!("f7"), ErrorCode::UnsupportedSimpleValue), 0);
    assert_eq!(assert_rejected(&hex!("f0"), ErrorCode::UnsupportedSimpleValue), 0);
    assert_eq!(assert_rejected(&hex!("f8ff"), ErrorCode::UnsupportedSimpleValue), 0);
    assert_eq!(assert_rejected(&hex!("8201f820"), ErrorCode::UnsupportedSimpleValue), 2);
}

#[test]
fn two_byte_simple_values_below_32_are_malformed() {
    for arg in [0x00, 0x10, 0x14, 0x16, 0x1f] {
        assert_eq!(assert_rejected(&[0xf8, arg], ErrorCode::InvalidMajorType), 0);
    }
    assert_eq!(assert_rejected(&hex!("8201f810"), ErrorCode::InvalidMajorType), 2);
    assert_eq!(assert_rejected(&hex!("f8"), ErrorCode::UnexpectedEof), 1);
}

#[test]
fn empty_containers() {
    assert_eq!(decode(&hex!("80")).unwrap(), Value::Array(vec![]));
    assert_eq!(decode(&hex!("a0")).unwrap(), Value::Map(vec![]));
}

#[test]
fn nested_containers() {
    let value = decode(&hex!("a26161016162820203")).unwrap();
    assert_eq!(
        value,
        Value::map([
            ("a", Value::from(1)),
            ("b", Value::Array(vec![2.into(), 3.into()])),
        ])
    );
}

#[test]
fn map_order_survives_round_trip() {
    let bytes = hex!("a2616101616202");
    let value = decode(&bytes).unwrap();
    let keys: Vec<&str> = value
        .as_map()
        .unwrap()
        .iter()
        .map(|(k, _)| k.as_str().unwrap())
        .collect();
    assert_eq!(keys, ["a", "b"]);
    assert_eq!(encode(&value), bytes);

    let reversed = hex!("a2616202616101");
    assert_eq!(encode(&decode(&reversed).unwrap()), reversed);
}

#[test]
fn duplicate_and_non_text_keys_pass_through() {
    let value = decode(&hex!("a3616101616102f5f6")).unwrap();
    assert_eq!(
        value,
        Value::Map(vec![
            ("a".into(), 1.into()),
            ("a".into(), 2.into()),
            (true.into(), Value::Null),
        ])
    );
}

#[test]
fn truncated_string_payload() {
    assert_eq!(assert_rejected(&hex!("5aff"), ErrorCode::UnexpectedEof), 1);
    assert_eq!(assert_rejected(&hex!("62c3"), ErrorCode::LengthExceedsBuffer), 0);
}

#[test]
fn huge_length_claims_fail_before_allocation() {
    assert_eq!(
        assert_rejected(&hex!("5bffffffffffffffff"), ErrorCode::LengthExceedsBuffer),
        0
    );
    assert_eq!(
        assert_rejected(&hex!("7bffffffffffffffff"), ErrorCode::LengthExceedsBuffer),
        0
    );
    assert_eq!(
        assert_rejected(&hex!("9bffffffffffffffff"), ErrorCode::LengthExceedsBuffer),
        0
    );
    assert_eq!(
        assert_rejected(&hex!("bbffffffffffffffff"), ErrorCode::LengthExceedsBuffer),
        0
    );
}

/// `depth` nested arrays each claiming `claim` elements, padded so every claim fits the input.
fn nested_claims(depth: usize, claim: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    for _ in 0..depth {
        bytes.push(0x9a);
        bytes.extend_from_slice(&claim.to_be_bytes());
    }
    bytes.resize(bytes.len() + claim as usize, 0x00);
    bytes
}

#[test]
fn nested_claims_share_one_item_budget() {
    let bytes = nested_claims(255, 1 << 16);
    let err = decode(&bytes).unwrap_err();
    assert_eq!(err.code, ErrorCode::LimitExceeded);
    // The second claim is the one that overdraws the input.
    assert_eq!(err.offset, 5);
}

#[test]
fn item_budget_admits_inputs_that_fill_it() {
    // One array whose 4096 elements are the rest of the input.
    let bytes = nested_claims(1, 4096);
    let value = decode(&bytes).unwrap();
    assert_eq!(value.as_array().map(<[Value]>::len), Some(4096));

    // Nested claims that together stay within the input still decode.
    let value = decode(&hex!("8281008100")).unwrap();
    assert_eq!(value.to_string(), "[[0], [0]]");
}

#[test]
fn item_budget_applies_to_explicit_limits_too() {
    let options = DecodeOptions::new().with_limits(DecodeLimits::unlimited());
    let err = decode_with(&nested_claims(2, 1 << 10), &options).unwrap_err();
    assert_eq!(err.code, ErrorCode::LimitExceeded);
}

#[test]
fn container_counts_are_checked_against_remaining_bytes() {
    // Three elements claimed, two bytes remain.
    assert_eq!(assert_rejected(&hex!("830102"), ErrorCode::LengthExceedsBuffer), 0);
    // Two pairs need at least four bytes.
    assert_eq!(assert_rejected(&hex!("a2010203"), ErrorCode::LengthExceedsBuffer), 0);
    // Enough bytes for the claim, but an element is cut short.
    assert_eq!(assert_rejected(&hex!("82011a0001"), ErrorCode::UnexpectedEof), 3);
}

#[test]
fn truncated_arguments() {
    assert_eq!(assert_rejected(&[], ErrorCode::UnexpectedEof), 0);
    assert_eq!(assert_rejected(&hex!("19"), ErrorCode::UnexpectedEof), 1);
    assert_eq!(assert_rejected(&hex!("1a0000"), ErrorCode::UnexpectedEof), 1);
    assert_eq!(assert_rejected(&hex!("fb3ff1"), ErrorCode::UnexpectedEof), 1);
}

#[test]
fn invalid_utf8_in_text() {
    assert_eq!(assert_rejected(&hex!("61ff"), ErrorCode::InvalidUtf8), 0);
    assert_eq!(assert_rejected(&hex!("8262616262c328"), ErrorCode::InvalidUtf8), 4);
    // Overlong encoding of '/'.
    assert_eq!(assert_rejected(&hex!("62c0af"), ErrorCode::InvalidUtf8), 0);
}

#[test]
fn nesting_limit() {
    assert!(decode(&nested_arrays(256)).is_ok());
    assert_eq!(
        assert_rejected(&nested_arrays(257), ErrorCode::NestingTooDeep),
        256
    );
    assert_eq!(
        assert_rejected(&nested_arrays(300), ErrorCode::NestingTooDeep),
        256
    );
}

#[test]
fn nesting_limit_is_configurable() {
    let options = DecodeOptions::new().with_limits(DecodeLimits::unlimited().with_max_depth(2));
    assert!(decode_with(&hex!("8180"), &options).is_ok());
    let err = decode_with(&hex!("818180"), &options).unwrap_err();
    assert_eq!(err.code, ErrorCode::NestingTooDeep);
    assert_eq!(err.offset, 2);

    let options = DecodeOptions::new().with_limits(DecodeLimits::unlimited().with_max_depth(0));
    let err = decode_with(&hex!("80"), &options).unwrap_err();
    assert_eq!(err.code, ErrorCode::NestingTooDeep);
    assert!(decode_with(&hex!("01"), &options).is_ok());
}

#[test]
fn maps_count_toward_depth() {
    let mut bytes = vec![0xa1, 0x00].repeat(256);
    bytes.push(0x00);
    assert!(decode(&bytes).is_ok());

    let mut bytes = vec![0xa1, 0x00].repeat(257);
    bytes.push(0x00);
    assert_eq!(assert_rejected(&bytes, ErrorCode::NestingTooDeep), 512);
}

#[test]
fn trailing_data() {
    assert_eq!(assert_rejected(&hex!("0001"), ErrorCode::TrailingData), 1);
    assert_eq!(assert_rejected(&hex!("820102ff"), ErrorCode::TrailingData), 3);
}

#[test]
fn reserved_additional_info() {
    for ib in [0x1c, 0x1d, 0x1e, 0x3c, 0x5c, 0x7d, 0x9e, 0xbc, 0xdc, 0xfc, 0xfd, 0xfe] {
        assert_eq!(assert_rejected(&[ib], ErrorCode::InvalidMajorType), 0);
    }
}

#[test]
fn indefinite_length_on_integer_or_tag() {
    assert_eq!(assert_rejected(&hex!("1f"), ErrorCode::InvalidMajorType), 0);
    assert_eq!(assert_rejected(&hex!("3f"), ErrorCode::InvalidMajorType), 0);
    let options = DecodeOptions::new().with_tags(TagPolicy::Passthrough);
    let err = decode_with(&hex!("df00"), &options).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidMajorType);
}

#[test]
fn indefinite_strings_join_chunks() {
    assert_eq!(
        decode(&hex!("5f42010243030405ff")).unwrap(),
        Value::bytes(vec![1, 2, 3, 4, 5])
    );
    assert_eq!(
        decode(&hex!("7f657374726561646d696e67ff")).unwrap(),
        Value::from("streaming")
    );
    assert_eq!(decode(&hex!("7fff")).unwrap(), Value::from(""));
    assert_eq!(decode(&hex!("5f40ff")).unwrap(), Value::bytes(vec![]));
}

#[test]
fn indefinite_string_chunks_must_match() {
    // Text chunk inside a byte string.
    assert_eq!(assert_rejected(&hex!("5f6161ff"), ErrorCode::InvalidChunk), 1);
    // Nested indefinite chunk.
    assert_eq!(assert_rejected(&hex!("7f7f6161ffff"), ErrorCode::InvalidChunk), 1);
    // Integer inside a text string.
    assert_eq!(assert_rejected(&hex!("7f01ff"), ErrorCode::InvalidChunk), 1);
    // Missing break.
    assert_eq!(assert_rejected(&hex!("5f4101"), ErrorCode::UnexpectedEof), 3);
}

#[test]
fn indefinite_text_chunks_are_validated_individually() {
    // "ü" split across two chunks is invalid even though the joined bytes are valid.
    assert_eq!(assert_rejected(&hex!("7f61c361bcff"), ErrorCode::InvalidUtf8), 1);
}

#[test]
fn indefinite_containers_match_definite_forms() {
    assert_eq!(
        decode(&hex!("9f018202039f0405ffff")).unwrap(),
        decode(&hex!("8301820203820405")).unwrap()
    );
    assert_eq!(
        decode(&hex!("bf61610161629f0203ffff")).unwrap(),
        decode(&hex!("a26161016162820203")).unwrap()
    );
    assert_eq!(
        decode(&hex!("826161bf61626163ff")).unwrap(),
        decode(&hex!("826161a161626163")).unwrap()
    );
    assert_eq!(decode(&hex!("9fff")).unwrap(), Value::Array(vec![]));
    assert_eq!(decode(&hex!("bfff")).unwrap(), Value::Map(vec![]));
}

#[test]
fn stray_breaks() {
    assert_eq!(assert_rejected(&hex!("ff"), ErrorCode::UnexpectedBreak), 0);
    assert_eq!(assert_rejected(&hex!("8201ff"), ErrorCode::UnexpectedBreak), 2);
    // Break where a map value belongs.
    assert_eq!(assert_rejected(&hex!("bf01ff"), ErrorCode::UnexpectedBreak), 2);
    assert_eq!(assert_rejected(&hex!("a101ff"), ErrorCode::UnexpectedBreak), 2);
}

#[test]
fn unterminated_indefinite_containers() {
    assert_eq!(assert_rejected(&hex!("9f0102"), ErrorCode::UnexpectedEof), 3);
    assert_eq!(assert_rejected(&hex!("bf0102"), ErrorCode::UnexpectedEof), 3);
}

#[test]
fn indefinite_nesting_counts_toward_depth() {
    let mut bytes = vec![0x9f; 257];
    bytes.extend(vec![0xff; 257]);
    assert_eq!(assert_rejected(&bytes, ErrorCode::NestingTooDeep), 256);
}

#[test]
fn tags_rejected_by_default() {
    assert_eq!(assert_rejected(&hex!("c11a514b67b0"), ErrorCode::UnsupportedTag), 0);
    assert_eq!(assert_rejected(&hex!("8201d82000"), ErrorCode::UnsupportedTag), 2);
}

#[test]
fn tags_pass_through_when_enabled() {
    let options = DecodeOptions::new().with_tags(TagPolicy::Passthrough);
    let bytes = hex!("c11a514b67b0");
    let value = decode_with(&bytes, &options).unwrap();
    assert_eq!(
        value,
        Value::Tag(1, Box::new(Value::Unsigned(1_363_896_240)))
    );
    assert_eq!(encode(&value), bytes);

    let nested = decode_with(&hex!("d818d81801"), &options).unwrap();
    assert_eq!(
        nested,
        Value::Tag(24, Box::new(Value::Tag(24, Box::new(Value::Unsigned(1)))))
    );
}

#[test]
fn tag_nesting_counts_toward_depth() {
    let options = DecodeOptions::new()
        .with_tags(TagPolicy::Passthrough)
        .with_limits(DecodeLimits::unlimited().with_max_depth(2));
    assert!(decode_with(&hex!("c1c101"), &options).is_ok());
    let err = decode_with(&hex!("c1c1c101"), &options).unwrap_err();
    assert_eq!(err.code, ErrorCode::NestingTooDeep);
    assert_eq!(err.offset, 2);
}
