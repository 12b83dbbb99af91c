use std::collections::BTreeSet;

use dyn_cbor::{decode, CborError, ErrorCode, ErrorKind, Value};

#[test]
fn error_code_names_are_unique() {
    let names: BTreeSet<&str> = ErrorCode::ALL.iter().map(|c| c.name()).collect();
    assert_eq!(names.len(), ErrorCode::ALL.len());
}

#[test]
fn error_kind_follows_code() {
    assert_eq!(ErrorCode::UnexpectedEof.kind(), ErrorKind::Decode);
    assert_eq!(ErrorCode::AllocationFailed.kind(), ErrorKind::Decode);
    assert_eq!(ErrorCode::UnsupportedType.kind(), ErrorKind::Encode);
    assert_eq!(ErrorCode::IntegerOverflow.kind(), ErrorKind::Encode);
    assert_eq!(ErrorCode::Custom.kind(), ErrorKind::Encode);
}

#[test]
fn error_display_mentions_offset_for_decode_errors() {
    let err = CborError::decode(ErrorCode::UnexpectedEof, 7);
    assert_eq!(err.to_string(), "cbor decode failed at 7: unexpected end of input");
    assert!(err.is_decode());

    let err = CborError::encode(ErrorCode::UnsupportedType);
    assert_eq!(err.to_string(), "cbor conversion failed: unsupported type");
    assert_eq!(err.offset, 0);
    assert!(!err.is_decode());
}

#[test]
fn error_source_is_the_code() {
    use std::error::Error as _;

    let err = CborError::decode(ErrorCode::TrailingData, 3);
    let source = err.source().expect("source");
    assert_eq!(source.to_string(), "trailing bytes after single CBOR item");
}

#[test]
fn decode_errors_carry_kind() {
    let err = decode(&[0x18]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Decode);
    assert_eq!(err.code, ErrorCode::UnexpectedEof);
    assert_eq!(err.offset, 1);
}

#[test]
fn integer_constructor_covers_full_cbor_range() {
    assert_eq!(Value::integer(0).unwrap(), Value::Unsigned(0));
    assert_eq!(Value::integer(-1).unwrap(), Value::Negative(0));
    assert_eq!(
        Value::integer(dyn_cbor::MAX_CBOR_INTEGER).unwrap(),
        Value::Unsigned(u64::MAX)
    );
    assert_eq!(
        Value::integer(dyn_cbor::MIN_CBOR_INTEGER).unwrap(),
        Value::Negative(u64::MAX)
    );

    let err = Value::integer(dyn_cbor::MAX_CBOR_INTEGER + 1).unwrap_err();
    assert_eq!(err.code, ErrorCode::IntegerOverflow);
    let err = Value::integer(dyn_cbor::MIN_CBOR_INTEGER - 1).unwrap_err();
    assert_eq!(err.code, ErrorCode::IntegerOverflow);
}

#[test]
fn accessors_never_wrap() {
    let big_negative = Value::Negative(u64::MAX);
    assert_eq!(big_negative.as_i64(), None);
    assert_eq!(big_negative.as_i128(), Some(-1 - i128::from(u64::MAX)));
    assert_eq!(big_negative.as_u64(), None);

    let big = Value::Unsigned(u64::MAX);
    assert_eq!(big.as_i64(), None);
    assert_eq!(big.as_u64(), Some(u64::MAX));

    assert_eq!(Value::from(i64::MIN).as_i64(), Some(i64::MIN));
    assert_eq!(Value::from(-100i32), Value::Negative(99));
}

#[test]
fn map_get_returns_first_text_key_match() {
    let value = Value::map([("a", 1), ("b", 2), ("a", 3)]);
    assert_eq!(value.get("a"), Some(&Value::Unsigned(1)));
    assert_eq!(value.get("b"), Some(&Value::Unsigned(2)));
    assert_eq!(value.get("c"), None);
    assert_eq!(Value::Null.get("a"), None);
}

#[test]
fn option_conversion_maps_none_to_null() {
    assert_eq!(Value::from(None::<u8>), Value::Null);
    assert_eq!(Value::from(Some("x")), Value::Text("x".into()));
    assert!(Value::default().is_null());
}

#[test]
fn values_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Value>();
    assert_send_sync::<CborError>();
    assert_send_sync::<dyn_cbor::DecodeOptions>();
}
