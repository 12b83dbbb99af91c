use hex_literal::hex;

use dyn_cbor::{encode, encode_into, Encoder, Value};

#[test]
fn unsigned_integers_use_shortest_head() {
    assert_eq!(encode(&Value::from(0u8)), hex!("00"));
    assert_eq!(encode(&Value::from(23u8)), hex!("17"));
    assert_eq!(encode(&Value::from(24u8)), hex!("1818"));
    assert_eq!(encode(&Value::from(255u8)), hex!("18ff"));
    assert_eq!(encode(&Value::from(256u16)), hex!("190100"));
    assert_eq!(encode(&Value::from(65_535u32)), hex!("19ffff"));
    assert_eq!(encode(&Value::from(65_536u32)), hex!("1a00010000"));
    assert_eq!(encode(&Value::from(4_294_967_296u64)), hex!("1b0000000100000000"));
    assert_eq!(encode(&Value::Unsigned(u64::MAX)), hex!("1bffffffffffffffff"));
}

#[test]
fn negative_integers_use_major_one() {
    assert_eq!(encode(&Value::from(-1)), hex!("20"));
    assert_eq!(encode(&Value::from(-10)), hex!("29"));
    assert_eq!(encode(&Value::from(-24)), hex!("37"));
    assert_eq!(encode(&Value::from(-25)), hex!("3818"));
    assert_eq!(encode(&Value::from(-100)), hex!("3863"));
    assert_eq!(encode(&Value::from(-1000)), hex!("3903e7"));
    assert_eq!(encode(&Value::Negative(u64::MAX)), hex!("3bffffffffffffffff"));
}

#[test]
fn floats_use_narrowest_exact_width() {
    assert_eq!(encode(&Value::Float(1.5)), hex!("f93e00"));
    assert_eq!(encode(&Value::Float(0.0)), hex!("f90000"));
    assert_eq!(encode(&Value::Float(-0.0)), hex!("f98000"));
    assert_eq!(encode(&Value::Float(1.0)), hex!("f93c00"));
    assert_eq!(encode(&Value::Float(65504.0)), hex!("f97bff"));
    assert_eq!(encode(&Value::Float(100_000.0)), hex!("fa47c35000"));
    assert_eq!(encode(&Value::Float(3.402_823_466_385_288_6e38)), hex!("fa7f7fffff"));
    assert_eq!(encode(&Value::Float(1.1)), hex!("fb3ff199999999999a"));
    assert_eq!(encode(&Value::Float(-4.1)), hex!("fbc010666666666666"));
}

#[test]
fn special_floats_are_half_width() {
    assert_eq!(encode(&Value::Float(f64::INFINITY)), hex!("f97c00"));
    assert_eq!(encode(&Value::Float(f64::NEG_INFINITY)), hex!("f9fc00"));
    assert_eq!(encode(&Value::Float(f64::NAN)), hex!("f97e00"));
    assert_eq!(encode(&Value::Float(-f64::NAN)), hex!("f97e00"));
}

#[test]
fn integral_floats_stay_floats() {
    assert_eq!(encode(&Value::Float(2.0)), hex!("f94000"));
    assert_ne!(encode(&Value::Float(2.0)), encode(&Value::from(2u8)));
}

#[test]
fn strings_use_definite_length() {
    assert_eq!(encode(&Value::from("")), hex!("60"));
    assert_eq!(encode(&Value::from("a")), hex!("6161"));
    assert_eq!(encode(&Value::from("IETF")), hex!("6449455446"));
    assert_eq!(encode(&Value::from("\u{00fc}")), hex!("62c3bc"));
    assert_eq!(encode(&Value::bytes(vec![])), hex!("40"));
    assert_eq!(encode(&Value::bytes(vec![1, 2, 3, 4])), hex!("4401020304"));

    let long = "x".repeat(24);
    let bytes = encode(&Value::from(long.as_str()));
    assert_eq!(&bytes[..2], hex!("7818"));
    assert_eq!(bytes.len(), 26);
}

#[test]
fn simple_values() {
    assert_eq!(encode(&Value::Null), hex!("f6"));
    assert_eq!(encode(&Value::Bool(false)), hex!("f4"));
    assert_eq!(encode(&Value::Bool(true)), hex!("f5"));
}

#[test]
fn containers_keep_order() {
    assert_eq!(encode(&Value::Array(vec![])), hex!("80"));
    assert_eq!(encode(&Value::Map(vec![])), hex!("a0"));
    assert_eq!(
        encode(&Value::Array(vec![1.into(), 2.into(), 3.into()])),
        hex!("83010203")
    );
    assert_eq!(
        encode(&Value::Array(vec![
            1.into(),
            Value::Array(vec![2.into(), 3.into()]),
            Value::Array(vec![4.into(), 5.into()]),
        ])),
        hex!("8301820203820405")
    );
    // Keys are not sorted.
    assert_eq!(
        encode(&Value::map([("b", 1), ("a", 2)])),
        hex!("a2616201616102")
    );
    assert_eq!(
        encode(&Value::Map(vec![(1.into(), 2.into()), (3.into(), 4.into())])),
        hex!("a201020304")
    );
}

#[test]
fn long_array_header_uses_one_byte_argument() {
    let items: Vec<Value> = (0..25u8).map(Value::from).collect();
    let bytes = encode(&Value::Array(items));
    assert_eq!(&bytes[..2], hex!("9819"));
    assert_eq!(bytes.len(), 2 + 24 + 2);
}

#[test]
fn tags_are_reemitted() {
    let value = Value::Tag(1, Box::new(Value::from(1_363_896_240u32)));
    assert_eq!(encode(&value), hex!("c11a514b67b0"));
    let value = Value::Tag(32, Box::new(Value::from("a")));
    assert_eq!(encode(&value), hex!("d8206161"));
}

#[test]
fn deep_trees_encode_without_recursion() {
    let mut value = Value::Null;
    for _ in 0..100_000 {
        value = Value::Array(vec![value]);
    }
    let bytes = encode(&value);
    assert_eq!(bytes.len(), 100_001);
    assert!(bytes[..100_000].iter().all(|&b| b == 0x81));
    assert_eq!(bytes[100_000], 0xf6);
    // Drop iteratively to keep the test's own stack usage bounded.
    let mut cur = value;
    while let Value::Array(mut items) = cur {
        cur = items.pop().unwrap_or(Value::Null);
    }
}

#[test]
fn streaming_encoder_matches_tree_encoding() {
    let mut enc = Encoder::new();
    enc.map_header(2)
        .text("a")
        .int(1)
        .text("b")
        .array_header(3)
        .bool(true)
        .null()
        .float(1.5);
    let tree = Value::map([
        ("a", Value::from(1)),
        (
            "b",
            Value::Array(vec![true.into(), Value::Null, 1.5.into()]),
        ),
    ]);
    assert_eq!(enc.as_bytes(), encode(&tree).as_slice());
    assert_eq!(enc.len(), 12);
}

#[test]
fn streaming_encoder_int_handles_extremes() {
    let mut enc = Encoder::new();
    enc.int(i64::MIN).int(i64::MAX);
    assert_eq!(
        enc.into_vec(),
        hex!("3b7fffffffffffffff 1b7fffffffffffffff")
    );
}

#[test]
fn encode_into_appends() {
    let mut out = vec![0xaa];
    encode_into(&Value::from(1u8), &mut out);
    encode_into(&Value::from(2u8), &mut out);
    assert_eq!(out, hex!("aa0102"));

    let mut enc = Encoder::from_vec(out);
    enc.bytes(&[0xff]);
    assert_eq!(enc.into_vec(), hex!("aa010241ff"));
}
