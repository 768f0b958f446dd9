#![no_main]

use arbitrary::Arbitrary;
use bytes::Bytes;
use commonware_scale::{compact, Compact, Decode, DecodeExt, Encode, EncodeSize, RangeCfg};
use libfuzzer_sys::fuzz_target;
use num_bigint::BigUint;
use std::{
    collections::{BTreeMap, HashMap},
    fmt::Debug,
};

fn roundtrip<T>(value: &T)
where
    T: Encode + DecodeExt + PartialEq + Debug,
{
    let encoded = value.encode();
    assert_eq!(value.encode_size(), encoded.len());
    let decoded = T::decode(encoded).expect("Failed to decode a successfully encoded input!");
    assert_eq!(value, &decoded);
}

fn roundtrip_compact<T>(value: T)
where
    T: compact::UInt + Clone + PartialEq + Debug,
{
    let wrapped = Compact(value);
    let encoded = wrapped.encode();
    assert_eq!(compact::size(&wrapped.0), encoded.len());
    let decoded = Compact::<T>::decode(encoded).expect("Failed to decode compact value!");
    assert_eq!(wrapped, decoded);
}

fn roundtrip_big(bytes: &[u8]) {
    let value = BigUint::from_bytes_le(bytes);
    match Compact::new(value.clone()) {
        Ok(wrapped) => {
            let encoded = wrapped.encode();
            assert_eq!(wrapped.encode_size(), encoded.len());
            let decoded = Compact::<BigUint>::decode(encoded).expect("Failed to decode BigUint!");
            assert_eq!(decoded.into_inner(), value);
        }
        Err(_) => assert!(value.bits() > 536),
    }
}

fn roundtrip_hash_map(map: &HashMap<u64, Vec<u8>>) {
    let encoded = map.encode();
    assert_eq!(map.encode_size(), encoded.len());

    // Every map with the same entries encodes identically.
    let btree: BTreeMap<_, _> = map.iter().map(|(k, v)| (*k, v.clone())).collect();
    assert_eq!(btree.encode(), encoded);

    let decoded =
        HashMap::<u64, Vec<u8>>::decode(encoded).expect("Failed to decode HashMap!");
    assert_eq!(map, &decoded);
}

// Decoding arbitrary input must never panic. Anything that decodes must survive a roundtrip.
fn decode_bytes<T>(data: &[u8], cfg: &T::Cfg)
where
    T: Encode + Decode + PartialEq + Debug,
{
    if let Ok(value) = T::decode_cfg(Bytes::copy_from_slice(data), cfg) {
        let encoded = value.encode();
        let decoded = T::decode_cfg(encoded, cfg).expect("Failed to decode re-encoded value!");
        assert_eq!(value, decoded);
    }
}

#[derive(Arbitrary, Debug)]
enum FuzzInput<'a> {
    // Compact integers
    Compact8(u8),
    Compact16(u16),
    Compact32(u32),
    Compact64(u64),
    Compact128(u128),
    CompactBig(&'a [u8]),

    // Sequences
    Bytes(Vec<u8>),
    Words(Vec<u64>),
    Nested(Vec<Vec<u16>>),
    Text(String),
    Mixed(Vec<(bool, Option<i32>, u32)>),

    // Dictionaries
    BTreeMap(BTreeMap<u32, String>),
    HashMap(HashMap<u64, Vec<u8>>),

    // Raw input
    DecodeCompact(&'a [u8]),
    DecodeSequence(&'a [u8]),
    DecodeUnitSequence(&'a [u8]),
    DecodeDictionary(&'a [u8]),
    DecodeString(&'a [u8]),
}

fn fuzz(input: FuzzInput) {
    match input {
        // Compact integers
        FuzzInput::Compact8(v) => roundtrip_compact(v),
        FuzzInput::Compact16(v) => roundtrip_compact(v),
        FuzzInput::Compact32(v) => roundtrip_compact(v),
        FuzzInput::Compact64(v) => roundtrip_compact(v),
        FuzzInput::Compact128(v) => roundtrip_compact(v),
        FuzzInput::CompactBig(it) => roundtrip_big(it),
        // Sequences
        FuzzInput::Bytes(it) => roundtrip(&it),
        FuzzInput::Words(it) => roundtrip(&it),
        FuzzInput::Nested(it) => roundtrip(&it),
        FuzzInput::Text(it) => roundtrip(&it),
        FuzzInput::Mixed(it) => {
            let it: Vec<_> = it.into_iter().map(|(a, b, c)| (a, b, Compact(c))).collect();
            roundtrip(&it)
        }
        // Dictionaries
        FuzzInput::BTreeMap(it) => roundtrip(&it),
        FuzzInput::HashMap(it) => roundtrip_hash_map(&it),
        // Raw input
        FuzzInput::DecodeCompact(data) => decode_bytes::<Compact<BigUint>>(data, &()),
        FuzzInput::DecodeSequence(data) => {
            decode_bytes::<Vec<Option<u16>>>(data, &(RangeCfg::default(), ()))
        }
        FuzzInput::DecodeUnitSequence(data) => {
            decode_bytes::<Vec<()>>(data, &(RangeCfg::default(), ()))
        }
        FuzzInput::DecodeDictionary(data) => decode_bytes::<BTreeMap<u8, Vec<u8>>>(
            data,
            &(RangeCfg::from(..=1024), ((), (RangeCfg::default(), ()))),
        ),
        FuzzInput::DecodeString(data) => decode_bytes::<String>(data, &RangeCfg::default()),
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
