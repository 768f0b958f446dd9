//! Codec implementations for dictionaries (key-value maps).
//!
//! A dictionary is encoded as the [compact](crate::compact) number of entries followed by each
//! key and value, with entries in ascending key order:
//!
//! ```text
//! Compact(len) || key_0 || value_0 || ... || key_{len-1} || value_{len-1}
//! ```
//!
//! Because the order is fixed by [Ord] on the key, two maps with the same entries produce the
//! same bytes regardless of insertion order or map type.
//!
//! Decoding does not require the entries to be sorted. If a key appears more than once, the
//! last value wins. Without an upper bound on the length, a dictionary of zero-sized entries
//! may not claim more entries than there are bytes remaining.

use crate::{
    util::{len_size, read_items_len, write_len},
    EncodeSize, Error, RangeCfg, Read, Write,
};
use bytes::{Buf, BufMut};
use std::{
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
};
use tracing::debug;

/// Writes entries that are already in ascending key order.
fn write_entries<'a, K, V>(
    len: usize,
    entries: impl Iterator<Item = (&'a K, &'a V)>,
    buf: &mut impl BufMut,
) where
    K: Write + 'a,
    V: Write + 'a,
{
    write_len(len, buf);
    for (k, v) in entries {
        k.write(buf);
        v.write(buf);
    }
}

/// Returns the encoded size of a dictionary with the given entries.
fn entries_size<'a, K, V>(len: usize, entries: impl Iterator<Item = (&'a K, &'a V)>) -> usize
where
    K: EncodeSize + 'a,
    V: EncodeSize + 'a,
{
    len_size(len)
        + entries
            .map(|(k, v)| k.encode_size() + v.encode_size())
            .sum::<usize>()
}

/// Reads a length prefix and that many key-value pairs, passing each pair to `insert`.
///
/// `insert` returns true if the key was already present.
fn read_entries<K: Read, V: Read>(
    buf: &mut impl Buf,
    (range, (k_cfg, v_cfg)): &(RangeCfg, (K::Cfg, V::Cfg)),
    mut insert: impl FnMut(K, V) -> bool,
) -> Result<(), Error> {
    let len = read_items_len::<(K, V)>(buf, range)?;
    for index in 0..len {
        let k = K::read_cfg(buf, k_cfg)?;
        let v = V::read_cfg(buf, v_cfg)?;
        if insert(k, v) {
            debug!(index, len, "duplicate dictionary key, overwriting");
        }
    }
    Ok(())
}

// BTreeMap implementation
impl<K: Write, V: Write> Write for BTreeMap<K, V> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        write_entries(self.len(), self.iter(), buf);
    }
}

impl<K: EncodeSize, V: EncodeSize> EncodeSize for BTreeMap<K, V> {
    #[inline]
    fn encode_size(&self) -> usize {
        entries_size(self.len(), self.iter())
    }
}

impl<K: Read + Ord, V: Read> Read for BTreeMap<K, V> {
    type Cfg = (RangeCfg, (K::Cfg, V::Cfg));

    #[inline]
    fn read_cfg(buf: &mut impl Buf, cfg: &Self::Cfg) -> Result<Self, Error> {
        let mut map = BTreeMap::new();
        read_entries(buf, cfg, |k, v| map.insert(k, v).is_some())?;
        Ok(map)
    }
}

// HashMap implementation
impl<K: Write + Ord, V: Write, S> Write for HashMap<K, V, S> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        write_entries(entries.len(), entries.into_iter(), buf);
    }
}

impl<K: EncodeSize, V: EncodeSize, S> EncodeSize for HashMap<K, V, S> {
    #[inline]
    fn encode_size(&self) -> usize {
        entries_size(self.len(), self.iter())
    }
}

impl<K, V, S> Read for HashMap<K, V, S>
where
    K: Read + Hash + Eq,
    V: Read,
    S: BuildHasher + Default,
{
    type Cfg = (RangeCfg, (K::Cfg, V::Cfg));

    #[inline]
    fn read_cfg(buf: &mut impl Buf, cfg: &Self::Cfg) -> Result<Self, Error> {
        let mut map = HashMap::with_hasher(S::default());
        read_entries(buf, cfg, |k, v| map.insert(k, v).is_some())?;
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Compact, Decode, DecodeExt, Encode};
    use bytes::Bytes;
    use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

    #[test]
    fn test_empty() {
        let empty: BTreeMap<u32, bool> = BTreeMap::new();
        assert_eq!(empty.encode(), &[0x00][..]);
        assert_eq!(
            BTreeMap::<u32, bool>::decode(&[0x00u8][..]).unwrap(),
            empty
        );

        let empty: HashMap<u32, bool> = HashMap::new();
        assert_eq!(empty.encode(), &[0x00][..]);
        assert!(HashMap::<u32, bool>::decode(&[0x00u8][..])
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_sorted_on_wire() {
        let mut map = HashMap::new();
        map.insert(3u8, 0x30u16);
        map.insert(1u8, 0x10u16);
        map.insert(2u8, 0x20u16);
        let expected: [u8; 10] = [
            0x0C, // 3 entries
            0x01, 0x10, 0x00, //
            0x02, 0x20, 0x00, //
            0x03, 0x30, 0x00,
        ];
        assert_eq!(map.encode(), &expected[..]);
        assert_eq!(map.encode_size(), expected.len());
    }

    #[test]
    fn test_insertion_order_independent() {
        let mut entries: Vec<(u32, Vec<u8>)> = (0..200u32)
            .map(|i| (i.wrapping_mul(2_654_435_761), vec![i as u8; (i % 5) as usize]))
            .collect();
        let reference: BTreeMap<_, _> = entries.iter().cloned().collect();
        let expected = reference.encode();

        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..10 {
            entries.shuffle(&mut rng);
            let btree: BTreeMap<_, _> = entries.iter().cloned().collect();
            let hash: HashMap<_, _> = entries.iter().cloned().collect();
            assert_eq!(btree.encode(), expected);
            assert_eq!(hash.encode(), expected);
        }
    }

    #[test]
    fn test_roundtrip_nested() {
        let mut inner = BTreeMap::new();
        inner.insert(String::from("b"), vec![Compact(1_000u32)]);
        inner.insert(String::from("a"), vec![]);

        let mut outer = BTreeMap::new();
        outer.insert(Compact(70u64), inner.clone());
        outer.insert(Compact(2u64), BTreeMap::new());

        let encoded = outer.encode();
        assert_eq!(encoded.len(), outer.encode_size());
        let decoded = BTreeMap::<Compact<u64>, BTreeMap<String, Vec<Compact<u32>>>>::decode(
            encoded,
        )
        .unwrap();
        assert_eq!(decoded, outer);
    }

    #[test]
    fn test_hash_map_roundtrip() {
        let map: HashMap<i64, Option<bool>> =
            [(-5, Some(true)), (0, None), (7, Some(false))].into_iter().collect();
        let decoded = HashMap::<i64, Option<bool>>::decode(map.encode()).unwrap();
        assert_eq!(decoded, map);

        // The same bytes decode into either map type.
        let btree = BTreeMap::<i64, Option<bool>>::decode(map.encode()).unwrap();
        assert_eq!(btree.encode(), map.encode());
    }

    #[test]
    fn test_duplicate_key_overwrites() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();

        let buf = Bytes::from_static(&[0x08, 0x01, 0x0A, 0x01, 0x0B]);
        let decoded = BTreeMap::<u8, u8>::decode(buf.clone()).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[&1], 0x0B);

        let decoded = HashMap::<u8, u8>::decode(buf).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[&1], 0x0B);
    }

    #[test]
    fn test_unsorted_input_accepted() {
        let buf = Bytes::from_static(&[0x08, 0x02, 0x0B, 0x01, 0x0A]);
        let decoded = BTreeMap::<u8, u8>::decode(buf).unwrap();
        assert_eq!(decoded.encode(), &[0x08, 0x01, 0x0A, 0x02, 0x0B][..]);
    }

    #[test]
    fn test_truncated() {
        // Missing the last value.
        let buf = Bytes::from_static(&[0x08, 0x01, 0x0A, 0x02]);
        assert_eq!(
            BTreeMap::<u8, u8>::decode(buf),
            Err(Error::TruncatedInput)
        );

        // Missing the length prefix.
        assert_eq!(
            HashMap::<u8, u8>::decode(&[0u8; 0][..]),
            Err(Error::TruncatedInput)
        );
    }

    #[test]
    fn test_zero_sized_entries() {
        // Claims 2^32 entries that occupy no input.
        let claim = Bytes::from_static(&[0x13, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]);
        assert!(BTreeMap::<(), ()>::decode(claim.clone()).is_err());
        assert!(HashMap::<(), ()>::decode(claim).is_err());

        let map: BTreeMap<(), ()> = [((), ())].into_iter().collect();
        assert_eq!(map.encode(), &[0x04][..]);
        assert_eq!(
            BTreeMap::<(), ()>::decode(map.encode()),
            Err(Error::InvalidLength(1))
        );
        let cfg = (RangeCfg::exact(1), ((), ()));
        assert_eq!(BTreeMap::<(), ()>::decode_cfg(map.encode(), &cfg).unwrap(), map);
    }

    #[test]
    fn test_length_bounds() {
        let map: BTreeMap<u8, u8> = [(1, 2), (3, 4)].into_iter().collect();
        let cfg = (RangeCfg::from(..=1), ((), ()));
        assert_eq!(
            BTreeMap::<u8, u8>::decode_cfg(map.encode(), &cfg),
            Err(Error::InvalidLength(2))
        );

        let cfg = (RangeCfg::exact(2), ((), ()));
        assert_eq!(BTreeMap::<u8, u8>::decode_cfg(map.encode(), &cfg).unwrap(), map);
    }

    #[test]
    fn test_value_cfg_forwarded() {
        let map: BTreeMap<u8, Vec<u8>> = [(1, vec![1, 2, 3])].into_iter().collect();
        let cfg = (RangeCfg::default(), ((), (RangeCfg::from(..3), ())));
        assert_eq!(
            BTreeMap::<u8, Vec<u8>>::decode_cfg(map.encode(), &cfg),
            Err(Error::InvalidLength(3))
        );
    }
}
