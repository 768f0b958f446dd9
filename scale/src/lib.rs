//! Serialize structured data with the SCALE wire format.
//!
//! # Overview
//!
//! A deterministic binary serialization library for values that independent parties must
//! agree on byte-for-byte:
//! - No padding, no alignment, and no self-description beyond length prefixes
//! - Little-endian fixed-width primitives
//! - [Compact] (variable-length) integers for lengths and magnitudes
//! - Sequences and dictionaries prefixed by their compact length, with dictionary entries
//!   always written in ascending key order
//!
//! # Supported Types
//!
//! Natively supports:
//! - Primitives: `u8`..`u128`, `i8`..`i128`, `bool`, `()`
//! - Compact integers: [`Compact<T>`](Compact) for `u8`..`u128` and arbitrary-precision
//!   [BigUint](num_bigint::BigUint)
//! - Sequences: `Vec<T>`, `VecDeque<T>`, `[T]` (encode only), `String`, `str` (encode only),
//!   [Bytes](bytes::Bytes)
//! - Dictionaries: `BTreeMap<K, V>` and `HashMap<K, V, S>`
//! - `Option<T>`, `Result<T, E>`, tuples, and fixed-size arrays `[T; N]`
//!
//! User-defined types can be serialized and deserialized by implementing [Write],
//! [EncodeSize], and [Read]. Containers are generic over their element types, so nested
//! containers of user-defined types work without further code.
//!
//! # Example
//!
//! ```
//! use bytes::{Buf, BufMut};
//! use commonware_scale::{Compact, DecodeExt, Encode, EncodeSize, Error, Read, ReadExt, Write};
//! use std::collections::BTreeMap;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Account {
//!     nonce: Compact<u64>,
//!     balances: BTreeMap<[u8; 4], u128>,
//!     frozen: bool,
//! }
//!
//! impl Write for Account {
//!     fn write(&self, buf: &mut impl BufMut) {
//!         self.nonce.write(buf);
//!         self.balances.write(buf);
//!         self.frozen.write(buf);
//!     }
//! }
//!
//! impl EncodeSize for Account {
//!     fn encode_size(&self) -> usize {
//!         self.nonce.encode_size() + self.balances.encode_size() + self.frozen.encode_size()
//!     }
//! }
//!
//! impl Read for Account {
//!     type Cfg = ();
//!
//!     fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
//!         Ok(Self {
//!             nonce: Compact::read(buf)?,
//!             balances: BTreeMap::read(buf)?,
//!             frozen: bool::read(buf)?,
//!         })
//!     }
//! }
//!
//! let account = Account {
//!     nonce: Compact(3),
//!     balances: [(*b"DOT\0", 10), (*b"ACA\0", 5)].into_iter().collect(),
//!     frozen: false,
//! };
//! let encoded = account.encode();
//! assert_eq!(encoded[0], 0x0C); // Compact(3)
//! assert_eq!(encoded[1], 0x08); // 2 entries
//! assert_eq!(&encoded[2..6], b"ACA\0"); // keys in ascending order
//!
//! let decoded = Account::decode(encoded).unwrap();
//! assert_eq!(decoded, account);
//! ```
//!
//! # Decoding Untrusted Input
//!
//! [ReadExt::read] and [DecodeExt::decode] accept sequences of any length. To bound the
//! length of a sequence (or dictionary) supply a [RangeCfg] through [Decode::decode_cfg]:
//!
//! ```
//! use commonware_scale::{Decode, Encode, Error, RangeCfg};
//!
//! let encoded = vec![1u8, 2, 3].encode();
//! let cfg = (RangeCfg::from(..=2), ());
//! assert_eq!(Vec::<u8>::decode_cfg(encoded, &cfg), Err(Error::InvalidLength(3)));
//! ```

pub mod codec;
pub mod compact;
pub mod config;
pub mod error;
pub mod types;
pub mod util;

// Re-export main types and traits
pub use codec::{
    decode, encode, Codec, Config, Decode, DecodeExt, Encode, EncodeFixed, EncodeSize, FixedSize,
    Read, ReadExt, Write,
};
pub use compact::Compact;
pub use config::RangeCfg;
pub use error::Error;
