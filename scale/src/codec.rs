//! Core codec traits and implementations

use crate::error::Error;
use bytes::{Buf, BufMut, BytesMut};

/// Trait for the configuration passed to [Read::read_cfg].
///
/// The [Default] value must accept any well-formed input.
pub trait Config: Clone + Default + Send + Sync + 'static {}

impl<T: Clone + Default + Send + Sync + 'static> Config for T {}

/// Trait for types that can be written (encoded) to a buffer.
pub trait Write {
    /// Encodes this value by writing to a buffer.
    ///
    /// Implementations should panic if the buffer doesn't have enough capacity.
    fn write(&self, buf: &mut impl BufMut);
}

/// Trait for types that know the exact size of their encoding.
pub trait EncodeSize {
    /// Returns the encoded size of this value (in bytes).
    ///
    /// This method MUST return the exact number of bytes that will be written by `write()`.
    fn encode_size(&self) -> usize;
}

/// Trait for types with a known, fixed encoded size.
pub trait FixedSize {
    /// The size of the encoded value (in bytes).
    const SIZE: usize;
}

// Automatically implement `EncodeSize` for types with a fixed size.
impl<T: FixedSize> EncodeSize for T {
    #[inline]
    fn encode_size(&self) -> usize {
        Self::SIZE
    }
}

/// Trait for types that can be encoded to a buffer.
pub trait Encode: Write + EncodeSize {
    /// Encodes a value to a `BytesMut` buffer.
    ///
    /// Panics if the `write` implementation does not write the expected number of bytes.
    fn encode(&self) -> BytesMut {
        let len = self.encode_size();
        let mut buffer = BytesMut::with_capacity(len);
        self.write(&mut buffer);
        assert_eq!(buffer.len(), len, "write() did not write expected bytes");
        buffer
    }
}

// Automatically implement `Encode` for types that implement `Write` and `EncodeSize`.
impl<T: Write + EncodeSize + ?Sized> Encode for T {}

/// Trait for types that can be encoded to a fixed-size byte array.
pub trait EncodeFixed: Write + FixedSize {
    /// Encodes a value to a fixed-size byte array.
    ///
    /// Panics if `N` is not equal to `Self::SIZE`.
    fn encode_fixed<const N: usize>(&self) -> [u8; N] {
        assert_eq!(
            N,
            Self::SIZE,
            "Can't encode {} bytes into {} bytes",
            Self::SIZE,
            N
        );
        let mut array = [0u8; N];
        let mut buf = &mut array[..];
        self.write(&mut buf);
        assert_eq!(buf.len(), 0);
        array
    }
}

impl<T: Write + FixedSize> EncodeFixed for T {}

/// Trait for types that can be read (decoded) from a buffer.
///
/// The element type of every container is resolved through this trait at compile time, so
/// nested containers decode by calling `read_cfg` on their element types in turn.
pub trait Read: Sized {
    /// Configuration used while decoding (for example, the maximum length of a sequence).
    ///
    /// Use `()` for types that do not require configuration.
    type Cfg: Config;

    /// Reads a value from the buffer using the provided configuration, consuming exactly the
    /// bytes of the value.
    fn read_cfg(buf: &mut impl Buf, cfg: &Self::Cfg) -> Result<Self, Error>;
}

/// Extension trait providing [Read::read_cfg] with the default configuration.
pub trait ReadExt: Read {
    /// Reads a value using `Self::Cfg::default()`.
    fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        Self::read_cfg(buf, &Self::Cfg::default())
    }
}

impl<T: Read> ReadExt for T {}

/// Trait for types that can be decoded from a buffer, ensuring the entire buffer is consumed.
pub trait Decode: Read {
    /// Decodes a value from a buffer, returning [Error::ExtraData] if any bytes remain.
    fn decode_cfg(mut buf: impl Buf, cfg: &Self::Cfg) -> Result<Self, Error> {
        let result = Self::read_cfg(&mut buf, cfg)?;
        let remaining = buf.remaining();
        if remaining > 0 {
            return Err(Error::ExtraData(remaining));
        }
        Ok(result)
    }
}

impl<T: Read> Decode for T {}

/// Extension trait providing [Decode::decode_cfg] with the default configuration.
pub trait DecodeExt: Decode {
    /// Decodes a value using `Self::Cfg::default()`.
    fn decode(buf: impl Buf) -> Result<Self, Error> {
        Self::decode_cfg(buf, &Self::Cfg::default())
    }
}

impl<T: Decode> DecodeExt for T {}

/// Trait for types that can be encoded and decoded.
pub trait Codec: Encode + Decode {}

impl<T: Encode + Decode> Codec for T {}

/// Encodes `value` into a new buffer.
pub fn encode<T: Encode + ?Sized>(value: &T) -> BytesMut {
    value.encode()
}

/// Decodes a `T` from `buf` with the default configuration, rejecting trailing bytes.
pub fn decode<T: Decode>(buf: impl Buf) -> Result<T, Error> {
    T::decode(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_insufficient_buffer() {
        let mut reader = Bytes::from_static(&[0x01, 0x02]);
        assert!(matches!(u32::read(&mut reader), Err(Error::TruncatedInput)));
    }

    #[test]
    fn test_extra_data() {
        let encoded = Bytes::from_static(&[0x01, 0x02]);
        assert!(matches!(u8::decode(encoded), Err(Error::ExtraData(1))));
    }

    #[test]
    fn test_read_leaves_remainder() {
        let mut reader = Bytes::from_static(&[0x2A, 0x01]);
        assert_eq!(u8::read(&mut reader).unwrap(), 0x2A);
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn test_free_functions() {
        let value = vec![1u16, 2, 3];
        let encoded = encode(&value);
        assert_eq!(encoded.len(), value.encode_size());
        let decoded: Vec<u16> = decode(encoded).unwrap();
        assert_eq!(value, decoded);
    }

    #[test]
    fn test_encode_fixed() {
        let value = 0x0102_0304u32;
        let encoded: [u8; 4] = value.encode_fixed();
        assert_eq!(encoded, [0x04, 0x03, 0x02, 0x01]);
        assert_eq!(u32::decode(&encoded[..]).unwrap(), value);
    }

    #[test]
    #[should_panic(expected = "Can't encode 4 bytes into 5 bytes")]
    fn test_encode_fixed_panic() {
        let _: [u8; 5] = 42u32.encode_fixed();
    }

    struct Liar;

    impl Write for Liar {
        fn write(&self, buf: &mut impl BufMut) {
            buf.put_u8(0);
        }
    }

    impl EncodeSize for Liar {
        fn encode_size(&self) -> usize {
            2
        }
    }

    #[test]
    #[should_panic(expected = "write() did not write expected bytes")]
    fn test_encode_size_mismatch() {
        let _ = Liar.encode();
    }
}
