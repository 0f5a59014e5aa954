//! Utilities shared by the workspace crates.

use zerocopy::{FromBytes, Immutable, IntoBytes};

/// Trait for scalar primitives that can be read from client buffers.
///
/// A primitive is either a byte, half-word, word, float or double. That is, [`u8`], [`i8`],
/// [`u16`], [`i16`], [`u32`], [`i32`], [`f32`] or [`f64`].
pub trait Primitive:
    std::fmt::Debug + Copy + Immutable + FromBytes + IntoBytes + Default + Send + Sync + 'static
{
    /// Size of this primitive in bytes.
    const SIZE: usize;

    /// Reads a value of this primitive from the bytes of a buffer (in native endian). If `buf`
    /// does not contain enough data, it's going to be completed with zeros.
    fn read_ne_bytes(buf: &[u8]) -> Self;

    /// Widens this primitive to an [`f32`]. Doubles are narrowed.
    fn to_f32(self) -> f32;
}

macro_rules! impl_primitive {
    ($($type:ty),*) => {
        $(
            impl Primitive for $type {
                const SIZE: usize = size_of::<$type>();

                #[inline(always)]
                fn read_ne_bytes(buf: &[u8]) -> Self {
                    /// Unhappy path for when `buf` is too small.
                    #[cold]
                    #[inline(never)]
                    fn read_unhappy(buf: &[u8]) -> $type {
                        let mut read_buf = [0u8; size_of::<$type>()];
                        read_buf[..buf.len()].copy_from_slice(buf);

                        <$type>::from_ne_bytes(read_buf)
                    }

                    match buf.first_chunk::<{ size_of::<$type>() }>() {
                        Some(bytes) => <$type>::from_ne_bytes(*bytes),
                        None => read_unhappy(buf),
                    }
                }

                #[inline(always)]
                fn to_f32(self) -> f32 {
                    self as f32
                }
            }
        )*
    };
}

impl_primitive! {
    u8,
    u16,
    u32,

    i8,
    i16,
    i32,

    f32,
    f64
}

/// Reads a primitive at `offset` bytes into `buf`. Bytes past the end of `buf` read as zero, and
/// so does an `offset` past the end.
#[inline(always)]
pub fn read_ne<P: Primitive>(buf: &[u8], offset: usize) -> P {
    P::read_ne_bytes(buf.get(offset..).unwrap_or_default())
}

#[cfg(test)]
mod test {
    use super::{Primitive, read_ne};

    #[test]
    fn reads_native_endian() {
        let bytes = 0x1234_5678u32.to_ne_bytes();
        assert_eq!(u32::read_ne_bytes(&bytes), 0x1234_5678);
        assert_eq!(read_ne::<u16>(&(-2i16).to_ne_bytes(), 0) as i16, -2);
        assert_eq!(read_ne::<i16>(&(-2i16).to_ne_bytes(), 0), -2);
    }

    #[test]
    fn short_buffers_are_zero_completed() {
        assert_eq!(u32::read_ne_bytes(&[]), 0);
        assert_eq!(read_ne::<u16>(&[1, 2], 4), 0);

        let value = 0xAABBu16.to_ne_bytes();
        let expected = u32::from_ne_bytes([value[0], value[1], 0, 0]);
        assert_eq!(u32::read_ne_bytes(&value), expected);
    }

    #[test]
    fn floats_widen() {
        let bytes = 0.25f64.to_ne_bytes();
        assert_eq!(f64::read_ne_bytes(&bytes).to_f32(), 0.25);
        assert_eq!((-7i32).to_f32(), -7.0);
        assert_eq!(255u8.to_f32(), 255.0);
    }
}
