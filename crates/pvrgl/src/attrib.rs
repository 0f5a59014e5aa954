//! Attribute format decoding.
//!
//! Client arrays are untyped bytes described by an [`ElementType`] and a component count. Reads
//! never fault: anything past the end of the data reads as zero.

use crate::client::Channel;
use crate::error::GlError;
use color::{Argb8888, Rgba, Rgba8};
use strum::FromRepr;
use util::{Primitive, read_ne};

/// Scalar encoding of an attribute component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr)]
#[repr(u32)]
pub enum ElementType {
    Byte = 0x1400,
    UnsignedByte = 0x1401,
    Short = 0x1402,
    UnsignedShort = 0x1403,
    Int = 0x1404,
    UnsignedInt = 0x1405,
    Float = 0x1406,
    Double = 0x140A,
}

impl ElementType {
    /// Converts a raw GL type enum.
    #[inline(always)]
    pub fn from_gl(value: u32) -> Option<Self> {
        Self::from_repr(value)
    }

    /// Size of a single component in bytes.
    #[inline(always)]
    pub fn size(self) -> usize {
        match self {
            Self::Byte => i8::SIZE,
            Self::UnsignedByte => u8::SIZE,
            Self::Short => i16::SIZE,
            Self::UnsignedShort => u16::SIZE,
            Self::Int => i32::SIZE,
            Self::UnsignedInt => u32::SIZE,
            Self::Float => f32::SIZE,
            Self::Double => f64::SIZE,
        }
    }

    /// Reads component `index` of an element, widened to a float.
    #[inline(always)]
    fn component(self, data: &[u8], index: usize) -> f32 {
        #[inline(always)]
        fn read<P: Primitive>(data: &[u8], index: usize) -> f32 {
            read_ne::<P>(data, index * P::SIZE).to_f32()
        }

        match self {
            Self::Byte => read::<i8>(data, index),
            Self::UnsignedByte => read::<u8>(data, index),
            Self::Short => read::<i16>(data, index),
            Self::UnsignedShort => read::<u16>(data, index),
            Self::Int => read::<i32>(data, index),
            Self::UnsignedInt => read::<u32>(data, index),
            Self::Float => read::<f32>(data, index),
            Self::Double => read::<f64>(data, index),
        }
    }
}

/// Encoding of an index stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr)]
#[repr(u32)]
pub enum IndexType {
    UnsignedByte = 0x1401,
    UnsignedShort = 0x1403,
}

impl IndexType {
    #[inline(always)]
    pub fn from_gl(value: u32) -> Option<Self> {
        Self::from_repr(value)
    }

    #[inline(always)]
    pub fn size(self) -> usize {
        match self {
            Self::UnsignedByte => u8::SIZE,
            Self::UnsignedShort => u16::SIZE,
        }
    }
}

/// Reads `size` components of type `ty` from `data` into `out[..size]`, widening integers
/// without normalization. The remaining components of `out` are left untouched.
pub fn decode_floats(out: &mut [f32; 4], data: &[u8], size: usize, ty: ElementType) {
    for (index, value) in out.iter_mut().enumerate().take(size) {
        *value = ty.component(data, index);
    }
}

/// Checks that `ty` is a color encoding [`decode_color`] accepts.
pub fn check_color_format(ty: ElementType) -> Result<(), GlError> {
    match ty {
        ElementType::Byte
        | ElementType::UnsignedByte
        | ElementType::Float
        | ElementType::Double => Ok(()),
        _ => Err(GlError::UnsupportedFormat {
            channel: Channel::Color,
            ty,
        }),
    }
}

/// Decodes a color of `size` components into a packed ARGB color. Colors with less than four
/// components are fully opaque.
pub fn decode_color(data: &[u8], size: usize, ty: ElementType) -> Result<Argb8888, GlError> {
    check_color_format(ty)?;

    let opaque = size < 4;
    let color = match ty {
        ElementType::UnsignedByte => {
            let c = |i: usize| if i < size { read_ne::<u8>(data, i) } else { 0 };
            Argb8888::from(Rgba8::new(c(0), c(1), c(2), c(3)))
        }
        ElementType::Byte => {
            let c = |i: usize| if i < size { read_ne::<i8>(data, i) } else { 0 };
            Argb8888::from(Rgba8::from_signed(c(0), c(1), c(2), c(3)))
        }
        _ => {
            let mut rgba = [0.0; 4];
            decode_floats(&mut rgba, data, size.min(4), ty);
            Argb8888::from(Rgba::new(rgba[0], rgba[1], rgba[2], rgba[3]))
        }
    };

    Ok(if opaque {
        Argb8888::from_channels(0xFF, color.r(), color.g(), color.b())
    } else {
        color
    })
}

/// Reads an index from the start of `data`.
#[inline(always)]
pub fn decode_index(data: &[u8], ty: IndexType) -> u16 {
    match ty {
        IndexType::UnsignedByte => read_ne::<u8>(data, 0) as u16,
        IndexType::UnsignedShort => read_ne::<u16>(data, 0),
    }
}
