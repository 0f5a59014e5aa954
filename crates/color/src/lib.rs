use bitos::BitUtils;
use ordered_float::OrderedFloat;
use zerocopy::{FromBytes, Immutable, IntoBytes};

/// Converts a value in range `0..=OLD_MAX` to a value in the range `0..=NEW_MAX`.
#[inline(always)]
pub fn convert_range<const OLD_MAX: u32, const NEW_MAX: u32>(value: u8) -> u8 {
    const {
        assert!(OLD_MAX != 0);
        assert!(OLD_MAX <= 255);
        assert!(NEW_MAX <= 255);
    };

    let value = (value as u32).min(OLD_MAX);
    ((value * NEW_MAX + OLD_MAX / 2) / OLD_MAX) as u8
}

/// Maps a float in `0.0..=1.0` to an 8-bit channel. Values outside the range are clamped and the
/// result is truncated, as the hardware packing does.
#[inline(always)]
pub fn unorm8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}

/// A single RGBA8 color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Immutable, IntoBytes, FromBytes, Default)]
#[repr(C)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    #[inline(always)]
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Converts signed 8-bit channels: negative values become zero and `0..=127` is stretched to
    /// `0..=255`.
    #[inline(always)]
    pub fn from_signed(r: i8, g: i8, b: i8, a: i8) -> Self {
        let conv = |c: i8| convert_range::<127, 255>(c.max(0) as u8);
        Self {
            r: conv(r),
            g: conv(g),
            b: conv(b),
            a: conv(a),
        }
    }
}

/// A packed 32-bit color with alpha in the top byte, then red, green and blue.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Immutable, IntoBytes, FromBytes, Default)]
#[repr(transparent)]
pub struct Argb8888(pub u32);

impl Argb8888 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self(0);

    #[inline(always)]
    pub fn a(self) -> u8 {
        self.0.bits(24, 32) as u8
    }

    #[inline(always)]
    pub fn r(self) -> u8 {
        self.0.bits(16, 24) as u8
    }

    #[inline(always)]
    pub fn g(self) -> u8 {
        self.0.bits(8, 16) as u8
    }

    #[inline(always)]
    pub fn b(self) -> u8 {
        self.0.bits(0, 8) as u8
    }

    /// Packs four 8-bit channels.
    #[inline(always)]
    pub fn from_channels(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(
            0u32.with_bits(0, 8, b as u32)
                .with_bits(8, 16, g as u32)
                .with_bits(16, 24, r as u32)
                .with_bits(24, 32, a as u32),
        )
    }

    /// Per-channel saturating addition.
    #[inline(always)]
    pub fn saturating_add(self, rhs: Self) -> Self {
        Self::from_channels(
            self.a().saturating_add(rhs.a()),
            self.r().saturating_add(rhs.r()),
            self.g().saturating_add(rhs.g()),
            self.b().saturating_add(rhs.b()),
        )
    }
}

impl std::fmt::Debug for Argb8888 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Argb8888(0x{:08X})", self.0)
    }
}

impl From<Rgba8> for Argb8888 {
    #[inline(always)]
    fn from(value: Rgba8) -> Self {
        Self::from_channels(value.a, value.r, value.g, value.b)
    }
}

impl From<Argb8888> for Rgba8 {
    #[inline(always)]
    fn from(value: Argb8888) -> Self {
        Self {
            r: value.r(),
            g: value.g(),
            b: value.b(),
            a: value.a(),
        }
    }
}

impl From<Rgba> for Argb8888 {
    #[inline(always)]
    fn from(value: Rgba) -> Self {
        Self::from_channels(
            unorm8(value.a),
            unorm8(value.r),
            unorm8(value.g),
            unorm8(value.b),
        )
    }
}

/// A floating point RGBA color.
#[derive(Clone, Copy, Immutable, IntoBytes, Default)]
#[repr(C)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    #[inline(always)]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Multiplies every channel by `factor`.
    #[inline(always)]
    pub fn scale(self, factor: f32) -> Self {
        Self::new(
            self.r * factor,
            self.g * factor,
            self.b * factor,
            self.a * factor,
        )
    }

    /// Component-wise product.
    #[inline(always)]
    pub fn modulate(self, rhs: Self) -> Self {
        Self::new(
            self.r * rhs.r,
            self.g * rhs.g,
            self.b * rhs.b,
            self.a * rhs.a,
        )
    }
}

impl std::ops::Add for Rgba {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.r + rhs.r,
            self.g + rhs.g,
            self.b + rhs.b,
            self.a + rhs.a,
        )
    }
}

impl std::fmt::Debug for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl PartialEq for Rgba {
    fn eq(&self, other: &Self) -> bool {
        OrderedFloat(self.r) == OrderedFloat(other.r)
            && OrderedFloat(self.g) == OrderedFloat(other.g)
            && OrderedFloat(self.b) == OrderedFloat(other.b)
            && OrderedFloat(self.a) == OrderedFloat(other.a)
    }
}

impl Eq for Rgba {}

impl std::hash::Hash for Rgba {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        OrderedFloat(self.r).hash(state);
        OrderedFloat(self.g).hash(state);
        OrderedFloat(self.b).hash(state);
        OrderedFloat(self.a).hash(state);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn packs_alpha_in_top_byte() {
        let packed = Argb8888::from(Rgba::new(1.0, 0.5, 0.0, 1.0));
        assert_eq!(packed, Argb8888(0xFFFF_7F00));
        assert_eq!(packed.a(), 0xFF);
        assert_eq!(packed.r(), 0xFF);
        assert_eq!(packed.g(), 0x7F);
        assert_eq!(packed.b(), 0x00);
    }

    #[test]
    fn float_packing_clamps() {
        let packed = Argb8888::from(Rgba::new(2.0, -1.0, 0.25, 0.0));
        assert_eq!(packed, Argb8888::from_channels(0, 255, 0, 63));
    }

    #[test]
    fn saturating_add_is_per_channel() {
        let a = Argb8888::from_channels(0x80, 0xF0, 0x10, 0x00);
        let b = Argb8888::from_channels(0x90, 0x20, 0x10, 0x01);
        assert_eq!(
            a.saturating_add(b),
            Argb8888::from_channels(0xFF, 0xFF, 0x20, 0x01)
        );
    }

    #[test]
    fn signed_channels_rescale() {
        let color = Rgba8::from_signed(127, -5, 0, 64);
        assert_eq!(color, Rgba8::new(255, 0, 0, 129));
    }

    #[test]
    fn rgba8_round_trips_through_argb() {
        let color = Rgba8::new(1, 2, 3, 4);
        assert_eq!(Argb8888::from(color).0, 0x0401_0203);
        assert_eq!(Rgba8::from(Argb8888::from(color)), color);
    }
}
