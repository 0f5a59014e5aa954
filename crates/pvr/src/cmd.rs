//! Parameter control word.

use bitos::{bitos, integer::u3};
use strum::{FromRepr, VariantArray};

/// Kind of a parameter record.
#[bitos(3)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamType {
    #[default]
    EndOfList = 0b000,
    UserClip = 0b001,
    ObjectList = 0b010,
    Reserved0 = 0b011,
    PolyHeader = 0b100,
    Sprite = 0b101,
    Reserved1 = 0b110,
    Vertex = 0b111,
}

/// Color encoding of the vertices following a header.
#[bitos(2)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorFormat {
    /// Packed ARGB8888.
    #[default]
    Packed = 0b00,
    Float = 0b01,
    Intensity = 0b10,
    IntensityPrevious = 0b11,
}

#[bitos(2)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipMode {
    #[default]
    Disabled = 0b00,
    Reserved = 0b01,
    Inside = 0b10,
    Outside = 0b11,
}

#[bitos(2)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StripLength {
    #[default]
    One = 0b00,
    Two = 0b01,
    Four = 0b10,
    Six = 0b11,
}

/// A display list. Each list is rendered in its own pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, FromRepr, VariantArray)]
#[repr(u8)]
pub enum ListType {
    #[default]
    Opaque = 0,
    OpaqueModifier = 1,
    Translucent = 2,
    TranslucentModifier = 3,
    PunchThrough = 4,
}

impl ListType {
    /// Number of lists.
    pub const COUNT: usize = Self::VARIANTS.len();

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// The first word of every record.
#[bitos(32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParamControl {
    /// Texture coordinates are 16-bit floats.
    #[bits(0)]
    pub uv16: bool,
    #[bits(1)]
    pub gouraud: bool,
    /// Offset (specular) color is used.
    #[bits(2)]
    pub offset: bool,
    #[bits(3)]
    pub textured: bool,
    #[bits(4..6)]
    pub color_format: ColorFormat,
    #[bits(6)]
    pub modifier_mode: bool,
    #[bits(7)]
    pub modifier: bool,
    #[bits(16..18)]
    pub clip: ClipMode,
    #[bits(18..20)]
    pub strip_length: StripLength,
    #[bits(23)]
    pub group_enable: bool,
    #[bits(24..27)]
    pub list: u3,
    /// Last vertex of a strip.
    #[bits(28)]
    pub end_of_strip: bool,
    #[bits(29..32)]
    pub param: ParamType,
}

impl ParamControl {
    /// Control word of a vertex record.
    #[inline(always)]
    pub fn vertex(end_of_strip: bool) -> Self {
        Self::default()
            .with_param(ParamType::Vertex)
            .with_end_of_strip(end_of_strip)
    }

    /// The list this word refers to, if valid.
    #[inline(always)]
    pub fn list_type(self) -> Option<ListType> {
        ListType::from_repr(self.list().value())
    }

    #[inline(always)]
    pub fn with_list_type(self, list: ListType) -> Self {
        self.with_list(u3::new(list as u8))
    }
}

#[cfg(test)]
mod test {
    use super::{ListType, ParamControl, ParamType};
    use strum::VariantArray;

    #[test]
    fn vertex_words() {
        assert_eq!(ParamControl::vertex(false).to_bits(), 0xE000_0000);
        assert_eq!(ParamControl::vertex(true).to_bits(), 0xF000_0000);
    }

    #[test]
    fn decodes_tag_and_list() {
        let word = ParamControl::from_bits(0x8284_0000);
        assert_eq!(word.param(), ParamType::PolyHeader);
        assert_eq!(word.list_type(), Some(ListType::Translucent));
        assert!(word.group_enable());
        assert!(!word.end_of_strip());
    }

    #[test]
    fn list_indices_are_dense() {
        for (i, list) in ListType::VARIANTS.iter().enumerate() {
            assert_eq!(list.index(), i);
        }
    }
}
