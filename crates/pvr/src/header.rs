//! Polygon headers and the context they are compiled from.

use crate::cmd::{ColorFormat, ListType, ParamControl, ParamType, StripLength};
use crate::list::Record;
use bitos::{
    BitUtils, bitos,
    integer::{u3, u4},
};

#[bitos(3)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthCompare {
    Never = 0b000,
    Less = 0b001,
    Equal = 0b010,
    LessEqual = 0b011,
    #[default]
    Greater = 0b100,
    NotEqual = 0b101,
    GreaterEqual = 0b110,
    Always = 0b111,
}

#[bitos(2)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Culling {
    #[default]
    None = 0b00,
    Small = 0b01,
    CounterClockwise = 0b10,
    Clockwise = 0b11,
}

#[bitos(3)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendFactor {
    #[default]
    Zero = 0b000,
    One = 0b001,
    OtherColor = 0b010,
    InverseOtherColor = 0b011,
    SrcAlpha = 0b100,
    InverseSrcAlpha = 0b101,
    DstAlpha = 0b110,
    InverseDstAlpha = 0b111,
}

#[bitos(2)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FogMode {
    Table = 0b00,
    Vertex = 0b01,
    #[default]
    Disabled = 0b10,
    Table2 = 0b11,
}

#[bitos(2)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UvMode {
    #[default]
    None = 0b00,
    V = 0b01,
    U = 0b10,
    Both = 0b11,
}

#[bitos(2)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureFilter {
    #[default]
    Nearest = 0b00,
    Bilinear = 0b01,
    TrilinearA = 0b10,
    TrilinearB = 0b11,
}

/// How texels are combined with the vertex color.
#[bitos(2)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureEnv {
    Replace = 0b00,
    #[default]
    Modulate = 0b01,
    Decal = 0b10,
    ModulateAlpha = 0b11,
}

#[bitos(3)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureFormat {
    #[default]
    Argb1555 = 0b000,
    Rgb565 = 0b001,
    Argb4444 = 0b010,
    Yuv422 = 0b011,
    Bump = 0b100,
    Pal4 = 0b101,
    Pal8 = 0b110,
    Reserved = 0b111,
}

/// ISP/TSP instruction word.
#[bitos(32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IspTsp {
    #[bits(22)]
    pub uv16: bool,
    #[bits(23)]
    pub gouraud: bool,
    #[bits(24)]
    pub offset: bool,
    #[bits(25)]
    pub texture: bool,
    #[bits(26)]
    pub depth_write_disable: bool,
    #[bits(27..29)]
    pub culling: Culling,
    #[bits(29..32)]
    pub depth_compare: DepthCompare,
}

/// TSP instruction word.
#[bitos(32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tsp {
    #[bits(0..3)]
    pub v_size: u3,
    #[bits(3..6)]
    pub u_size: u3,
    #[bits(6..8)]
    pub texture_env: TextureEnv,
    #[bits(8..12)]
    pub mipmap_bias: u4,
    #[bits(12)]
    pub supersample: bool,
    #[bits(13..15)]
    pub filter: TextureFilter,
    #[bits(15..17)]
    pub uv_clamp: UvMode,
    #[bits(17..19)]
    pub uv_flip: UvMode,
    #[bits(19)]
    pub ignore_texture_alpha: bool,
    #[bits(20)]
    pub use_alpha: bool,
    #[bits(21)]
    pub color_clamp: bool,
    #[bits(22..24)]
    pub fog: FogMode,
    #[bits(24)]
    pub dst_select: bool,
    #[bits(25)]
    pub src_select: bool,
    #[bits(26..29)]
    pub dst_blend: BlendFactor,
    #[bits(29..32)]
    pub src_blend: BlendFactor,
}

/// Texture control word. The texture address lives in the low 21 bits, in units of 8 bytes.
#[bitos(32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureControl {
    #[bits(25)]
    pub stride_select: bool,
    #[bits(26)]
    pub non_twiddled: bool,
    #[bits(27..30)]
    pub format: TextureFormat,
    #[bits(30)]
    pub vq: bool,
    #[bits(31)]
    pub mipmapped: bool,
}

impl TextureControl {
    /// Texture address in video memory.
    pub fn address(self) -> u32 {
        self.to_bits().bits(0, 21) << 3
    }
}

/// A texture as seen by the header compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    pub width: u16,
    pub height: u16,
    pub format: TextureFormat,
    /// Address in video memory. Must be 8-byte aligned.
    pub address: u32,
    pub filter: TextureFilter,
    pub env: TextureEnv,
    pub mipmapped: bool,
    pub twiddled: bool,
}

/// Encodes a texture dimension (8 to 1024, power of two) as a 3-bit size code.
fn size_code(dim: u16) -> u3 {
    let log = dim.clamp(8, 1024).ilog2() - 3;
    u3::new(log as u8)
}

/// Rendering state a polygon header is compiled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolyContext {
    pub list: ListType,
    pub gouraud: bool,
    pub depth_compare: DepthCompare,
    pub depth_write: bool,
    pub culling: Culling,
    pub src_blend: BlendFactor,
    pub dst_blend: BlendFactor,
    pub use_alpha: bool,
    pub fog: FogMode,
    pub color_clamp: bool,
    pub offset_color: bool,
    pub texture: Option<TextureInfo>,
}

impl Default for PolyContext {
    fn default() -> Self {
        Self {
            list: ListType::Opaque,
            gouraud: true,
            depth_compare: DepthCompare::Greater,
            depth_write: true,
            culling: Culling::CounterClockwise,
            src_blend: BlendFactor::One,
            dst_blend: BlendFactor::Zero,
            use_alpha: false,
            fog: FogMode::Disabled,
            color_clamp: false,
            offset_color: false,
            texture: None,
        }
    }
}

/// A polygon header record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PolyHeader {
    pub control: ParamControl,
    pub isp_tsp: IspTsp,
    pub tsp: Tsp,
    pub texture: TextureControl,
}

impl PolyHeader {
    /// Compiles the header for geometry rendered with `ctx`.
    pub fn compile(ctx: &PolyContext) -> Self {
        let textured = ctx.texture.is_some();

        let control = ParamControl::default()
            .with_param(ParamType::PolyHeader)
            .with_group_enable(true)
            .with_strip_length(StripLength::Two)
            .with_list_type(ctx.list)
            .with_color_format(ColorFormat::Packed)
            .with_textured(textured)
            .with_gouraud(ctx.gouraud)
            .with_offset(ctx.offset_color);

        let isp_tsp = IspTsp::default()
            .with_depth_compare(ctx.depth_compare)
            .with_culling(ctx.culling)
            .with_depth_write_disable(!ctx.depth_write)
            .with_texture(textured)
            .with_offset(ctx.offset_color)
            .with_gouraud(ctx.gouraud);

        let mut tsp = Tsp::default()
            .with_src_blend(ctx.src_blend)
            .with_dst_blend(ctx.dst_blend)
            .with_use_alpha(ctx.use_alpha)
            .with_fog(ctx.fog)
            .with_color_clamp(ctx.color_clamp);

        let mut texture = TextureControl::default();
        if let Some(info) = ctx.texture {
            tsp = tsp
                .with_filter(info.filter)
                .with_texture_env(info.env)
                .with_u_size(size_code(info.width))
                .with_v_size(size_code(info.height));

            let word = TextureControl::default()
                .with_mipmapped(info.mipmapped)
                .with_format(info.format)
                .with_non_twiddled(!info.twiddled)
                .to_bits()
                .with_bits(0, 21, (info.address >> 3).bits(0, 21));

            texture = TextureControl::from_bits(word);
        }

        Self {
            control,
            isp_tsp,
            tsp,
            texture,
        }
    }

    pub fn to_record(&self) -> Record {
        let mut record = Record::default();
        record.0[0] = self.control.to_bits();
        record.0[1] = self.isp_tsp.to_bits();
        record.0[2] = self.tsp.to_bits();
        record.0[3] = self.texture.to_bits();
        record
    }

    pub fn from_record(record: &Record) -> Self {
        Self {
            control: ParamControl::from_bits(record.0[0]),
            isp_tsp: IspTsp::from_bits(record.0[1]),
            tsp: Tsp::from_bits(record.0[2]),
            texture: TextureControl::from_bits(record.0[3]),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn untextured_opaque_header() {
        let header = PolyHeader::compile(&PolyContext::default());
        assert_eq!(header.control.to_bits(), 0x8084_0002);
        assert_eq!(header.control.param(), ParamType::PolyHeader);
        assert_eq!(header.control.list_type(), Some(ListType::Opaque));
        assert!(!header.control.textured());
        assert!(!header.isp_tsp.texture());
        assert_eq!(header.isp_tsp.depth_compare(), DepthCompare::Greater);
        assert_eq!(header.tsp.src_blend(), BlendFactor::One);
        assert_eq!(header.tsp.dst_blend(), BlendFactor::Zero);
        assert_eq!(header.texture.to_bits(), 0);

        let record = header.to_record();
        assert_eq!(&record.0[4..], &[0; 4]);
        assert_eq!(PolyHeader::from_record(&record), header);
    }

    #[test]
    fn textured_header_encodes_texture() {
        let ctx = PolyContext {
            list: ListType::Translucent,
            src_blend: BlendFactor::SrcAlpha,
            dst_blend: BlendFactor::InverseSrcAlpha,
            texture: Some(TextureInfo {
                width: 256,
                height: 64,
                format: TextureFormat::Rgb565,
                address: 0x0010_0000,
                filter: TextureFilter::Bilinear,
                env: TextureEnv::Modulate,
                mipmapped: false,
                twiddled: true,
            }),
            ..Default::default()
        };

        let header = PolyHeader::compile(&ctx);
        assert!(header.control.textured());
        assert_eq!(header.control.list_type(), Some(ListType::Translucent));
        assert!(header.isp_tsp.texture());
        assert_eq!(header.tsp.u_size().value(), 5);
        assert_eq!(header.tsp.v_size().value(), 3);
        assert_eq!(header.tsp.filter(), TextureFilter::Bilinear);
        assert_eq!(header.texture.format(), TextureFormat::Rgb565);
        assert!(!header.texture.non_twiddled());
        assert_eq!(header.texture.address(), 0x0010_0000);
    }
}
