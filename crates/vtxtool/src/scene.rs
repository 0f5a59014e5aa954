//! Scene descriptions.
//!
//! A scene is a RON file with named client arrays, the state of the pipeline modules and a list of
//! commands to run against a [`Context`].

use color::Rgba;
use eyre_pretty::{Context as _, ContextCompat, Result};
use glam::{Mat4, Vec3, Vec4};
use pvrgl::{
    Context, GlError,
    client::{GL_COLOR_ARRAY, GL_NORMAL_ARRAY, GL_TEXTURE_COORD_ARRAY, GL_TEXTURE0, GL_VERTEX_ARRAY},
    modules::{
        Modules,
        lighting::{FixedLighting, Light, MAX_LIGHTS, Material},
        render::StaticRenderState,
        transform::MatrixTransform,
    },
    pvr::{
        self, PolyContext, TextureInfo,
        header::{BlendFactor, Culling, DepthCompare, TextureEnv, TextureFilter, TextureFormat},
    },
    submit::Submission,
};
use serde::Deserialize;
use std::{collections::BTreeMap, path::Path};

/// Contents of a client array.
#[derive(Debug, Clone, Deserialize)]
pub enum Array {
    Bytes(Vec<u8>),
    SignedBytes(Vec<i8>),
    Shorts(Vec<u16>),
    SignedShorts(Vec<i16>),
    Ints(Vec<u32>),
    SignedInts(Vec<i32>),
    Floats(Vec<f32>),
    Doubles(Vec<f64>),
}

impl Array {
    /// Native endian bytes of this array.
    pub fn to_bytes(&self) -> Vec<u8> {
        macro_rules! ne {
            ($values:expr) => {
                $values.iter().flat_map(|v| v.to_ne_bytes()).collect()
            };
        }

        match self {
            Self::Bytes(values) => values.clone(),
            Self::SignedBytes(values) => ne!(values),
            Self::Shorts(values) => ne!(values),
            Self::SignedShorts(values) => ne!(values),
            Self::Ints(values) => ne!(values),
            Self::SignedInts(values) => ne!(values),
            Self::Floats(values) => ne!(values),
            Self::Doubles(values) => ne!(values),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub enum ClientArray {
    Vertex,
    Color,
    Normal,
    TexCoord,
}

impl ClientArray {
    fn gl(self) -> u32 {
        match self {
            Self::Vertex => GL_VERTEX_ARRAY,
            Self::Color => GL_COLOR_ARRAY,
            Self::Normal => GL_NORMAL_ARRAY,
            Self::TexCoord => GL_TEXTURE_COORD_ARRAY,
        }
    }
}

/// Element types, as named in GL.
#[derive(Debug, Clone, Copy, Deserialize)]
pub enum Type {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    Float,
    Double,
    /// A raw enum value, for exercising rejected calls.
    Raw(u32),
}

impl Type {
    fn gl(self) -> u32 {
        match self {
            Self::Byte => 0x1400,
            Self::UnsignedByte => 0x1401,
            Self::Short => 0x1402,
            Self::UnsignedShort => 0x1403,
            Self::Int => 0x1404,
            Self::UnsignedInt => 0x1405,
            Self::Float => 0x1406,
            Self::Double => 0x140A,
            Self::Raw(value) => value,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub enum Mode {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    Triangles,
    TriangleStrip,
    TriangleFan,
    Quads,
    QuadStrip,
    Polygon,
}

impl Mode {
    fn gl(self) -> u32 {
        self as u32
    }
}

fn zero() -> i32 {
    0
}

/// Where pointer data comes from: a named array and a byte offset into it.
#[derive(Debug, Clone, Deserialize)]
pub struct Source {
    pub array: String,
    #[serde(default)]
    pub offset: usize,
}

/// A call to make on the context.
#[derive(Debug, Clone, Deserialize)]
pub enum Command {
    Enable(ClientArray),
    Disable(ClientArray),
    ActiveTexture(u32),
    VertexPointer {
        size: i32,
        ty: Type,
        #[serde(default = "zero")]
        stride: i32,
        source: Source,
    },
    ColorPointer {
        size: i32,
        ty: Type,
        #[serde(default = "zero")]
        stride: i32,
        source: Source,
    },
    TexCoordPointer {
        size: i32,
        ty: Type,
        #[serde(default = "zero")]
        stride: i32,
        source: Source,
    },
    NormalPointer {
        ty: Type,
        #[serde(default = "zero")]
        stride: i32,
        source: Source,
    },
    DrawArrays {
        mode: Mode,
        #[serde(default = "zero")]
        first: i32,
        count: i32,
    },
    DrawElements {
        mode: Mode,
        count: i32,
        ty: Type,
        source: Source,
    },
    /// Logs and clears the current error code.
    GetError,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub enum Screen {
    #[default]
    Identity,
    Viewport { width: f32, height: f32 },
}

/// Column-major matrices.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub screen: Screen,
    pub projection: Option<[f32; 16]>,
    pub modelview: Option<[f32; 16]>,
}

impl Transform {
    fn module(&self) -> MatrixTransform {
        let matrix = |m: Option<[f32; 16]>| m.map_or(Mat4::IDENTITY, |m| Mat4::from_cols_array(&m));
        let screen = match self.screen {
            Screen::Identity => Mat4::IDENTITY,
            Screen::Viewport { width, height } => MatrixTransform::viewport(width, height),
        };

        MatrixTransform::new(screen, matrix(self.projection), matrix(self.modelview))
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, clap::ValueEnum)]
pub enum List {
    #[default]
    Opaque,
    OpaqueModifier,
    Translucent,
    TranslucentModifier,
    PunchThrough,
}

impl From<List> for pvr::ListType {
    fn from(value: List) -> Self {
        match value {
            List::Opaque => Self::Opaque,
            List::OpaqueModifier => Self::OpaqueModifier,
            List::Translucent => Self::Translucent,
            List::TranslucentModifier => Self::TranslucentModifier,
            List::PunchThrough => Self::PunchThrough,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub enum Blend {
    Zero,
    One,
    OtherColor,
    InverseOtherColor,
    SrcAlpha,
    InverseSrcAlpha,
    DstAlpha,
    InverseDstAlpha,
}

impl From<Blend> for BlendFactor {
    fn from(value: Blend) -> Self {
        match value {
            Blend::Zero => Self::Zero,
            Blend::One => Self::One,
            Blend::OtherColor => Self::OtherColor,
            Blend::InverseOtherColor => Self::InverseOtherColor,
            Blend::SrcAlpha => Self::SrcAlpha,
            Blend::InverseSrcAlpha => Self::InverseSrcAlpha,
            Blend::DstAlpha => Self::DstAlpha,
            Blend::InverseDstAlpha => Self::InverseDstAlpha,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub enum Format {
    Argb1555,
    Rgb565,
    Argb4444,
    Yuv422,
    Pal4,
    Pal8,
}

impl From<Format> for TextureFormat {
    fn from(value: Format) -> Self {
        match value {
            Format::Argb1555 => Self::Argb1555,
            Format::Rgb565 => Self::Rgb565,
            Format::Argb4444 => Self::Argb4444,
            Format::Yuv422 => Self::Yuv422,
            Format::Pal4 => Self::Pal4,
            Format::Pal8 => Self::Pal8,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Texture {
    pub width: u16,
    pub height: u16,
    pub format: Format,
    pub address: u32,
    #[serde(default)]
    pub bilinear: bool,
    #[serde(default)]
    pub mipmapped: bool,
}

impl From<Texture> for TextureInfo {
    fn from(value: Texture) -> Self {
        Self {
            width: value.width,
            height: value.height,
            format: value.format.into(),
            address: value.address,
            filter: if value.bilinear {
                TextureFilter::Bilinear
            } else {
                TextureFilter::Nearest
            },
            env: TextureEnv::Modulate,
            mipmapped: value.mipmapped,
            twiddled: true,
        }
    }
}

/// Render state polygon headers are compiled from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Render {
    pub list: List,
    pub depth_write: bool,
    pub cull: bool,
    pub src_blend: Blend,
    pub dst_blend: Blend,
    pub use_alpha: bool,
    pub texture: Option<Texture>,
}

impl Default for Render {
    fn default() -> Self {
        Self {
            list: List::Opaque,
            depth_write: true,
            cull: true,
            src_blend: Blend::One,
            dst_blend: Blend::Zero,
            use_alpha: false,
            texture: None,
        }
    }
}

impl Render {
    fn module(&self) -> StaticRenderState {
        StaticRenderState {
            context: PolyContext {
                list: self.list.into(),
                depth_compare: DepthCompare::Greater,
                depth_write: self.depth_write,
                culling: if self.cull {
                    Culling::CounterClockwise
                } else {
                    Culling::None
                },
                src_blend: self.src_blend.into(),
                dst_blend: self.dst_blend.into(),
                use_alpha: self.use_alpha,
                ..Default::default()
            },
            texture: self.texture.map(Into::into),
        }
    }
}

fn rgba(c: [f32; 4]) -> Rgba {
    Rgba::new(c[0], c[1], c[2], c[3])
}

#[derive(Debug, Clone, Deserialize)]
pub struct SceneLight {
    #[serde(default)]
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    /// `w == 1` for positional lights, `w == 0` for directional ones.
    pub position: [f32; 4],
    #[serde(default = "SceneLight::no_attenuation")]
    pub attenuation: [f32; 3],
}

impl SceneLight {
    fn no_attenuation() -> [f32; 3] {
        [1.0, 0.0, 0.0]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Lighting {
    pub enabled: bool,
    pub ambient: Option<[f32; 4]>,
    pub diffuse: Option<[f32; 4]>,
    pub lights: Vec<SceneLight>,
}

impl Lighting {
    fn module(&self) -> Result<FixedLighting> {
        if self.lights.len() > MAX_LIGHTS {
            eyre_pretty::bail!("at most {MAX_LIGHTS} lights are supported");
        }

        let mut material = Material::default();
        if let Some(ambient) = self.ambient {
            material.ambient = rgba(ambient);
        }
        if let Some(diffuse) = self.diffuse {
            material.diffuse = rgba(diffuse);
        }

        let mut module = FixedLighting {
            enabled: self.enabled,
            material,
            ..Default::default()
        };

        for (slot, light) in module.lights.iter_mut().zip(&self.lights) {
            *slot = Some(Light {
                ambient: rgba(light.ambient),
                diffuse: rgba(light.diffuse),
                position: Vec4::from_array(light.position),
                dist_attenuation: Vec3::from_array(light.attenuation),
            });
        }

        Ok(module)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scene {
    pub arrays: BTreeMap<String, Array>,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default)]
    pub render: Render,
    #[serde(default)]
    pub lighting: Lighting,
    pub commands: Vec<Command>,
}

/// Outcome of a single command.
#[derive(Debug)]
pub enum Outcome {
    Done,
    Submitted(Submission),
    ErrorCode(u32),
    Failed(GlError),
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).context("reading scene file")?;
        ron::from_str(&text).context("parsing scene file")
    }

    /// Native endian bytes of every array, by name.
    pub fn buffers(&self) -> BTreeMap<String, Vec<u8>> {
        self.arrays
            .iter()
            .map(|(name, array)| (name.clone(), array.to_bytes()))
            .collect()
    }

    pub fn modules(&self) -> Result<Modules> {
        Ok(Modules {
            transform: Box::new(self.transform.module()),
            lighting: Box::new(self.lighting.module()?),
            render: Box::new(self.render.module()),
        })
    }

    /// Runs every command against `ctx`, with pointer data taken from `buffers`.
    pub fn run<'data>(
        &self,
        ctx: &mut Context<'data>,
        buffers: &'data BTreeMap<String, Vec<u8>>,
    ) -> Result<Vec<Outcome>> {
        let data = |source: &Source| -> Result<&'data [u8]> {
            let buffer = buffers
                .get(&source.array)
                .with_context(|| format!("no array named {:?}", source.array))?;

            buffer
                .get(source.offset..)
                .with_context(|| format!("offset {} is past the end of {:?}", source.offset, source.array))
        };

        let mut outcomes = Vec::with_capacity(self.commands.len());
        for command in &self.commands {
            let result = match command {
                Command::Enable(array) => ctx.enable_client_state(array.gl()).map(|()| Outcome::Done),
                Command::Disable(array) => {
                    ctx.disable_client_state(array.gl()).map(|()| Outcome::Done)
                }
                Command::ActiveTexture(unit) => ctx
                    .client_active_texture(GL_TEXTURE0.wrapping_add(*unit))
                    .map(|()| Outcome::Done),
                Command::VertexPointer {
                    size,
                    ty,
                    stride,
                    source,
                } => ctx
                    .vertex_pointer(*size, ty.gl(), *stride, data(source)?)
                    .map(|()| Outcome::Done),
                Command::ColorPointer {
                    size,
                    ty,
                    stride,
                    source,
                } => ctx
                    .color_pointer(*size, ty.gl(), *stride, data(source)?)
                    .map(|()| Outcome::Done),
                Command::TexCoordPointer {
                    size,
                    ty,
                    stride,
                    source,
                } => ctx
                    .tex_coord_pointer(*size, ty.gl(), *stride, data(source)?)
                    .map(|()| Outcome::Done),
                Command::NormalPointer { ty, stride, source } => ctx
                    .normal_pointer(ty.gl(), *stride, data(source)?)
                    .map(|()| Outcome::Done),
                Command::DrawArrays { mode, first, count } => ctx
                    .draw_arrays(mode.gl(), *first, *count)
                    .map(Outcome::Submitted),
                Command::DrawElements {
                    mode,
                    count,
                    ty,
                    source,
                } => ctx
                    .draw_elements(mode.gl(), *count, ty.gl(), data(source)?)
                    .map(Outcome::Submitted),
                Command::GetError => Ok(Outcome::ErrorCode(ctx.get_error())),
            };

            outcomes.push(result.unwrap_or_else(Outcome::Failed));
        }

        Ok(outcomes)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SCENE: &str = r#"
        Scene(
            arrays: {
                "positions": Floats([
                    0.0, 0.0, 0.0,
                    1.0, 0.0, 0.0,
                    0.0, 1.0, 0.0,
                ]),
                "colors": Bytes([255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255]),
                "indices": Shorts([2, 1, 0]),
            },
            render: (list: Translucent),
            commands: [
                Enable(Vertex),
                Enable(Color),
                VertexPointer(size: 3, ty: Float, source: (array: "positions")),
                ColorPointer(size: 4, ty: UnsignedByte, source: (array: "colors")),
                DrawArrays(mode: Triangles, count: 3),
                DrawElements(mode: Triangles, count: 3, ty: UnsignedShort, source: (array: "indices")),
                VertexPointer(size: 5, ty: Float, source: (array: "positions")),
                GetError,
            ],
        )
    "#;

    #[test]
    fn runs_scene() {
        let scene: Scene = ron::from_str(SCENE).unwrap();
        let buffers = scene.buffers();
        let mut ctx = Context::new(scene.modules().unwrap());
        let outcomes = scene.run(&mut ctx, &buffers).unwrap();

        assert!(matches!(
            outcomes[4],
            Outcome::Submitted(Submission::Emitted {
                list: pvr::ListType::Translucent,
                vertices: 3
            })
        ));
        assert!(matches!(outcomes[6], Outcome::Failed(_)));
        assert!(matches!(outcomes[7], Outcome::ErrorCode(0x0501)));
        assert_eq!(ctx.lists()[pvr::ListType::Translucent].len(), 8);
    }

    #[test]
    fn missing_array_is_an_error() {
        let scene: Scene = ron::from_str(
            r#"Scene(
                arrays: {},
                commands: [VertexPointer(size: 3, ty: Float, source: (array: "nope"))],
            )"#,
        )
        .unwrap();

        let buffers = scene.buffers();
        let mut ctx = Context::new(scene.modules().unwrap());
        assert!(scene.run(&mut ctx, &buffers).is_err());
    }

    #[test]
    fn huge_texture_unit_is_rejected() {
        let scene: Scene = ron::from_str(
            r#"Scene(
                arrays: {},
                commands: [ActiveTexture(4294967295), GetError],
            )"#,
        )
        .unwrap();

        let buffers = scene.buffers();
        let mut ctx = Context::new(scene.modules().unwrap());
        let outcomes = scene.run(&mut ctx, &buffers).unwrap();

        assert!(matches!(outcomes[0], Outcome::Failed(_)));
        assert!(matches!(outcomes[1], Outcome::ErrorCode(0x0500)));
        assert_eq!(ctx.client().active_texture(), 0);
    }
}
