//! Primitive submission.

use crate::attrib::{self, IndexType};
use crate::client::{Channel, ClientState};
use crate::error::GlError;
use crate::modules::Modules;
use crate::modules::lighting::MAX_LIGHTS;
use color::Argb8888;
use glam::Vec3;
use pvr::{ListType, Lists, ParamControl, PolyHeader, Vertex};
use strum::FromRepr;

/// A primitive mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr)]
#[repr(u32)]
pub enum Mode {
    Points = 0x0,
    Lines = 0x1,
    LineLoop = 0x2,
    LineStrip = 0x3,
    Triangles = 0x4,
    TriangleStrip = 0x5,
    TriangleFan = 0x6,
    Quads = 0x7,
    QuadStrip = 0x8,
    Polygon = 0x9,
}

impl Mode {
    #[inline(always)]
    pub fn from_gl(value: u32) -> Option<Self> {
        Self::from_repr(value)
    }

    /// Number of vertices per strip when submitting `count` vertices.
    #[inline(always)]
    pub fn group_size(self, count: usize) -> usize {
        match self {
            Self::Quads => 4,
            Self::Triangles => 3,
            Self::Lines => 2,
            _ => count,
        }
    }
}

/// An index stream.
#[derive(Debug, Clone, Copy)]
pub struct Indices<'a> {
    pub ty: IndexType,
    pub data: &'a [u8],
}

impl Indices<'_> {
    /// Entry `index` of the stream.
    #[inline(always)]
    pub fn get(&self, index: usize) -> u16 {
        let data = index
            .checked_mul(self.ty.size())
            .and_then(|start| self.data.get(start..))
            .unwrap_or_default();
        attrib::decode_index(data, self.ty)
    }
}

/// Outcome of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The position array is disabled. Nothing was emitted.
    Skipped,
    /// A header and `vertices` vertex records were appended to `list`.
    Emitted { list: ListType, vertices: usize },
}

/// Submits vertices `first..first + count` of the enabled client arrays.
pub fn submit(
    client: &ClientState,
    modules: &mut Modules,
    lists: &mut Lists,
    mode: Mode,
    first: usize,
    count: usize,
    indices: Option<Indices<'_>>,
) -> Result<Submission, GlError> {
    if !client.is_enabled(Channel::Position) {
        tracing::trace!(?mode, first, count, "position array disabled, submission skipped");
        return Ok(Submission::Skipped);
    }

    let color = client
        .is_enabled(Channel::Color)
        .then(|| client.pointer(Channel::Color));
    if let Some(color) = color {
        attrib::check_color_format(color.ty)?;
    }

    // the header takes one slot and the last ordinal must fit
    if count == usize::MAX || first.checked_add(count).is_none() {
        return Err(GlError::invalid_value("submit", count as u32));
    }

    let tex_coord = client.tex_coord_channel();
    let tex_coord = client
        .is_enabled(tex_coord)
        .then(|| client.pointer(tex_coord));
    let normal = client
        .is_enabled(Channel::Normal)
        .then(|| client.pointer(Channel::Normal));
    let position = client.pointer(Channel::Position);

    modules.transform.apply_render();

    let mut ctx = modules.render.context();
    ctx.texture = modules.render.bound_texture();
    let header = PolyHeader::compile(&ctx);

    tracing::trace!(?mode, first, count, list = ?ctx.list, indexed = indices.is_some(), "submitting");

    let mut region = lists[ctx.list].reserve(count + 1);
    region.set_header(&header);

    let lighting = modules.lighting.enabled();
    let group = mode.group_size(count);
    let mut scratch_normal = [0.0, 0.0, 1.0, 0.0];

    for n in 0..count {
        let ordinal = first + n;
        let source = match &indices {
            Some(indices) => indices.get(ordinal) as usize,
            None => ordinal,
        };

        let mut pos = [0.0; 4];
        attrib::decode_floats(
            &mut pos,
            position.element(source),
            position.size as usize,
            position.ty,
        );
        let pos = modules.transform.transform(Vec3::new(pos[0], pos[1], pos[2]));

        let mut argb = match color {
            Some(color) => attrib::decode_color(color.element(source), color.size as usize, color.ty)?,
            None => Argb8888::TRANSPARENT,
        };

        let (u, v) = match tex_coord {
            Some(tex_coord) => {
                let mut uv = [0.0; 4];
                attrib::decode_floats(
                    &mut uv,
                    tex_coord.element(source),
                    tex_coord.size as usize,
                    tex_coord.ty,
                );
                (uv[0], uv[1])
            }
            None => (0.0, 0.0),
        };

        if let Some(normal) = normal {
            attrib::decode_floats(&mut scratch_normal, normal.element(source), 3, normal.ty);
        }

        if lighting {
            let normal = Vec3::new(scratch_normal[0], scratch_normal[1], scratch_normal[2]);
            for light in 0..MAX_LIGHTS {
                if modules.lighting.light_enabled(light) {
                    let contribution = modules.lighting.contribution(light, pos, normal);
                    argb = argb.saturating_add(Argb8888::from(contribution));
                }
            }
        }

        region.set_vertex(
            n,
            &Vertex {
                control: ParamControl::vertex((n + 1) % group == 0),
                x: pos.x,
                y: pos.y,
                z: pos.z,
                argb,
                oargb: Argb8888::TRANSPARENT,
                u,
                v,
            },
        );
    }

    Ok(Submission::Emitted {
        list: ctx.list,
        vertices: count,
    })
}
