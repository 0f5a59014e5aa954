//! Fixed-function vertex array submission.
//!
//! A [`Context`] holds client attribute arrays set through GL-style entry points and turns draw
//! calls into polygon headers and vertex records in the tile accelerator command lists.

pub mod attrib;
pub mod client;
pub mod error;
pub mod modules;
pub mod submit;

use crate::{
    attrib::{ElementType, IndexType},
    client::{Capability, Channel, ClientState, GL_TEXTURE0},
    modules::Modules,
    submit::{Indices, Mode, Submission},
};

pub use crate::error::GlError;
pub use pvr;

/// Converts a signed GL size or count, rejecting negative values.
fn non_negative(call: &'static str, value: i32) -> Result<usize, GlError> {
    usize::try_from(value).map_err(|_| GlError::invalid_value(call, value as u32))
}

/// Validates the arguments of a pointer call.
fn pointer_args(
    call: &'static str,
    size: i32,
    ty: u32,
    stride: i32,
) -> Result<(u8, ElementType, usize), GlError> {
    let ty = ElementType::from_gl(ty).ok_or(GlError::invalid_enum(call, ty))?;
    let stride = non_negative(call, stride)?;
    let size = u8::try_from(size)
        .ok()
        .filter(|size| (1..=4).contains(size))
        .ok_or(GlError::invalid_value(call, size as u32))?;

    Ok((size, ty, stride))
}

/// A vertex submission context.
///
/// Attribute data is borrowed for `'data`, so arrays must outlive every draw call that reads them.
pub struct Context<'data> {
    modules: Modules,
    client: ClientState<'data>,
    lists: pvr::Lists,
    error: Option<GlError>,
}

impl Default for Context<'_> {
    fn default() -> Self {
        Self::new(Modules::default())
    }
}

impl<'data> Context<'data> {
    pub fn new(modules: Modules) -> Self {
        Self {
            modules,
            client: ClientState::default(),
            lists: pvr::Lists::default(),
            error: None,
        }
    }

    #[inline(always)]
    pub fn modules_mut(&mut self) -> &mut Modules {
        &mut self.modules
    }

    #[inline(always)]
    pub fn client(&self) -> &ClientState<'data> {
        &self.client
    }

    #[inline(always)]
    pub fn lists(&self) -> &pvr::Lists {
        &self.lists
    }

    /// Clears every command list. Call at frame boundaries.
    pub fn clear_lists(&mut self) {
        self.lists.clear();
    }

    /// Records the first error since the last [`Context::get_error`] call.
    fn record<T>(&mut self, result: Result<T, GlError>) -> Result<T, GlError> {
        if let Err(err) = &result {
            tracing::warn!("rejected: {err}");
            self.error.get_or_insert(*err);
        }

        result
    }

    /// Returns the code of the first error recorded since the last call and clears it.
    pub fn get_error(&mut self) -> u32 {
        self.error
            .take()
            .map_or(error::GL_NO_ERROR, |err| err.code())
    }

    fn set_client_state(&mut self, call: &'static str, cap: u32, enable: bool) -> Result<(), GlError> {
        let result = Capability::from_gl(cap)
            .ok_or(GlError::invalid_enum(call, cap))
            .map(|cap| {
                let channel = self.client.capability_channel(cap);
                if enable {
                    self.client.enable(channel);
                } else {
                    self.client.disable(channel);
                }
            });

        self.record(result)
    }

    /// Enables a client array. Texture coordinates target the active client texture unit.
    pub fn enable_client_state(&mut self, cap: u32) -> Result<(), GlError> {
        self.set_client_state("glEnableClientState", cap, true)
    }

    pub fn disable_client_state(&mut self, cap: u32) -> Result<(), GlError> {
        self.set_client_state("glDisableClientState", cap, false)
    }

    /// Selects the texture unit texture coordinate arrays are routed to. `texture` is
    /// `GL_TEXTURE0 + n`.
    pub fn client_active_texture(&mut self, texture: u32) -> Result<(), GlError> {
        const CALL: &str = "glClientActiveTexture";

        let result = texture
            .checked_sub(GL_TEXTURE0)
            .and_then(|unit| u8::try_from(unit).ok())
            .ok_or(GlError::invalid_enum(CALL, texture))
            .and_then(|unit| {
                self.client
                    .set_active_texture(unit)
                    .map_err(|_| GlError::invalid_enum(CALL, texture))
            });

        self.record(result)
    }

    fn set_pointer(
        &mut self,
        call: &'static str,
        channel: Channel,
        size: i32,
        ty: u32,
        stride: i32,
        data: &'data [u8],
    ) -> Result<(), GlError> {
        let result = pointer_args(call, size, ty, stride)
            .and_then(|(size, ty, stride)| self.client.set_pointer(channel, size, ty, stride, data));

        self.record(result)
    }

    pub fn vertex_pointer(
        &mut self,
        size: i32,
        ty: u32,
        stride: i32,
        data: &'data [u8],
    ) -> Result<(), GlError> {
        self.set_pointer("glVertexPointer", Channel::Position, size, ty, stride, data)
    }

    pub fn color_pointer(
        &mut self,
        size: i32,
        ty: u32,
        stride: i32,
        data: &'data [u8],
    ) -> Result<(), GlError> {
        self.set_pointer("glColorPointer", Channel::Color, size, ty, stride, data)
    }

    /// Sets the texture coordinate array of the active client texture unit.
    pub fn tex_coord_pointer(
        &mut self,
        size: i32,
        ty: u32,
        stride: i32,
        data: &'data [u8],
    ) -> Result<(), GlError> {
        let channel = self.client.tex_coord_channel();
        self.set_pointer("glTexCoordPointer", channel, size, ty, stride, data)
    }

    /// Sets the normal array. Normals always have three components.
    pub fn normal_pointer(&mut self, ty: u32, stride: i32, data: &'data [u8]) -> Result<(), GlError> {
        self.set_pointer("glNormalPointer", Channel::Normal, 3, ty, stride, data)
    }

    /// Submits vertices `first..first + count`, optionally through an index stream.
    pub fn submit(
        &mut self,
        mode: Mode,
        first: usize,
        count: usize,
        indices: Option<Indices<'_>>,
    ) -> Result<Submission, GlError> {
        let result = submit::submit(
            &self.client,
            &mut self.modules,
            &mut self.lists,
            mode,
            first,
            count,
            indices,
        );

        self.record(result)
    }

    pub fn draw_arrays(&mut self, mode: u32, first: i32, count: i32) -> Result<Submission, GlError> {
        const CALL: &str = "glDrawArrays";

        let args = Mode::from_gl(mode)
            .ok_or(GlError::invalid_enum(CALL, mode))
            .and_then(|mode| Ok((mode, non_negative(CALL, first)?, non_negative(CALL, count)?)));

        let (mode, first, count) = self.record(args)?;
        self.submit(mode, first, count, None)
    }

    pub fn draw_elements(
        &mut self,
        mode: u32,
        count: i32,
        ty: u32,
        indices: &[u8],
    ) -> Result<Submission, GlError> {
        const CALL: &str = "glDrawElements";

        let args = Mode::from_gl(mode)
            .ok_or(GlError::invalid_enum(CALL, mode))
            .and_then(|mode| {
                let ty = IndexType::from_gl(ty).ok_or(GlError::invalid_enum(CALL, ty))?;
                Ok((mode, non_negative(CALL, count)?, ty))
            });

        let (mode, count, ty) = self.record(args)?;
        self.submit(mode, 0, count, Some(Indices { ty, data: indices }))
    }
}
