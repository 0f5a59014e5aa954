//! Client attribute arrays.

use crate::attrib::ElementType;
use crate::error::GlError;
use strum::{FromRepr, VariantArray};

pub const GL_VERTEX_ARRAY: u32 = 0x8074;
pub const GL_NORMAL_ARRAY: u32 = 0x8075;
pub const GL_COLOR_ARRAY: u32 = 0x8076;
pub const GL_TEXTURE_COORD_ARRAY: u32 = 0x8078;

pub const GL_TEXTURE0: u32 = 0x84C0;

/// Number of texture units with their own coordinate array.
pub const MAX_TEXTURE_UNITS: u32 = 2;

/// A vertex attribute channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, VariantArray)]
pub enum Channel {
    Position,
    Color,
    TexCoord0,
    TexCoord1,
    Normal,
}

impl Channel {
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The texture coordinate channel of texture `unit`.
    #[inline(always)]
    pub fn tex_coord(unit: u8) -> Self {
        if unit == 0 {
            Self::TexCoord0
        } else {
            Self::TexCoord1
        }
    }
}

/// A client array capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr)]
#[repr(u32)]
pub enum Capability {
    VertexArray = 0x8074,
    NormalArray = 0x8075,
    ColorArray = 0x8076,
    TextureCoordArray = 0x8078,
}

impl Capability {
    #[inline(always)]
    pub fn from_gl(value: u32) -> Option<Self> {
        Self::from_repr(value)
    }
}

/// Describes where and how the elements of an attribute are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttribPointer<'data> {
    pub data: &'data [u8],
    /// Bytes between consecutive elements. Zero means tightly packed.
    pub stride: usize,
    pub ty: ElementType,
    /// Component count, 1 to 4.
    pub size: u8,
}

impl<'data> AttribPointer<'data> {
    const fn unset(size: u8) -> Self {
        Self {
            data: &[],
            stride: 0,
            ty: ElementType::Float,
            size,
        }
    }

    /// Bytes between consecutive elements.
    #[inline(always)]
    pub fn effective_stride(&self) -> usize {
        if self.stride == 0 {
            self.size as usize * self.ty.size()
        } else {
            self.stride
        }
    }

    /// The bytes of element `index`. Elements past the end of the data are empty.
    #[inline(always)]
    pub fn element(&self, index: usize) -> &'data [u8] {
        let data: &'data [u8] = self.data;
        index
            .checked_mul(self.effective_stride())
            .and_then(|start| data.get(start..))
            .unwrap_or_default()
    }
}

/// The client attribute arrays and their enable bits.
#[derive(Debug, Clone)]
pub struct ClientState<'data> {
    pointers: [AttribPointer<'data>; 5],
    enabled: u8,
    active_texture: u8,
}

impl Default for ClientState<'_> {
    fn default() -> Self {
        Self {
            pointers: [
                AttribPointer::unset(4),
                AttribPointer::unset(4),
                AttribPointer::unset(4),
                AttribPointer::unset(4),
                AttribPointer::unset(3),
            ],
            enabled: 0,
            active_texture: 0,
        }
    }
}

impl<'data> ClientState<'data> {
    #[inline(always)]
    pub fn pointer(&self, channel: Channel) -> &AttribPointer<'data> {
        &self.pointers[channel.index()]
    }

    /// Sets the array of `channel`. Its enable bit is left as is.
    pub fn set_pointer(
        &mut self,
        channel: Channel,
        size: u8,
        ty: ElementType,
        stride: usize,
        data: &'data [u8],
    ) -> Result<(), GlError> {
        if !(1..=4).contains(&size) {
            return Err(GlError::invalid_value("set_pointer", size as u32));
        }

        self.pointers[channel.index()] = AttribPointer {
            data,
            stride,
            ty,
            size,
        };

        tracing::debug!(?channel, size, ?ty, stride, len = data.len(), "attribute pointer set");
        Ok(())
    }

    #[inline(always)]
    pub fn is_enabled(&self, channel: Channel) -> bool {
        self.enabled & (1 << channel.index()) != 0
    }

    pub fn enable(&mut self, channel: Channel) {
        self.enabled |= 1 << channel.index();
        tracing::debug!(?channel, "channel enabled");
    }

    pub fn disable(&mut self, channel: Channel) {
        self.enabled &= !(1 << channel.index());
        tracing::debug!(?channel, "channel disabled");
    }

    /// The channel a capability currently targets.
    #[inline(always)]
    pub fn capability_channel(&self, cap: Capability) -> Channel {
        match cap {
            Capability::VertexArray => Channel::Position,
            Capability::NormalArray => Channel::Normal,
            Capability::ColorArray => Channel::Color,
            Capability::TextureCoordArray => self.tex_coord_channel(),
        }
    }

    /// The active client texture unit.
    #[inline(always)]
    pub fn active_texture(&self) -> u8 {
        self.active_texture
    }

    /// Texture coordinate channel of the active client texture unit.
    #[inline(always)]
    pub fn tex_coord_channel(&self) -> Channel {
        Channel::tex_coord(self.active_texture)
    }

    pub fn set_active_texture(&mut self, unit: u8) -> Result<(), GlError> {
        if unit as u32 >= MAX_TEXTURE_UNITS {
            return Err(GlError::invalid_enum(
                "set_active_texture",
                GL_TEXTURE0 + unit as u32,
            ));
        }

        self.active_texture = unit;
        tracing::debug!(unit, "active client texture changed");
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let state = ClientState::default();
        for &channel in Channel::VARIANTS {
            let pointer = state.pointer(channel);
            assert!(!state.is_enabled(channel));
            assert_eq!(pointer.ty, ElementType::Float);
            assert_eq!(pointer.stride, 0);
            assert!(pointer.data.is_empty());
        }

        assert_eq!(state.pointer(Channel::Position).size, 4);
        assert_eq!(state.pointer(Channel::Normal).size, 3);
        assert_eq!(state.active_texture(), 0);
    }

    #[test]
    fn reenabling_keeps_pointer() {
        let data = [0u8; 24];
        let mut state = ClientState::default();
        state
            .set_pointer(Channel::Color, 3, ElementType::UnsignedByte, 8, &data)
            .unwrap();
        state.enable(Channel::Color);
        state.disable(Channel::Color);
        assert!(!state.is_enabled(Channel::Color));
        state.enable(Channel::Color);

        let pointer = state.pointer(Channel::Color);
        assert!(state.is_enabled(Channel::Color));
        assert_eq!(pointer.size, 3);
        assert_eq!(pointer.stride, 8);
        assert_eq!(pointer.ty, ElementType::UnsignedByte);
        assert_eq!(pointer.data.len(), 24);
    }

    #[test]
    fn rejects_bad_sizes() {
        let mut state = ClientState::default();
        for size in [0, 5] {
            assert_eq!(
                state.set_pointer(Channel::Position, size, ElementType::Float, 0, &[]),
                Err(GlError::invalid_value("set_pointer", size as u32))
            );
        }
        assert_eq!(state.pointer(Channel::Position).size, 4);
    }

    #[test]
    fn texture_unit_routing() {
        let mut state = ClientState::default();
        assert_eq!(
            state.capability_channel(Capability::TextureCoordArray),
            Channel::TexCoord0
        );

        state.set_active_texture(1).unwrap();
        assert_eq!(
            state.capability_channel(Capability::TextureCoordArray),
            Channel::TexCoord1
        );

        assert!(state.set_active_texture(2).is_err());
        assert_eq!(state.active_texture(), 1);
    }

    #[test]
    fn effective_stride() {
        let data = [0u8; 64];
        let mut pointer = AttribPointer {
            data: &data,
            stride: 0,
            ty: ElementType::Short,
            size: 3,
        };
        assert_eq!(pointer.effective_stride(), 6);
        assert_eq!(pointer.element(2).len(), 64 - 12);

        pointer.stride = 16;
        assert_eq!(pointer.element(1).len(), 48);
        assert!(pointer.element(10).is_empty());
        assert!(pointer.element(usize::MAX).is_empty());
    }
}
