//! Render state module interface.

use pvr::{PolyContext, TextureInfo};

/// Trait for render state modules. These supply the state polygon headers are compiled from.
pub trait RenderModule {
    fn context(&self) -> PolyContext;
    fn bound_texture(&self) -> Option<TextureInfo>;
}

/// A [`RenderModule`] returning fixed state.
#[derive(Debug, Clone, Default)]
pub struct StaticRenderState {
    pub context: PolyContext,
    pub texture: Option<TextureInfo>,
}

impl RenderModule for StaticRenderState {
    fn context(&self) -> PolyContext {
        self.context
    }

    fn bound_texture(&self) -> Option<TextureInfo> {
        self.texture
    }
}
