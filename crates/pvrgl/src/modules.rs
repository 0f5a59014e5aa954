//! Pipeline modules.
//!
//! Modules provide the submission engine with functionality that lives outside of it, such as
//! coordinate transforms, lighting and render state, but do not take part in vertex submission
//! themselves.

pub mod lighting;
pub mod render;
pub mod transform;

use lighting::LightingModule;
use render::RenderModule;
use transform::TransformModule;

/// The modules a [`Context`](crate::Context) is built with.
pub struct Modules {
    pub transform: Box<dyn TransformModule>,
    pub lighting: Box<dyn LightingModule>,
    pub render: Box<dyn RenderModule>,
}

impl Default for Modules {
    fn default() -> Self {
        Self {
            transform: Box::new(transform::MatrixTransform::default()),
            lighting: Box::new(lighting::NopLightingModule),
            render: Box::new(render::StaticRenderState::default()),
        }
    }
}
