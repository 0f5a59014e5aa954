//! The tile accelerator command stream.
//!
//! Geometry is submitted to the hardware as a flat stream of 32-byte records. Each record starts
//! with a [`ParamControl`] word that tags it: a polygon header configures the rasterizer for the
//! vertices that follow it, and vertex records carry a single vertex each, with an end-of-strip
//! bit delimiting primitives.

pub mod cmd;
pub mod header;
pub mod list;
pub mod vertex;

pub use cmd::{ListType, ParamControl, ParamType};
pub use header::{PolyContext, PolyHeader, TextureInfo};
pub use list::{Command, CommandList, Lists, Record, Region};
pub use vertex::Vertex;

pub use bitos;
pub use color;
