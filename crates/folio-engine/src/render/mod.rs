//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers, textures) and
//! record passes into a [`RenderTarget`] handed out once per frame.
//!
//! Convention:
//! - `RenderCtx::viewport` is the surface size in physical pixels.
//! - Passes load the target; the frame clear happens before any renderer runs.

mod compositor;
mod ctx;
mod shader;
mod texture;

pub use compositor::CompositorRenderer;
pub use ctx::{RenderCtx, RenderTarget};
pub use shader::compositor_wgsl;
pub use texture::PageTexture;
