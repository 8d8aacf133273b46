//! Document compositor: the per-vertex and per-pixel math of the page pipeline.
//!
//! Pipeline per pixel:
//! 1. transform stage maps the quad into clip space and derives `uv_screen`
//! 2. document and annotation samples are blended
//! 3. chrome layers (bottom bar, side panel) apply in order where their
//!    region test holds
//! 4. the result is clamped to `[0, 1]`
//! 5. it is alpha-blended over the clear color, as the GPU output merge does
//!
//! This module is the CPU reference. `render::compositor` runs the same math
//! on the GPU from a WGSL source generated with the same [`ChromeStyle`].

mod blend;
mod chrome;
mod error;
mod frame;
mod shade;
mod texture;
mod transform;
mod uniform;

pub mod sdf;

pub use blend::{blend_annotation, composite_over};
pub use chrome::{BottomBar, ButtonKind, ButtonStyle, ChromeLayer, ChromeStyle, SidePanel};
pub use error::{check_page_sizes, CompositorError};
pub use frame::{render_frame, FrameBuffer};
pub use shade::{Compositor, CLEAR_COLOR};
pub use texture::{CpuTexture, PageLayers};
pub use transform::{fragment_at, transform_vertex, Fragment, Vertex, QUAD_INDICES, QUAD_VERTICES};
pub use uniform::{CameraUniform, MAX_ZOOM, MIN_ZOOM};
