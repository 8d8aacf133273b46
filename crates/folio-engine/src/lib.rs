//! Folio engine crate.
//!
//! Composites a rasterized document page, its annotation layer and
//! procedural UI chrome into one image. The compositor math lives in
//! [`compositor`] as a CPU reference; [`render`] runs the same math on the
//! GPU through wgpu, inside the window runtime from [`window`].

pub mod core;
pub mod device;
pub mod window;

pub mod compositor;
pub mod coords;
pub mod logging;
pub mod render;
