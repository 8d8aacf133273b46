//! Coordinate and color types shared by the compositor and the GPU renderer.
//!
//! Conventions:
//! - `tex_coords` in `[0, 1]`, origin at the page image's top-left texel
//! - `uv_screen = (tex.x, 1 - tex.y)`; every UI region test reads this
//! - clip space is the usual `[-1, 1]` square with +Y up, so with the
//!   standard quad `uv_screen` also grows toward the top of the window

mod color;
mod vec2;
mod viewport;

pub use color::ColorRgba;
pub use vec2::Vec2;
pub use viewport::Viewport;
