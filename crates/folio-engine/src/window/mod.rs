//! Event loop for the single viewer window.
//!
//! Owns the `winit` event loop and the window, with its GPU context borrowed
//! from it.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
