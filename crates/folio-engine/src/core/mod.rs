//! Contracts between the window runtime and the application.
//!
//! The runtime owns the window and its GPU context; the application only sees a
//! [`FrameCtx`] once per redraw.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
