use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize, Size};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};

/// Title and initial inner size of the viewer window.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Logical or physical; physical sizes ignore the display scale factor.
    pub initial_size: Size,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "folio".to_string(),
            initial_size: LogicalSize::new(1200.0, 800.0).into(),
        }
    }
}

/// Requests an app can make from inside `on_frame`.
///
/// They are recorded during the callback and applied once it returns.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    redraw: bool,
    exit: bool,
}

impl RuntimeCtx {
    /// Schedules another redraw; there is no continuous redraw.
    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    /// Closes the window and leaves the event loop.
    pub fn exit(&mut self) {
        self.exit = true;
    }
}

/// Single-window event loop driving a [`App`].
pub struct Runtime;

impl Runtime {
    /// Opens the window and drives `app` until the window is closed or the
    /// app asks to exit. A window or GPU setup failure is returned here.
    pub fn run<A: App + 'static>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = ViewerLoop {
            config,
            gpu_init,
            app,
            entry: None,
            failure: None,
            done: false,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.failure.map_or(Ok(()), Err)
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

impl WindowEntry {
    fn open(event_loop: &ActiveEventLoop, config: &RuntimeConfig, gpu_init: GpuInit) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size);
        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")
    }

    fn redraw(&self) {
        self.with_window(|w| w.request_redraw());
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        log::debug!("resized to {}x{}", size.width, size.height);
        self.with_gpu_mut(|gpu| gpu.resize(size));
        self.redraw();
    }
}

struct ViewerLoop<A> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    failure: Option<anyhow::Error>,
    done: bool,
}

impl<A: App + 'static> ViewerLoop<A> {
    fn finish(&mut self, event_loop: &ActiveEventLoop) {
        self.done = true;
        // Dropping the entry releases the surface before the window.
        self.entry = None;
        event_loop.exit();
    }

    fn draw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        let mut runtime = RuntimeCtx::default();
        let app = &mut self.app;
        let control = entry.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: WindowCtx { window: fields.window },
                gpu: fields.gpu,
                runtime: &mut runtime,
            };
            app.on_frame(&mut ctx)
        });

        if control == AppControl::Exit || runtime.exit {
            self.finish(event_loop);
        } else if runtime.redraw {
            entry.redraw();
        }
    }
}

impl<A: App + 'static> ApplicationHandler for ViewerLoop<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.done {
            return;
        }

        match WindowEntry::open(event_loop, &self.config, self.gpu_init.clone()) {
            Ok(entry) => {
                entry.redraw();
                self.entry = Some(entry);
            }
            Err(e) => {
                log::error!("failed to create viewer window: {e:#}");
                self.failure = Some(e);
                self.finish(event_loop);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.done {
            event_loop.exit();
            return;
        }

        // Nothing animates; frames are driven by resize and expose events.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.done {
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.finish(event_loop),
            WindowEvent::Resized(size) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.resize(size);
                }
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    let size = entry.with_window(|w| w.inner_size());
                    entry.resize(size);
                }
            }
            WindowEvent::RedrawRequested => self.draw(event_loop),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_start_cleared() {
        let ctx = RuntimeCtx::default();
        assert!(!ctx.redraw && !ctx.exit);
    }

    #[test]
    fn requests_are_recorded() {
        let mut ctx = RuntimeCtx::default();
        ctx.request_redraw();
        assert!(ctx.redraw && !ctx.exit);
        ctx.exit();
        assert!(ctx.exit);
    }

    #[test]
    fn default_config_matches_viewer_window() {
        let config = RuntimeConfig::default();
        assert_eq!(config.title, "folio");
        assert_eq!(config.initial_size, Size::Logical(LogicalSize::new(1200.0, 800.0)));
    }
}
