use folio_engine::compositor::{CameraUniform, ChromeStyle, CLEAR_COLOR};
use folio_engine::coords::Vec2;
use folio_engine::core::{App, AppControl, FrameCtx};
use folio_engine::render::CompositorRenderer;

use crate::pages::PageImages;

/// Fixed view parameters for the session.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewState {
    pub zoom: f32,
    pub pan: Vec2,
    pub side_panel: bool,
}

/// Windowed viewer: uploads the page on the first frame, then composites it
/// on every redraw.
pub struct ViewerApp {
    pending: Option<PageImages>,
    renderer: CompositorRenderer,
    view: ViewState,
}

impl ViewerApp {
    pub fn new(pages: PageImages, style: ChromeStyle, view: ViewState) -> Self {
        Self {
            pending: Some(pages),
            renderer: CompositorRenderer::new(style),
            view,
        }
    }
}

impl App for ViewerApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if let Some(pages) = self.pending.take() {
            let info = ctx.gpu.adapter_info();
            log::debug!("uploading page on {} ({:?})", info.name, info.backend);

            let rctx = ctx.render_ctx();
            if let Err(e) = self
                .renderer
                .set_pages(&rctx, &pages.document, pages.annotation.as_ref())
            {
                log::error!("cannot upload page: {e}");
                return AppControl::Exit;
            }
        }

        // Recomputed per frame; the aspect follows the window.
        let camera = CameraUniform::from_view(
            self.view.zoom,
            self.view.pan,
            ctx.window.viewport(),
            self.view.side_panel,
        );

        let renderer = &mut self.renderer;
        ctx.render(CLEAR_COLOR, |rctx, target| renderer.render(rctx, target, &camera))
    }
}
