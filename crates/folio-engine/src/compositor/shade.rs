use crate::coords::{ColorRgba, Vec2, Viewport};

use super::blend::{blend_annotation, composite_over};
use super::chrome::ChromeStyle;
use super::texture::PageLayers;
use super::{fragment_at, CameraUniform, Fragment};

/// Color for pixels outside the page quad; the GPU pass clears to the same value.
pub const CLEAR_COLOR: ColorRgba = ColorRgba::new(0.05, 0.05, 0.05, 1.0);

/// CPU reference of the pixel stage.
///
/// Holds no per-frame state: every call depends only on its arguments and the
/// style, so pixels can be shaded in any order or in parallel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compositor {
    style: ChromeStyle,
}

impl Compositor {
    pub fn new(style: ChromeStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &ChromeStyle {
        &self.style
    }

    /// Blend, then every active chrome layer in order, then clamp.
    pub fn shade(
        &self,
        fragment: &Fragment,
        document: ColorRgba,
        annotation: ColorRgba,
        camera: &CameraUniform,
    ) -> ColorRgba {
        let base = blend_annotation(document, annotation);
        self.style
            .layers()
            .into_iter()
            .filter(|layer| layer.contains(fragment, camera))
            .fold(base, |color, layer| layer.apply(color, fragment, camera))
            .clamped()
    }

    /// Samples both layers at the fragment and shades it.
    pub fn shade_fragment(
        &self,
        fragment: &Fragment,
        pages: &PageLayers,
        camera: &CameraUniform,
    ) -> ColorRgba {
        let (document, annotation) = pages.sample(fragment.tex_coords);
        self.shade(fragment, document, annotation, camera)
    }

    /// Final framebuffer value at integer pixel `(x, y)` of `viewport`: the
    /// shaded fragment alpha-blended over [`CLEAR_COLOR`], or the clear color
    /// itself where the quad does not cover the pixel.
    pub fn shade_pixel(
        &self,
        x: u32,
        y: u32,
        viewport: Viewport,
        pages: &PageLayers,
        camera: &CameraUniform,
    ) -> ColorRgba {
        let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
        match fragment_at(center, viewport, camera) {
            Some(fragment) => {
                composite_over(self.shade_fragment(&fragment, pages, camera), CLEAR_COLOR)
            }
            None => CLEAR_COLOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::chrome::ChromeLayer;
    use crate::compositor::texture::CpuTexture;
    use crate::compositor::{transform_vertex, Vertex};

    const RED: ColorRgba = ColorRgba::new(1.0, 0.0, 0.0, 1.0);

    fn frag(x: f32, y: f32) -> Fragment {
        transform_vertex(
            &Vertex { position: [0.0, 0.0, 0.0], tex_coords: [x, 1.0 - y] },
            &CameraUniform::default(),
        )
    }

    #[test]
    fn page_area_is_plain_blend() {
        let c = Compositor::default();
        let camera = CameraUniform::default().with_side_panel(true);
        let ann = ColorRgba::new(1.0, 1.0, 0.0, 1.0);
        let out = c.shade(&frag(0.5, 0.5), RED, ann, &camera);
        assert_eq!(out, blend_annotation(RED, ann));
    }

    #[test]
    fn layers_apply_bar_then_panel() {
        let c = Compositor::default();
        let camera = CameraUniform::default().with_side_panel(true);
        let f = frag(0.05, 0.95);

        let bar = &c.style().bottom_bar;
        let panel = &c.style().side_panel;
        let expected = panel.apply(bar.apply(RED, &f, &camera), &f, &camera).clamped();
        assert_eq!(c.shade(&f, RED, ColorRgba::transparent(), &camera), expected);

        let reversed = bar.apply(panel.apply(RED, &f, &camera), &f, &camera).clamped();
        assert_ne!(expected, reversed);
    }

    #[test]
    fn output_is_clamped() {
        let c = Compositor::default();
        let camera = CameraUniform::default();
        // White page + glass grain can exceed 1 before clamping.
        for i in 0..50 {
            let f = frag(0.7 + i as f32 * 0.001, 0.9 + i as f32 * 0.001);
            let out = c.shade(&f, ColorRgba::white(), ColorRgba::transparent(), &camera);
            for v in out.to_array() {
                assert!((0.0..=1.0).contains(&v), "{out:?}");
            }
        }
    }

    #[test]
    fn shading_is_deterministic() {
        let c = Compositor::default();
        let pages = PageLayers::document_only(CpuTexture::solid(8, 8, RED));
        let camera = CameraUniform::default().with_side_panel(true);
        let vp = Viewport::new(64.0, 64.0);
        for (x, y) in [(0, 0), (3, 62), (40, 60), (32, 32), (63, 63)] {
            let a = c.shade_pixel(x, y, vp, &pages, &camera);
            let b = c.shade_pixel(x, y, vp, &pages, &camera);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn translucent_page_shows_clear_color_through() {
        let c = Compositor::default();
        let half = ColorRgba::new(1.0, 1.0, 1.0, 0.5);
        let pages = PageLayers::document_only(CpuTexture::solid(8, 8, half));
        let vp = Viewport::new(10.0, 10.0);
        let out = c.shade_pixel(5, 5, vp, &pages, &CameraUniform::default());
        assert!(out.max_abs_diff(ColorRgba::new(0.525, 0.525, 0.525, 1.0)) < 1e-6, "{out:?}");
    }

    #[test]
    fn uncovered_pixels_get_clear_color() {
        let c = Compositor::default();
        let pages = PageLayers::document_only(CpuTexture::solid(8, 8, RED));
        let camera = CameraUniform { scale: [0.5, 0.5], ..CameraUniform::default() };
        let vp = Viewport::new(100.0, 100.0);
        assert_eq!(c.shade_pixel(0, 0, vp, &pages, &camera), CLEAR_COLOR);
        assert_eq!(c.shade_pixel(50, 50, vp, &pages, &camera), RED);
    }
}
