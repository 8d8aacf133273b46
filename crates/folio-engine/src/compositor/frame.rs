use image::RgbaImage;
use rayon::prelude::*;

use crate::coords::{ColorRgba, Viewport};

use super::texture::PageLayers;
use super::{CameraUniform, Compositor};

/// Linear-space output of a CPU frame, row-major, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<ColorRgba>,
}

impl FrameBuffer {
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<ColorRgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize).copied()
    }

    pub fn pixels(&self) -> &[ColorRgba] {
        &self.pixels
    }

    /// sRGB-encodes the frame, as an sRGB surface would on write.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.width, self.height);
        for (dst, src) in image.pixels_mut().zip(&self.pixels) {
            dst.0 = src.to_srgb_u8();
        }
        image
    }
}

/// Shades every pixel of a `width x height` target on the rayon pool.
///
/// Rows are independent work items; each invocation reads the shared inputs
/// and writes only its own output slot.
pub fn render_frame(
    compositor: &Compositor,
    pages: &PageLayers,
    camera: &CameraUniform,
    width: u32,
    height: u32,
) -> FrameBuffer {
    let viewport = Viewport::from_pixels(width, height);
    let mut pixels = vec![ColorRgba::default(); width as usize * height as usize];

    if width > 0 {
        pixels
            .par_chunks_mut(width as usize)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, px) in row.iter_mut().enumerate() {
                    *px = compositor.shade_pixel(x as u32, y as u32, viewport, pages, camera);
                }
            });
    }

    log::debug!("rendered {width}x{height} reference frame");

    FrameBuffer { width, height, pixels }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::sdf::glass_noise;
    use crate::compositor::texture::CpuTexture;
    use crate::compositor::{composite_over, fragment_at, CLEAR_COLOR};
    use crate::coords::Vec2;

    const RED: ColorRgba = ColorRgba::new(1.0, 0.0, 0.0, 1.0);

    fn red_page() -> PageLayers {
        PageLayers::document_only(CpuTexture::solid(16, 16, RED))
    }

    #[test]
    fn parallel_frame_matches_per_pixel_evaluation() {
        let c = Compositor::default();
        let pages = red_page();
        let camera = CameraUniform::from_view(0.8, Vec2::new(0.1, 0.0), Viewport::new(48.0, 32.0), true);
        let frame = render_frame(&c, &pages, &camera, 48, 32);
        let vp = Viewport::new(48.0, 32.0);

        for y in 0..32 {
            for x in 0..48 {
                assert_eq!(frame.pixel(x, y), Some(c.shade_pixel(x, y, vp, &pages, &camera)));
            }
        }
        assert_eq!(frame.pixel(48, 0), None);
    }

    #[test]
    fn red_page_end_to_end() {
        let c = Compositor::default();
        let pages = red_page();
        let camera = CameraUniform::default();
        let (w, h) = (100, 100);
        let frame = render_frame(&c, &pages, &camera, w, h);
        let vp = Viewport::from_pixels(w, h);
        let bar = &c.style().bottom_bar;

        for y in 0..h {
            for x in 0..w {
                let out = frame.pixel(x, y).unwrap();
                let uv = fragment_at(Vec2::new(x as f32 + 0.5, y as f32 + 0.5), vp, &camera)
                    .unwrap()
                    .uv_screen;

                if uv.y <= bar.threshold {
                    assert_eq!(out, RED, "({x}, {y})");
                    continue;
                }

                let near_button = bar
                    .buttons
                    .iter()
                    .any(|b| uv.distance(b.center) <= b.radius + bar.edge_width);
                if near_button {
                    continue;
                }

                let glass = RED.mix(bar.glass, 0.9).offset(glass_noise(uv) * 0.01).clamped();
                let glass = composite_over(glass, CLEAR_COLOR);
                assert!(out.max_abs_diff(glass) < 1e-6, "({x}, {y}): {out:?}");
            }
        }

        // Pixel on the pen button center shows the pen color.
        let pen = bar.buttons[1];
        let px = (pen.center.x * w as f32) as u32;
        let py = ((1.0 - pen.center.y) * h as f32) as u32;
        assert!(frame.pixel(px, py).unwrap().max_abs_diff(pen.color) < 0.05);
    }

    #[test]
    fn side_panel_band_follows_flag() {
        let c = Compositor::default();
        let pages = red_page();
        let (w, h) = (50, 50);

        let closed = render_frame(&c, &pages, &CameraUniform::default(), w, h);
        let open = render_frame(&c, &pages, &CameraUniform::default().with_side_panel(true), w, h);

        // Rows 10.. sit below the toolbar band (uv_screen.y <= 0.79).
        for y in 10..h {
            for x in 0..w {
                let in_band = (x as f32 + 0.5) / (w as f32) < 0.2;
                let (a, b) = (closed.pixel(x, y).unwrap(), open.pixel(x, y).unwrap());
                assert_eq!(a, RED);
                if in_band {
                    // Red is mixed 95% toward near-black glass, then over the clear color.
                    assert!(b.r < 0.2, "({x}, {y}): {b:?}");
                } else {
                    assert_eq!(b, RED);
                }
            }
        }
    }

    #[test]
    fn zoomed_out_frame_shows_clear_border() {
        let c = Compositor::default();
        let camera = CameraUniform { scale: [0.5, 0.5], ..CameraUniform::default() };
        let frame = render_frame(&c, &red_page(), &camera, 20, 20);
        assert_eq!(frame.pixel(0, 0), Some(CLEAR_COLOR));
        assert_eq!(frame.pixel(10, 10), Some(RED));
    }

    #[test]
    fn image_export_encodes_srgb() {
        let c = Compositor::default();
        let frame = render_frame(&c, &red_page(), &CameraUniform::default(), 4, 4);
        let img = frame.to_rgba_image();
        assert_eq!(img.dimensions(), (4, 4));
        assert_eq!(img.get_pixel(1, 1).0, [255, 0, 0, 255]);
    }

    #[test]
    fn empty_target_is_empty_frame() {
        let frame = render_frame(&Compositor::default(), &red_page(), &CameraUniform::default(), 0, 10);
        assert_eq!(frame.size(), (0, 10));
        assert!(frame.pixels().is_empty());
    }
}
