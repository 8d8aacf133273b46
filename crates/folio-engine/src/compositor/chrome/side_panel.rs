use crate::compositor::sdf::fract;
use crate::compositor::{CameraUniform, Fragment};
use crate::coords::{ColorRgba, Vec2};

use super::ChromeLayer;

/// Thumbnail carousel along the left edge, shown while `ui_flags.x` is set.
///
/// Thumbnails are placeholders only; no page images are sampled here.
#[derive(Debug, Clone, PartialEq)]
pub struct SidePanel {
    /// Region is `uv_screen.x < threshold` (and the panel flag set).
    pub threshold: f32,
    pub glass: ColorRgba,
    pub glass_mix: f32,
    /// Number of thumbnail bands stacked over the full screen height.
    pub thumbnail_count: f32,
    /// Horizontal extent `(min, max)` of each thumbnail, exclusive.
    pub thumbnail_margin: Vec2,
    /// Fraction of each band left empty at its top and bottom.
    pub thumbnail_gap: f32,
    /// Placeholder color; its alpha is the blend weight.
    pub thumbnail_color: ColorRgba,
}

impl Default for SidePanel {
    fn default() -> Self {
        Self {
            threshold: 0.2,
            glass: ColorRgba::new(0.05, 0.05, 0.05, 0.95),
            glass_mix: 0.95,
            thumbnail_count: 5.0,
            thumbnail_margin: Vec2::new(0.02, 0.18),
            thumbnail_gap: 0.1,
            thumbnail_color: ColorRgba::new(1.0, 1.0, 1.0, 0.1),
        }
    }
}

impl SidePanel {
    /// Whether `uv` falls on a thumbnail placeholder (inside the panel).
    pub fn on_thumbnail(&self, uv: Vec2) -> bool {
        let band = fract(uv.y * self.thumbnail_count);
        uv.x > self.thumbnail_margin.x
            && uv.x < self.thumbnail_margin.y
            && band > self.thumbnail_gap
            && band < 1.0 - self.thumbnail_gap
    }
}

impl ChromeLayer for SidePanel {
    fn contains(&self, fragment: &Fragment, camera: &CameraUniform) -> bool {
        camera.side_panel_open() && fragment.uv_screen.x < self.threshold
    }

    fn apply(&self, color: ColorRgba, fragment: &Fragment, _camera: &CameraUniform) -> ColorRgba {
        let color = color.mix(self.glass, self.glass_mix);
        if self.on_thumbnail(fragment.uv_screen) {
            color.mix(self.thumbnail_color, self.thumbnail_color.a)
        } else {
            color
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag_at(x: f32, y: f32) -> Fragment {
        Fragment {
            clip_position: [0.0, 0.0, 0.0, 1.0],
            tex_coords: Vec2::new(x, 1.0 - y),
            uv_screen: Vec2::new(x, y),
        }
    }

    #[test]
    fn hidden_while_flag_is_clear() {
        let panel = SidePanel::default();
        let closed = CameraUniform::default();
        let open = closed.with_side_panel(true);

        for i in 0..40 {
            let f = frag_at(0.195 * i as f32 / 40.0, i as f32 / 40.0);
            assert!(!panel.contains(&f, &closed), "{f:?}");
            assert!(panel.contains(&f, &open), "{f:?}");
        }
        assert!(!panel.contains(&frag_at(0.2, 0.5), &open));
    }

    #[test]
    fn glass_is_near_opaque() {
        let panel = SidePanel::default();
        let camera = CameraUniform::default().with_side_panel(true);
        // x = 0.01 is left of the thumbnail margin.
        let out = panel.apply(ColorRgba::white(), &frag_at(0.01, 0.5), &camera);
        let expected = ColorRgba::white().mix(panel.glass, 0.95);
        assert_eq!(out, expected);
    }

    #[test]
    fn thumbnails_leave_gaps_between_bands() {
        let panel = SidePanel::default();
        // Band centers: fract(y * 5) == 0.5.
        assert!(panel.on_thumbnail(Vec2::new(0.1, 0.1)));
        assert!(panel.on_thumbnail(Vec2::new(0.1, 0.5)));
        // Band edges fall in the gap.
        assert!(!panel.on_thumbnail(Vec2::new(0.1, 0.2)));
        assert!(!panel.on_thumbnail(Vec2::new(0.1, 0.39)));
        // Outside the horizontal margin.
        assert!(!panel.on_thumbnail(Vec2::new(0.01, 0.5)));
        assert!(!panel.on_thumbnail(Vec2::new(0.19, 0.5)));
    }

    #[test]
    fn thumbnail_lightens_the_glass() {
        let panel = SidePanel::default();
        let camera = CameraUniform::default().with_side_panel(true);
        let gap = panel.apply(ColorRgba::black(), &frag_at(0.1, 0.2), &camera);
        let thumb = panel.apply(ColorRgba::black(), &frag_at(0.1, 0.5), &camera);
        assert!(thumb.r > gap.r);
        assert_eq!(thumb, gap.mix(panel.thumbnail_color, 0.1));
    }
}
