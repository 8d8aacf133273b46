use bytemuck::{Pod, Zeroable};

use crate::coords::{Vec2, Viewport};

/// Zoom range accepted by [`CameraUniform::from_view`].
pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 5.0;

/// Camera + UI flags record shared by both pipeline stages.
///
/// Layout (24 bytes, six packed `f32`, matches `CameraUniform` in WGSL):
///
///  offset  0  scale        [f32; 2]
///  offset  8  translation  [f32; 2]
///  offset 16  ui_flags     [f32; 2]  (.x > 0.5 = side panel open, .y reserved)
///
/// Fields are append-only. New flags go after `ui_flags` so that a zeroed
/// tail keeps meaning "everything closed".
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub scale: [f32; 2],
    pub translation: [f32; 2],
    pub ui_flags: [f32; 2],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            scale: [1.0, 1.0],
            translation: [0.0, 0.0],
            ui_flags: [0.0, 0.0],
        }
    }
}

impl CameraUniform {
    /// Builds the per-frame uniform from view state.
    ///
    /// `scale = (zoom, zoom * aspect)`, `translation = pan`. Zoom is clamped to
    /// `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn from_view(zoom: f32, pan: Vec2, viewport: Viewport, side_panel_open: bool) -> Self {
        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        Self {
            scale: [zoom, zoom * viewport.aspect()],
            translation: pan.to_array(),
            ui_flags: [0.0, 0.0],
        }
        .with_side_panel(side_panel_open)
    }

    #[inline]
    pub fn with_side_panel(mut self, open: bool) -> Self {
        self.ui_flags[0] = if open { 1.0 } else { 0.0 };
        self
    }

    #[inline]
    pub fn side_panel_open(&self) -> bool {
        self.ui_flags[0] > 0.5
    }

    /// `scale.x / scale.y`, or `1.0` when `scale.y` is zero.
    #[inline]
    pub fn aspect_correction(&self) -> f32 {
        if self.scale[1] == 0.0 {
            1.0
        } else {
            self.scale[0] / self.scale[1]
        }
    }

    /// Forward affine map: `clip = position * scale + translation`.
    #[inline]
    pub fn position_to_clip(&self, position: Vec2) -> Vec2 {
        position * Vec2::from_array(self.scale) + Vec2::from_array(self.translation)
    }

    /// Inverse affine map. `None` when either scale component is zero.
    #[inline]
    pub fn clip_to_position(&self, clip: Vec2) -> Option<Vec2> {
        let [sx, sy] = self.scale;
        if sx == 0.0 || sy == 0.0 {
            return None;
        }
        let [tx, ty] = self.translation;
        Some(Vec2::new((clip.x - tx) / sx, (clip.y - ty) / sy))
    }
}
