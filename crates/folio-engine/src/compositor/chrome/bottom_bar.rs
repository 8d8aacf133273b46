use crate::compositor::sdf::{circle_coverage, glass_noise};
use crate::compositor::{CameraUniform, Fragment};
use crate::coords::{ColorRgba, Vec2};

use super::ChromeLayer;

/// Toolbar buttons, left to right.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ButtonKind {
    Menu,
    Pen,
    Search,
}

impl ButtonKind {
    pub fn name(self) -> &'static str {
        match self {
            ButtonKind::Menu => "menu",
            ButtonKind::Pen => "pen",
            ButtonKind::Search => "search",
        }
    }
}

/// A procedural circular button in `uv_screen` space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ButtonStyle {
    pub kind: ButtonKind,
    pub center: Vec2,
    pub radius: f32,
    pub color: ColorRgba,
    /// Multiplies coverage before blending. Below 1 renders a halo, not a disc.
    pub weight: f32,
}

/// Frosted toolbar along the bottom edge with three SDF buttons.
#[derive(Debug, Clone, PartialEq)]
pub struct BottomBar {
    /// Region is `uv_screen.y > threshold`.
    pub threshold: f32,
    pub glass: ColorRgba,
    pub glass_mix: f32,
    /// Noise amplitude added to every channel.
    pub grain: f32,
    /// Anti-aliasing band past each button's radius.
    pub edge_width: f32,
    /// Correct button distance by `scale.x / scale.y` so buttons stay round.
    pub correct_aspect: bool,
    /// Paint order; later buttons cover earlier ones.
    pub buttons: [ButtonStyle; 3],
}

impl Default for BottomBar {
    fn default() -> Self {
        let button = |kind, x, color, weight| ButtonStyle {
            kind,
            center: Vec2::new(x, 0.94),
            radius: 0.025,
            color,
            weight,
        };

        Self {
            threshold: 0.88,
            glass: ColorRgba::new(0.1, 0.1, 0.15, 0.85),
            glass_mix: 0.9,
            grain: 0.01,
            edge_width: 0.01,
            correct_aspect: false,
            buttons: [
                button(ButtonKind::Menu, 0.42, ColorRgba::white(), 0.3),
                button(ButtonKind::Pen, 0.5, ColorRgba::new(1.0, 0.78, 0.39, 1.0), 1.0),
                button(ButtonKind::Search, 0.58, ColorRgba::new(0.35, 0.6, 1.0, 1.0), 1.0),
            ],
        }
    }
}

impl BottomBar {
    /// Coverage of one button at `uv`, before its weight is applied.
    pub fn button_coverage(&self, button: &ButtonStyle, uv: Vec2, camera: &CameraUniform) -> f32 {
        let aspect = if self.correct_aspect { camera.aspect_correction() } else { 1.0 };
        circle_coverage(uv, button.center, button.radius, self.edge_width, aspect)
    }

    /// Glass background plus grain.
    pub fn glass_over(&self, color: ColorRgba, uv: Vec2) -> ColorRgba {
        color.mix(self.glass, self.glass_mix).offset(glass_noise(uv) * self.grain)
    }
}

impl ChromeLayer for BottomBar {
    fn contains(&self, fragment: &Fragment, _camera: &CameraUniform) -> bool {
        fragment.uv_screen.y > self.threshold
    }

    fn apply(&self, color: ColorRgba, fragment: &Fragment, camera: &CameraUniform) -> ColorRgba {
        let uv = fragment.uv_screen;
        self.buttons.iter().fold(self.glass_over(color, uv), |acc, button| {
            let coverage = self.button_coverage(button, uv, camera);
            acc.mix(button.color, coverage * button.weight)
        })
    }
}
