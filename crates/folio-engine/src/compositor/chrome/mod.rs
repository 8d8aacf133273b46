//! Procedural UI chrome drawn over the page.
//!
//! Each region is a [`ChromeLayer`]: a screen-space predicate plus a handler
//! that layers its effect over the color composited so far. [`ChromeStyle`]
//! owns the layers and yields them in paint order.

mod bottom_bar;
mod side_panel;

pub use bottom_bar::{BottomBar, ButtonKind, ButtonStyle};
pub use side_panel::SidePanel;

use crate::coords::ColorRgba;

use super::{CameraUniform, Fragment};

/// One screen-space UI region.
pub trait ChromeLayer {
    /// Region test. Must be a pure function of its inputs.
    fn contains(&self, fragment: &Fragment, camera: &CameraUniform) -> bool;

    /// Layers this region's effect over `color`. Only called when `contains` holds.
    fn apply(&self, color: ColorRgba, fragment: &Fragment, camera: &CameraUniform) -> ColorRgba;
}

/// All tunable chrome parameters.
///
/// The WGSL constant prelude is generated from this struct, so the GPU shader
/// and the CPU reference always share one set of values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChromeStyle {
    pub bottom_bar: BottomBar,
    pub side_panel: SidePanel,
}

impl ChromeStyle {
    /// Layers in paint order: bottom bar, then side panel.
    pub fn layers(&self) -> [&dyn ChromeLayer; 2] {
        [&self.bottom_bar, &self.side_panel]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::transform_vertex;
    use crate::compositor::Vertex;

    fn frag(u: f32, v: f32) -> Fragment {
        // tex_coords are the un-flipped screen coords.
        transform_vertex(
            &Vertex { position: [0.0, 0.0, 0.0], tex_coords: [u, 1.0 - v] },
            &CameraUniform::default(),
        )
    }

    #[test]
    fn bottom_left_corner_hits_both_layers() {
        let style = ChromeStyle::default();
        let camera = CameraUniform::default().with_side_panel(true);
        let f = frag(0.05, 0.95);
        let hits: Vec<bool> = style.layers().iter().map(|l| l.contains(&f, &camera)).collect();
        assert_eq!(hits, vec![true, true]);
    }

    #[test]
    fn page_center_hits_nothing() {
        let style = ChromeStyle::default();
        let camera = CameraUniform::default().with_side_panel(true);
        let f = frag(0.5, 0.5);
        assert!(style.layers().iter().all(|l| !l.contains(&f, &camera)));
    }
}
