use bytemuck::{Pod, Zeroable};

use crate::coords::{Vec2, Viewport};

use super::CameraUniform;

/// Quad vertex as uploaded to the GPU.
///
/// Layout (20 bytes):
///
///  offset  0  position    [f32; 3]   loc 0
///  offset 12  tex_coords  [f32; 2]   loc 1
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x2  // tex_coords
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Full-screen quad. Texture origin is top-left, clip origin is bottom-left.
pub const QUAD_VERTICES: [Vertex; 4] = [
    Vertex { position: [-1.0, 1.0, 0.0], tex_coords: [0.0, 0.0] },
    Vertex { position: [-1.0, -1.0, 0.0], tex_coords: [0.0, 1.0] },
    Vertex { position: [1.0, -1.0, 0.0], tex_coords: [1.0, 1.0] },
    Vertex { position: [1.0, 1.0, 0.0], tex_coords: [1.0, 0.0] },
];

pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 3, 0];

/// Output of the transform stage, input of the compositor stage.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Fragment {
    pub clip_position: [f32; 4],
    /// Page sampling coordinates.
    pub tex_coords: Vec2,
    /// Y-flipped `tex_coords`; every UI region test reads this.
    pub uv_screen: Vec2,
}

/// Vertex stage: pure 2D affine mapping, no perspective.
#[inline]
pub fn transform_vertex(vertex: &Vertex, camera: &CameraUniform) -> Fragment {
    let [x, y, _] = vertex.position;
    let clip = camera.position_to_clip(Vec2::new(x, y));
    let tex = Vec2::from_array(vertex.tex_coords);

    Fragment {
        clip_position: [clip.x, clip.y, 0.0, 1.0],
        tex_coords: tex,
        uv_screen: Vec2::new(tex.x, 1.0 - tex.y),
    }
}

/// Rasterizer stand-in for the standard quad.
///
/// Maps a pixel center (physical px, top-left origin) through the inverse
/// camera transform and returns the interpolated fragment, or `None` when the
/// pixel lies outside the quad or the transform is degenerate.
pub fn fragment_at(pixel: Vec2, viewport: Viewport, camera: &CameraUniform) -> Option<Fragment> {
    if !viewport.is_valid() {
        return None;
    }

    let ndc = Vec2::new(
        pixel.x / viewport.width * 2.0 - 1.0,
        1.0 - pixel.y / viewport.height * 2.0,
    );
    let p = camera.clip_to_position(ndc)?;
    if !p.is_finite() || p.x.abs() > 1.0 || p.y.abs() > 1.0 {
        return None;
    }

    // Bilinear interpolation of QUAD_VERTICES tex_coords collapses to this.
    let vertex = Vertex {
        position: [p.x, p.y, 0.0],
        tex_coords: [(p.x + 1.0) * 0.5, (1.0 - p.y) * 0.5],
    };
    Some(transform_vertex(&vertex, camera))
}
