/// One acquired surface frame: texture, its view and the encoder recording into it.
///
/// Holding the surface texture blocks acquisition of the next frame, so hand
/// it to [`Gpu::submit`](super::Gpu::submit) in the same redraw.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
