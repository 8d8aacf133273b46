use image::RgbaImage;

use crate::compositor::CompositorError;

/// A page layer uploaded to the GPU as `Rgba8UnormSrgb`.
pub struct PageTexture {
    // Owns the storage behind `view`.
    _texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl PageTexture {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    /// Creates the texture and uploads `image` in one `write_texture` call.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &RgbaImage,
        label: &str,
    ) -> Result<Self, CompositorError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(CompositorError::EmptyPage);
        }
        let max = device.limits().max_texture_dimension_2d;
        if width > max || height > max {
            return Err(CompositorError::PageTooLarge { size: (width, height), max });
        }

        let extent = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            extent,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        log::debug!("uploaded {label} ({width}x{height})");

        Ok(Self {
            _texture: texture,
            view,
        })
    }
}
