use image::RgbaImage;
use wgpu::util::DeviceExt;

use crate::compositor::{
    check_page_sizes, CameraUniform, ChromeStyle, CompositorError, Vertex, QUAD_INDICES,
    QUAD_VERTICES,
};
use crate::render::{RenderCtx, RenderTarget};

use super::shader::compositor_wgsl;
use super::texture::PageTexture;

/// GPU pipeline for the page compositor.
///
/// Draws one full-screen quad per frame. Group 0 holds the two page layers
/// and their shared sampler, group 1 the camera uniform.
///
/// GPU objects are created lazily on first use; the pipeline is rebuilt when
/// the surface format changes.
#[derive(Default)]
pub struct CompositorRenderer {
    style: ChromeStyle,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    page_bgl: Option<wgpu::BindGroupLayout>,
    camera_bgl: Option<wgpu::BindGroupLayout>,

    sampler: Option<wgpu::Sampler>,
    pages: Option<PageBinding>,

    camera_ubo: Option<wgpu::Buffer>,
    camera_bind_group: Option<wgpu::BindGroup>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,

    warned_no_pages: bool,
}

struct PageBinding {
    // Kept alive for the bind group.
    _document: PageTexture,
    _annotation: PageTexture,
    bind_group: wgpu::BindGroup,
}

impl CompositorRenderer {
    pub fn new(style: ChromeStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    /// Uploads the document page and its annotation layer.
    ///
    /// `None` for `annotation` uploads a fully transparent layer of the page's
    /// size. Both layers must be non-empty and the same size.
    pub fn set_pages(
        &mut self,
        ctx: &RenderCtx<'_>,
        document: &RgbaImage,
        annotation: Option<&RgbaImage>,
    ) -> Result<(), CompositorError> {
        let blank;
        let annotation = match annotation {
            Some(a) => a,
            None => {
                let (w, h) = document.dimensions();
                blank = RgbaImage::new(w, h);
                &blank
            }
        };
        check_page_sizes(document.dimensions(), annotation.dimensions())?;

        self.ensure_layouts(ctx);
        self.ensure_sampler(ctx);
        let (Some(bgl), Some(sampler)) = (self.page_bgl.as_ref(), self.sampler.as_ref()) else {
            return Ok(());
        };

        let document = PageTexture::from_image(ctx.device, ctx.queue, document, "folio document page")?;
        let annotation =
            PageTexture::from_image(ctx.device, ctx.queue, annotation, "folio annotation layer")?;

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("folio compositor page bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&document.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&annotation.view),
                },
            ],
        });

        self.pages = Some(PageBinding {
            _document: document,
            _annotation: annotation,
            bind_group,
        });
        self.warned_no_pages = false;
        Ok(())
    }

    /// Records the compositor pass over `target`. The target is loaded, not
    /// cleared, so the caller's clear color shows wherever the quad is absent.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        camera: &CameraUniform,
    ) {
        if self.pages.is_none() {
            if !self.warned_no_pages {
                log::warn!("compositor has no pages; nothing to draw");
                self.warned_no_pages = true;
            }
            return;
        }

        self.ensure_layouts(ctx);
        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_camera_binding(ctx);
        self.write_camera_uniform(ctx, camera);

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(pages) = self.pages.as_ref() else { return };
        let Some(camera_bind_group) = self.camera_bind_group.as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };
        let Some(quad_ibo) = self.quad_ibo.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("folio compositor pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &pages.bind_group, &[]);
        rpass.set_bind_group(1, camera_bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_layouts(&mut self, ctx: &RenderCtx<'_>) {
        if self.page_bgl.is_some() && self.camera_bgl.is_some() {
            return;
        }

        let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };

        self.page_bgl = Some(ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("folio compositor page bgl"),
            entries: &[
                texture_entry(0),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                texture_entry(2),
            ],
        }));

        self.camera_bgl = Some(ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("folio compositor camera bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<CameraUniform>() as u64,
                    ),
                },
                count: None,
            }],
        }));
    }

    fn ensure_sampler(&mut self, ctx: &RenderCtx<'_>) {
        if self.sampler.is_some() {
            return;
        }
        self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("folio page sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }));
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }
        let (Some(page_bgl), Some(camera_bgl)) = (self.page_bgl.as_ref(), self.camera_bgl.as_ref())
        else {
            return;
        };

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("folio compositor shader"),
            source: wgpu::ShaderSource::Wgsl(compositor_wgsl(&self.style).into()),
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("folio compositor pipeline layout"),
            bind_group_layouts: &[page_bgl, camera_bgl],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("folio compositor pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("compositor pipeline built for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
    }

    fn ensure_camera_binding(&mut self, ctx: &RenderCtx<'_>) {
        if self.camera_bind_group.is_some() && self.camera_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.camera_bgl.as_ref() else { return };

        let camera_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("folio compositor camera ubo"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("folio compositor camera bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_ubo.as_entire_binding(),
            }],
        });

        self.camera_ubo = Some(camera_ubo);
        self.camera_bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("folio compositor quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("folio compositor quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn write_camera_uniform(&self, ctx: &RenderCtx<'_>, camera: &CameraUniform) {
        let Some(ubo) = self.camera_ubo.as_ref() else { return };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(camera));
    }
}
