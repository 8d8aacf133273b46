use image::RgbaImage;

use crate::coords::{ColorRgba, Vec2};

use super::error::{check_page_sizes, CompositorError};

/// CPU-side texture + sampler, filtered like a wgpu `Linear` sampler.
///
/// Texels are stored decoded (linear, straight alpha), as an `Rgba8UnormSrgb`
/// texture returns them to the shader.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuTexture {
    width: u32,
    height: u32,
    texels: Vec<ColorRgba>,
    address_mode: wgpu::AddressMode,
}

impl CpuTexture {
    /// Decodes an 8-bit sRGB image.
    pub fn from_image(image: &RgbaImage) -> Result<Self, CompositorError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(CompositorError::EmptyPage);
        }
        let texels = image.pixels().map(|p| ColorRgba::from_srgb_u8(p.0)).collect();
        Ok(Self::from_texels(width, height, texels))
    }

    /// Uniformly colored texture. Sizes are clamped to at least 1x1.
    pub fn solid(width: u32, height: u32, color: ColorRgba) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        Self::from_texels(width, height, vec![color; width as usize * height as usize])
    }

    /// Fully transparent layer, the "no annotations" input.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self::solid(width, height, ColorRgba::transparent())
    }

    fn from_texels(width: u32, height: u32, texels: Vec<ColorRgba>) -> Self {
        debug_assert_eq!(texels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            texels,
            address_mode: wgpu::AddressMode::ClampToEdge,
        }
    }

    /// Addressing for coordinates outside `[0, 1]`; applies to both axes.
    pub fn with_address_mode(mut self, mode: wgpu::AddressMode) -> Self {
        self.address_mode = mode;
        self
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Texel lookup with address-mode resolution.
    pub fn texel(&self, x: i64, y: i64) -> ColorRgba {
        match (
            resolve(x, self.width, self.address_mode),
            resolve(y, self.height, self.address_mode),
        ) {
            (Some(x), Some(y)) => self.texels[y * self.width as usize + x],
            // ClampToBorder with the default transparent-black border.
            _ => ColorRgba::transparent(),
        }
    }

    /// Bilinear sample at normalized `uv` (texel centers at `(i + 0.5) / size`).
    pub fn sample(&self, uv: Vec2) -> ColorRgba {
        let x = uv.x * self.width as f32 - 0.5;
        let y = uv.y * self.height as f32 - 0.5;
        let (x0, y0) = (x.floor(), y.floor());
        let (fx, fy) = (x - x0, y - y0);
        let (ix, iy) = (texel_index(x0), texel_index(y0));

        let top = lerp(self.texel(ix, iy), self.texel(ix + 1, iy), fx);
        let bottom = lerp(self.texel(ix, iy + 1), self.texel(ix + 1, iy + 1), fx);
        lerp(top, bottom, fy)
    }
}

/// Far-out coordinates stay far out after clamping, and `+ 1` cannot overflow.
const MAX_TEXEL_INDEX: f32 = (1u64 << 31) as f32;

#[inline]
fn texel_index(v: f32) -> i64 {
    v.clamp(-MAX_TEXEL_INDEX, MAX_TEXEL_INDEX) as i64
}

/// Filter weight blend; exact when both taps are equal.
#[inline]
fn lerp(a: ColorRgba, b: ColorRgba, t: f32) -> ColorRgba {
    let l = |a: f32, b: f32| a + (b - a) * t;
    ColorRgba::new(l(a.r, b.r), l(a.g, b.g), l(a.b, b.b), l(a.a, b.a))
}

fn resolve(i: i64, size: u32, mode: wgpu::AddressMode) -> Option<usize> {
    let n = size as i64;
    let i = match mode {
        wgpu::AddressMode::ClampToEdge => i.clamp(0, n - 1),
        wgpu::AddressMode::Repeat => i.rem_euclid(n),
        wgpu::AddressMode::MirrorRepeat => {
            let m = i.rem_euclid(2 * n);
            if m < n { m } else { 2 * n - 1 - m }
        }
        wgpu::AddressMode::ClampToBorder => {
            if i < 0 || i >= n {
                return None;
            }
            i
        }
    };
    Some(i as usize)
}

/// The two per-frame page layers, validated to be the same size.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayers {
    document: CpuTexture,
    annotation: CpuTexture,
}

impl PageLayers {
    pub fn new(document: CpuTexture, annotation: CpuTexture) -> Result<Self, CompositorError> {
        check_page_sizes(document.size(), annotation.size())?;
        Ok(Self { document, annotation })
    }

    /// Page with an empty annotation layer.
    pub fn document_only(document: CpuTexture) -> Self {
        let (w, h) = document.size();
        Self {
            annotation: CpuTexture::transparent(w, h).with_address_mode(document.address_mode),
            document,
        }
    }

    pub fn document(&self) -> &CpuTexture {
        &self.document
    }

    pub fn annotation(&self) -> &CpuTexture {
        &self.annotation
    }

    /// Samples `(document, annotation)` at the same coordinate.
    #[inline]
    pub fn sample(&self, uv: Vec2) -> (ColorRgba, ColorRgba) {
        (self.document.sample(uv), self.annotation.sample(uv))
    }
}
