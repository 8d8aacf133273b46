use std::path::Path;

use anyhow::{Context, Result};
use folio_engine::compositor::{check_page_sizes, CpuTexture, PageLayers};
use image::RgbaImage;

/// Decoded page and optional annotation layer, validated to the same size.
pub struct PageImages {
    pub document: RgbaImage,
    pub annotation: Option<RgbaImage>,
}

impl PageImages {
    pub fn new(document: RgbaImage, annotation: Option<RgbaImage>) -> Result<Self> {
        let size = document.dimensions();
        check_page_sizes(size, annotation.as_ref().map_or(size, |a| a.dimensions()))?;
        Ok(Self { document, annotation })
    }

    pub fn load(page: &Path, annotations: Option<&Path>) -> Result<Self> {
        let document = open_rgba(page)?;
        let annotation = annotations.map(open_rgba).transpose()?;
        let images = Self::new(document, annotation)
            .with_context(|| format!("cannot composite {}", page.display()))?;

        let (w, h) = images.document.dimensions();
        log::info!(
            "loaded {} ({w}x{h}){}",
            page.display(),
            if images.annotation.is_some() { " with annotations" } else { "" }
        );
        Ok(images)
    }

    /// CPU textures for the reference renderer.
    pub fn cpu_layers(&self) -> Result<PageLayers> {
        let document = CpuTexture::from_image(&self.document)?;
        let layers = match &self.annotation {
            Some(a) => PageLayers::new(document, CpuTexture::from_image(a)?)?,
            None => PageLayers::document_only(document),
        };
        Ok(layers)
    }
}

fn open_rgba(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(image.to_rgba8())
}
