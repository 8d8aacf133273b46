use std::fmt;

/// Validation failures for compositor inputs.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CompositorError {
    /// A page or annotation image has zero width or height.
    EmptyPage,
    /// The annotation layer must match the document page pixel for pixel.
    PageSizeMismatch {
        document: (u32, u32),
        annotation: (u32, u32),
    },
    /// The page does not fit in a GPU texture on this device.
    PageTooLarge { size: (u32, u32), max: u32 },
}

impl fmt::Display for CompositorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompositorError::EmptyPage => f.write_str("page image has zero size"),
            CompositorError::PageSizeMismatch { document, annotation } => write!(
                f,
                "annotation layer is {}x{} but the document page is {}x{}",
                annotation.0, annotation.1, document.0, document.1
            ),
            CompositorError::PageTooLarge { size, max } => write!(
                f,
                "page is {}x{} but the device allows at most {max}x{max}",
                size.0, size.1
            ),
        }
    }
}

impl std::error::Error for CompositorError {}

/// Checks that both layers are non-empty and the same size.
pub fn check_page_sizes(document: (u32, u32), annotation: (u32, u32)) -> Result<(), CompositorError> {
    if document.0 == 0 || document.1 == 0 || annotation.0 == 0 || annotation.1 == 0 {
        return Err(CompositorError::EmptyPage);
    }
    if document != annotation {
        return Err(CompositorError::PageSizeMismatch { document, annotation });
    }
    Ok(())
}
