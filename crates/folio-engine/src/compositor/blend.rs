use crate::coords::ColorRgba;

/// Marker-style annotation blend.
///
/// The annotation multiplies the page (darkening like a highlighter), and its
/// own alpha picks how much of that product replaces the page color:
/// `mix(document, annotation * document, annotation.a)`.
#[inline]
pub fn blend_annotation(document: ColorRgba, annotation: ColorRgba) -> ColorRgba {
    document.mix(annotation * document, annotation.a)
}

/// Output merge with `wgpu::BlendState::ALPHA_BLENDING`: straight-alpha
/// `src` over `dst`.
#[inline]
pub fn composite_over(src: ColorRgba, dst: ColorRgba) -> ColorRgba {
    let k = 1.0 - src.a;
    ColorRgba::new(
        src.r * src.a + dst.r * k,
        src.g * src.a + dst.g * k,
        src.b * src.a + dst.b * k,
        src.a + dst.a * k,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages() -> [ColorRgba; 4] {
        [
            ColorRgba::new(1.0, 0.0, 0.0, 1.0),
            ColorRgba::new(0.2, 0.4, 0.6, 1.0),
            ColorRgba::new(0.9, 0.9, 0.85, 0.5),
            ColorRgba::white(),
        ]
    }

    #[test]
    fn transparent_annotation_leaves_page_untouched() {
        for doc in pages() {
            for ann in [ColorRgba::transparent(), ColorRgba::new(1.0, 1.0, 0.0, 0.0)] {
                assert_eq!(blend_annotation(doc, ann), doc);
            }
        }
    }

    #[test]
    fn opaque_annotation_is_full_multiply() {
        let ann = ColorRgba::new(1.0, 0.9, 0.2, 1.0);
        for doc in pages() {
            assert_eq!(blend_annotation(doc, ann), ann * doc);
        }
    }

    #[test]
    fn half_alpha_is_halfway() {
        let doc = ColorRgba::white();
        let ann = ColorRgba::new(0.0, 1.0, 1.0, 0.5);
        let out = blend_annotation(doc, ann);
        assert_eq!(out, ColorRgba::new(0.5, 1.0, 1.0, 0.75));
    }

    #[test]
    fn opaque_source_replaces_destination() {
        let dst = ColorRgba::new(0.05, 0.05, 0.05, 1.0);
        for src in pages().into_iter().filter(|c| c.a == 1.0) {
            assert_eq!(composite_over(src, dst), src);
        }
    }

    #[test]
    fn translucent_source_lets_destination_through() {
        let src = ColorRgba::new(1.0, 0.0, 0.0, 0.25);
        let out = composite_over(src, ColorRgba::black());
        assert_eq!(out, ColorRgba::new(0.25, 0.0, 0.0, 1.0));
    }
}
