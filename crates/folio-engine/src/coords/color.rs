use core::ops::Mul;

/// Straight-alpha RGBA color in linear space.
///
/// This is the shader's working space: page textures are sRGB-decoded on
/// sampling and the surface re-encodes on write, so every blend in the
/// compositor happens on linear values.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    #[inline]
    pub const fn transparent() -> Self {
        Self::splat(0.0)
    }

    #[inline]
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Decodes 8-bit sRGB RGBA (alpha stays linear), as an `*UnormSrgb` texture does.
    #[inline]
    pub fn from_srgb_u8(rgba: [u8; 4]) -> Self {
        Self::new(
            srgb_to_linear(rgba[0] as f32 / 255.0),
            srgb_to_linear(rgba[1] as f32 / 255.0),
            srgb_to_linear(rgba[2] as f32 / 255.0),
            rgba[3] as f32 / 255.0,
        )
    }

    /// Clamps and encodes to 8-bit sRGB RGBA, as an `*UnormSrgb` render target does.
    #[inline]
    pub fn to_srgb_u8(self) -> [u8; 4] {
        let c = self.clamped();
        let q = |v: f32| (v * 255.0 + 0.5) as u8;
        [
            q(linear_to_srgb(c.r)),
            q(linear_to_srgb(c.g)),
            q(linear_to_srgb(c.b)),
            q(c.a),
        ]
    }

    /// `mix(self, other, t)` on all four channels.
    ///
    /// Uses the `a * (1 - t) + b * t` form so both endpoints are exact.
    #[inline]
    pub fn mix(self, other: ColorRgba, t: f32) -> Self {
        let m = |a: f32, b: f32| a * (1.0 - t) + b * t;
        Self::new(
            m(self.r, other.r),
            m(self.g, other.g),
            m(self.b, other.b),
            m(self.a, other.a),
        )
    }

    /// Adds `v` to every channel, alpha included.
    #[inline]
    pub fn offset(self, v: f32) -> Self {
        Self::new(self.r + v, self.g + v, self.b + v, self.a + v)
    }

    /// Clamps all channels to `[0, 1]`.
    #[inline]
    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
    }

    /// Largest per-channel absolute difference.
    #[inline]
    pub fn max_abs_diff(self, other: ColorRgba) -> f32 {
        (self.r - other.r)
            .abs()
            .max((self.g - other.g).abs())
            .max((self.b - other.b).abs())
            .max((self.a - other.a).abs())
    }
}

/// Component-wise product.
impl Mul for ColorRgba {
    type Output = ColorRgba;
    #[inline]
    fn mul(self, rhs: ColorRgba) -> ColorRgba {
        ColorRgba::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b, self.a * rhs.a)
    }
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}
