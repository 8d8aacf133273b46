//! Scalar helpers with WGSL built-in semantics.
//!
//! These mirror `fract`, `smoothstep` and the glass-noise hash in
//! `compositor.wgsl` so that the CPU reference and the GPU agree.

use crate::coords::Vec2;

/// Hash key for [`glass_noise`].
pub const NOISE_KEY: Vec2 = Vec2::new(12.9898, 78.233);
/// Hash multiplier for [`glass_noise`].
pub const NOISE_SCALE: f32 = 43758.5453;

/// `x - floor(x)`; always in `[0, 1)` for finite input.
#[inline]
pub fn fract(x: f32) -> f32 {
    let f = x - x.floor();
    // x - floor(x) can round up to exactly 1.0 for tiny negative x.
    if f >= 1.0 { 0.0 } else { f }
}

/// Hermite smoothstep, WGSL semantics (`low < high`).
#[inline]
pub fn smoothstep(low: f32, high: f32, x: f32) -> f32 {
    let t = ((x - low) / (high - low)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Deterministic per-coordinate grain in `[0, 1)`.
#[inline]
pub fn glass_noise(uv: Vec2) -> f32 {
    fract(uv.dot(NOISE_KEY).sin() * NOISE_SCALE)
}

/// Anti-aliased disc coverage: `1` inside `radius`, `0` beyond `radius + edge`.
///
/// `aspect` scales the horizontal offset before measuring, which turns an
/// ellipse in normalized space back into a circle on a non-square target.
#[inline]
pub fn circle_coverage(uv: Vec2, center: Vec2, radius: f32, edge: f32, aspect: f32) -> f32 {
    let d = uv - center;
    let d = Vec2::new(d.x * aspect, d.y);
    1.0 - smoothstep(radius, radius + edge, d.length())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fract_is_in_unit_interval() {
        assert_eq!(fract(2.25), 0.25);
        assert_eq!(fract(-0.25), 0.75);
        assert_eq!(fract(-1e-9), 0.0);
        assert_eq!(fract(3.0), 0.0);
    }

    #[test]
    fn smoothstep_edges() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
    }

    #[test]
    fn noise_is_deterministic_and_bounded() {
        let mut seen_distinct = false;
        let first = glass_noise(Vec2::new(0.0, 0.9));
        for i in 0..200 {
            let uv = Vec2::new(i as f32 / 200.0, 0.9 + i as f32 / 4000.0);
            let n = glass_noise(uv);
            assert!((0.0..1.0).contains(&n), "{uv:?} -> {n}");
            assert_eq!(n, glass_noise(uv));
            seen_distinct |= n != first;
        }
        assert!(seen_distinct);
    }

    #[test]
    fn coverage_is_full_at_center_and_zero_past_edge() {
        let c = Vec2::new(0.5, 0.94);
        assert_eq!(circle_coverage(c, c, 0.025, 0.01, 1.0), 1.0);
        let far = Vec2::new(0.5 + 0.025 + 0.0101, 0.94);
        assert_eq!(circle_coverage(far, c, 0.025, 0.01, 1.0), 0.0);
        let mid = Vec2::new(0.5 + 0.03, 0.94);
        let cov = circle_coverage(mid, c, 0.025, 0.01, 1.0);
        assert!(cov > 0.0 && cov < 1.0);
    }

    #[test]
    fn aspect_stretches_horizontal_distance() {
        let c = Vec2::new(0.5, 0.5);
        let p = Vec2::new(0.52, 0.5);
        assert_eq!(circle_coverage(p, c, 0.025, 0.01, 1.0), 1.0);
        assert_eq!(circle_coverage(p, c, 0.025, 0.01, 2.0), 0.0);
    }
}
