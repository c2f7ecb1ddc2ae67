//! Scalar interpolation helpers shared by the generator and the renderer.

pub use std::f64::consts::TAU;

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Hermite smoothstep of `x` between the two edges, clamped to [0, 1].
#[inline]
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(2.0, 4.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 4.0, 1.0), 4.0);
        assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
    }

    #[test]
    fn smoothstep_clamps_and_is_symmetric() {
        assert_eq!(smoothstep(0.0, 0.5, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 0.5, 2.0), 1.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
        let a = smoothstep(0.0, 1.0, 0.2);
        let b = smoothstep(0.0, 1.0, 0.8);
        assert!((a + b - 1.0).abs() < 1e-12);
    }
}
