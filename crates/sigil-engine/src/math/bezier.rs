//! Cubic Bezier evaluation and arc-length reparameterization.
//!
//! Raw curve parameter `t` does not advance at constant speed along a curve,
//! so samples taken at uniform `t` bunch up where the control polygon is
//! short. [`ArcLengthTable`] maps traveled distance back to `t`, letting
//! [`sample_uniform`] place samples at equal spacing along the curve.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// One cubic Bezier segment in unit space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BezierSegment {
    pub p0: DVec2,
    pub p1: DVec2,
    pub p2: DVec2,
    pub p3: DVec2,
}

impl BezierSegment {
    pub fn new(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Position at parameter `t`.
    pub fn point(&self, t: f64) -> DVec2 {
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let t2 = t * t;
        let eval = |a: f64, b: f64, c: f64, d: f64| {
            mt2 * mt * a + 3.0 * mt2 * t * b + 3.0 * mt * t2 * c + t2 * t * d
        };
        DVec2::new(
            eval(self.p0.x, self.p1.x, self.p2.x, self.p3.x),
            eval(self.p0.y, self.p1.y, self.p2.y, self.p3.y),
        )
    }

    /// First derivative at parameter `t`.
    pub fn tangent(&self, t: f64) -> DVec2 {
        let mt = 1.0 - t;
        let eval = |a: f64, b: f64, c: f64, d: f64| {
            3.0 * mt * mt * (b - a) + 6.0 * mt * t * (c - b) + 3.0 * t * t * (d - c)
        };
        DVec2::new(
            eval(self.p0.x, self.p1.x, self.p2.x, self.p3.x),
            eval(self.p0.y, self.p1.y, self.p2.y, self.p3.y),
        )
    }

    /// Unit normal (tangent rotated a quarter turn). A degenerate tangent
    /// yields the unnormalized zero vector instead of NaN.
    pub fn normal(&self, t: f64) -> DVec2 {
        let tan = self.tangent(t);
        let len = (tan.x * tan.x + tan.y * tan.y).sqrt();
        let len = if len == 0.0 { 1.0 } else { len };
        DVec2::new(-tan.y / len, tan.x / len)
    }
}

/// Cumulative chord lengths at `subdivisions + 1` evenly spaced parameters.
#[derive(Debug, Clone)]
pub struct ArcLengthTable {
    lengths: Vec<f64>,
}

impl ArcLengthTable {
    pub fn build(segment: &BezierSegment, subdivisions: usize) -> Self {
        let subdivisions = subdivisions.max(1);
        let mut lengths = Vec::with_capacity(subdivisions + 1);
        lengths.push(0.0);
        let mut prev = segment.point(0.0);
        let mut acc = 0.0;
        for i in 1..=subdivisions {
            let pt = segment.point(i as f64 / subdivisions as f64);
            let dx = pt.x - prev.x;
            let dy = pt.y - prev.y;
            acc += (dx * dx + dy * dy).sqrt();
            lengths.push(acc);
            prev = pt;
        }
        Self { lengths }
    }

    /// Total approximate arc length.
    pub fn total(&self) -> f64 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    fn subdivisions(&self) -> usize {
        self.lengths.len() - 1
    }

    /// Map a traveled distance `u` (0..=total) to the curve parameter `t`.
    pub fn t_at(&self, u: f64) -> f64 {
        let total = self.total();
        if u <= 0.0 {
            return 0.0;
        }
        if u >= total {
            return 1.0;
        }

        let segments = self.subdivisions();
        let (mut lo, mut hi) = (0usize, segments);
        while lo < hi {
            let mid = (lo + hi) / 2;
            if self.lengths[mid] < u {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        let idx = lo.saturating_sub(1);
        let seg_len = self.lengths[idx + 1] - self.lengths[idx];
        if seg_len < 1e-10 {
            return idx as f64 / segments as f64;
        }
        let frac = (u - self.lengths[idx]) / seg_len;
        (idx as f64 + frac) / segments as f64
    }
}

/// A point sampled at a fixed arc-length position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSample {
    pub point: DVec2,
    pub t: f64,
}

/// Sample `n` points spaced evenly by arc length (endpoints included).
pub fn sample_uniform(segment: &BezierSegment, n: usize, subdivisions: usize) -> Vec<ArcSample> {
    if n == 0 {
        return Vec::new();
    }
    let table = ArcLengthTable::build(segment, subdivisions);
    let total = table.total();
    let denom = n.saturating_sub(1).max(1) as f64;
    (0..n)
        .map(|i| {
            let t = table.t_at(i as f64 / denom * total);
            ArcSample { point: segment.point(t), t }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arch() -> BezierSegment {
        BezierSegment::new(
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(1.0, 0.0),
        )
    }

    fn spacing_variance(points: &[DVec2]) -> f64 {
        let gaps: Vec<f64> = points.windows(2).map(|w| w[0].distance(w[1])).collect();
        let mean = gaps.iter().sum::<f64>() / gaps.len() as f64;
        gaps.iter().map(|g| (g - mean).powi(2)).sum::<f64>() / gaps.len() as f64
    }

    #[test]
    fn endpoints_interpolated() {
        let seg = arch();
        assert_eq!(seg.point(0.0), seg.p0);
        assert_eq!(seg.point(1.0), seg.p3);
    }

    #[test]
    fn normal_is_unit_and_perpendicular() {
        let seg = arch();
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let n = seg.normal(t);
            assert!((n.length() - 1.0).abs() < 1e-9);
            assert!(n.dot(seg.tangent(t)).abs() < 1e-9);
        }
    }

    #[test]
    fn degenerate_segment_has_zero_normal() {
        let p = DVec2::new(0.5, 0.5);
        let seg = BezierSegment::new(p, p, p, p);
        assert_eq!(seg.normal(0.5), DVec2::ZERO);
        let table = ArcLengthTable::build(&seg, 32);
        assert_eq!(table.total(), 0.0);
        assert_eq!(table.t_at(0.0), 0.0);
    }

    #[test]
    fn t_at_is_monotonic() {
        let table = ArcLengthTable::build(&arch(), 32);
        let total = table.total();
        let mut prev = 0.0;
        for i in 0..=50 {
            let t = table.t_at(total * i as f64 / 50.0);
            assert!(t >= prev);
            prev = t;
        }
        assert_eq!(prev, 1.0);
    }

    #[test]
    fn arc_length_sampling_evens_out_spacing() {
        let seg = arch();
        let arc: Vec<DVec2> = sample_uniform(&seg, 10, 64).iter().map(|s| s.point).collect();
        let naive: Vec<DVec2> = (0..10).map(|i| seg.point(i as f64 / 9.0)).collect();

        let arc_var = spacing_variance(&arc);
        let naive_var = spacing_variance(&naive);
        assert!(arc_var < 1e-5, "arc-length spacing variance {arc_var}");
        assert!(naive_var > 1e-3, "uniform-t spacing variance {naive_var}");
    }

    #[test]
    fn straight_line_length() {
        let seg = BezierSegment::new(
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(3.0, 0.0),
        );
        let table = ArcLengthTable::build(&seg, 32);
        assert!((table.total() - 3.0).abs() < 1e-9);
    }
}
