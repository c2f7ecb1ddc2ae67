//! Stroke vocabulary generation: cubic Bezier primitives with calligraphic
//! character, built from anchors laid out on the system's grid pattern.

use glam::DVec2;

use super::types::{BezierSegment, GenerationParams, GridType, Point2D, Stroke};
use crate::error::GenerationError;
use crate::math::{lerp, Rng, TAU};

/// Number of anchor candidates laid out per system.
pub const ANCHOR_COUNT: usize = 20;

const MARGIN_MIN: f64 = 0.05;
const MARGIN_MAX: f64 = 0.95;

#[inline]
fn inset(v: f64) -> f64 {
    v.clamp(MARGIN_MIN, MARGIN_MAX)
}

/// Lay out `count` anchor points with the given grid pattern.
pub fn generate_anchors(rng: &mut Rng, grid: GridType, count: usize) -> Vec<Point2D> {
    (0..count)
        .map(|_| match grid {
            GridType::Square => {
                // 5x5 lattice with loose jitter
                let gx = rng.int(0, 4) as f64 / 4.0;
                let gy = rng.int(0, 4) as f64 / 4.0;
                let x = inset(gx + rng.float(-0.08, 0.08));
                let y = inset(gy + rng.float(-0.08, 0.08));
                DVec2::new(x, y)
            }
            GridType::Triangular => {
                let row = rng.int(0, 4);
                let col = rng.int(0, 4);
                let x_off = if row % 2 == 1 { 0.125 } else { 0.0 };
                let x = inset(col as f64 / 4.0 + x_off + rng.float(-0.06, 0.06));
                let y = inset(row as f64 / 4.0 + rng.float(-0.06, 0.06));
                DVec2::new(x, y)
            }
            GridType::Radial => {
                let angle = rng.float(0.0, TAU);
                let radius = rng.float(0.1, 0.4);
                DVec2::new(0.5 + angle.cos() * radius, 0.5 + angle.sin() * radius)
            }
        })
        .collect()
}

/// One Bezier segment from `from` to `to`, its control points pushed off the
/// chord by independent curvature-scaled biases.
pub fn make_segment(rng: &mut Rng, from: Point2D, to: Point2D, curvature: f64) -> BezierSegment {
    let mx = (from.x + to.x) / 2.0;
    let my = (from.y + to.y) / 2.0;
    let perp_x = -(to.y - from.y);
    let perp_y = to.x - from.x;
    let bias1 = rng.float(-curvature, curvature);
    let bias2 = rng.float(-curvature, curvature);

    BezierSegment::new(
        from,
        DVec2::new(
            lerp(from.x, mx, 0.5) + perp_x * bias1,
            lerp(from.y, my, 0.5) + perp_y * bias1,
        ),
        DVec2::new(
            lerp(to.x, mx, 0.5) + perp_x * bias2,
            lerp(to.y, my, 0.5) + perp_y * bias2,
        ),
        to,
    )
}

/// Stroke shape families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Archetype {
    /// Single segment between two anchors.
    SimpleCurve,
    /// Two chained segments.
    LongStroke,
    /// Short lead-in with a tight curl at the tip.
    Hook,
    /// Three segments sweeping part of a circle.
    Loop,
    /// Very short accent.
    Dot,
}

impl Archetype {
    pub const ALL: [Archetype; 5] = [
        Archetype::SimpleCurve,
        Archetype::LongStroke,
        Archetype::Hook,
        Archetype::Loop,
        Archetype::Dot,
    ];

    /// Build this archetype's segments from the anchor pool.
    pub fn build(
        self,
        rng: &mut Rng,
        anchors: &[Point2D],
        curvature: f64,
    ) -> Result<Vec<BezierSegment>, GenerationError> {
        let segments = match self {
            Archetype::SimpleCurve => {
                let a = pick_anchor(rng, anchors)?;
                let b = pick_anchor(rng, anchors)?;
                let dx = b.x - a.x;
                let dy = b.y - a.y;
                let len = (dx * dx + dy * dy).sqrt();
                // Too-short chords are stretched to a minimum length along their direction
                let target = if len < 0.15 {
                    let norm = if len == 0.0 { 1.0 } else { len };
                    DVec2::new(a.x + (dx / norm) * 0.2, a.y + (dy / norm) * 0.2)
                } else {
                    b
                };
                vec![make_segment(rng, a, target, curvature)]
            }
            Archetype::LongStroke => {
                let a = pick_anchor(rng, anchors)?;
                let mid_x = inset(a.x + rng.float(-0.3, 0.3));
                let mid_y = inset(a.y + rng.float(-0.3, 0.3));
                let mid = DVec2::new(mid_x, mid_y);
                let end_x = inset(mid.x + rng.float(-0.3, 0.3));
                let end_y = inset(mid.y + rng.float(-0.3, 0.3));
                let end = DVec2::new(end_x, end_y);
                vec![
                    make_segment(rng, a, mid, curvature),
                    make_segment(rng, mid, end, curvature),
                ]
            }
            Archetype::Hook => {
                let a = pick_anchor(rng, anchors)?;
                let dir = rng.float(0.0, TAU);
                let hook_len = rng.float(0.08, 0.15);
                let mid = DVec2::new(
                    inset(a.x + dir.cos() * 0.15),
                    inset(a.y + dir.sin() * 0.15),
                );
                // x and y each draw their own turn angle
                let tip_x = inset(mid.x + (dir + rng.float(1.2, 2.0)).cos() * hook_len);
                let tip_y = inset(mid.y + (dir + rng.float(1.2, 2.0)).sin() * hook_len);
                let tip = DVec2::new(tip_x, tip_y);
                vec![
                    make_segment(rng, a, mid, curvature * 0.5),
                    make_segment(rng, mid, tip, curvature * 1.5),
                ]
            }
            Archetype::Loop => {
                let center = pick_anchor(rng, anchors)?;
                let radius = rng.float(0.08, 0.18);
                let start_angle = rng.float(0.0, TAU);
                let sweep = rng.float(TAU * 0.5, TAU * 0.85);
                let steps = 3;
                let on_circle = |angle: f64| {
                    DVec2::new(
                        inset(center.x + angle.cos() * radius),
                        inset(center.y + angle.sin() * radius),
                    )
                };
                let mut segments = Vec::with_capacity(steps);
                for i in 0..steps {
                    let a0 = start_angle + (sweep * i as f64) / steps as f64;
                    let a1 = start_angle + (sweep * (i + 1) as f64) / steps as f64;
                    segments.push(make_segment(rng, on_circle(a0), on_circle(a1), curvature * 1.2));
                }
                segments
            }
            Archetype::Dot => {
                let a = pick_anchor(rng, anchors)?;
                let dir = rng.float(0.0, TAU);
                let len = rng.float(0.03, 0.07);
                let b = DVec2::new(inset(a.x + dir.cos() * len), inset(a.y + dir.sin() * len));
                vec![make_segment(rng, a, b, curvature * 0.3)]
            }
        };
        Ok(segments)
    }
}

fn pick_anchor(rng: &mut Rng, anchors: &[Point2D]) -> Result<Point2D, GenerationError> {
    rng.pick(anchors).copied().ok_or(GenerationError::EmptyPool("anchor"))
}

/// Generate a vocabulary of 6-10 stroke primitives.
///
/// The first five strokes cover every archetype once in shuffled order so a
/// system never lacks, say, loops; the rest pick archetypes at random.
pub fn generate_stroke_vocabulary(
    rng: &mut Rng,
    params: &GenerationParams,
) -> Result<Vec<Stroke>, GenerationError> {
    let count = rng.int(6, 10) as usize;
    let anchors = generate_anchors(rng, params.grid_type, ANCHOR_COUNT);
    let order = rng.shuffle(&Archetype::ALL);

    let mut strokes = Vec::with_capacity(count);
    for id in 0..count {
        let archetype = match order.get(id) {
            Some(&a) => a,
            None => Archetype::ALL[rng.int(0, Archetype::ALL.len() as i32 - 1) as usize],
        };
        let segments = archetype.build(rng, &anchors, params.curvature)?;
        strokes.push(Stroke {
            id,
            segments,
            base_width: params.stroke_width + rng.float(-0.5, 0.5),
        });
    }

    log::debug!("stroke vocabulary: {} strokes on {:?} grid", strokes.len(), params.grid_type);
    Ok(strokes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_stay_inside_unit_square() {
        for grid in GridType::ALL {
            let mut rng = Rng::new(11);
            let anchors = generate_anchors(&mut rng, grid, ANCHOR_COUNT);
            assert_eq!(anchors.len(), ANCHOR_COUNT);
            for a in anchors {
                assert!(a.x > 0.0 && a.x < 1.0 && a.y > 0.0 && a.y < 1.0, "{grid:?}: {a}");
            }
        }
    }

    #[test]
    fn radial_anchors_ring_the_center() {
        let mut rng = Rng::new(3);
        for a in generate_anchors(&mut rng, GridType::Radial, ANCHOR_COUNT) {
            let r = a.distance(DVec2::splat(0.5));
            assert!((0.1 - 1e-9..0.4 + 1e-9).contains(&r), "radius {r}");
        }
    }

    #[test]
    fn segment_endpoints_match_chord() {
        let mut rng = Rng::new(1);
        let from = DVec2::new(0.2, 0.2);
        let to = DVec2::new(0.8, 0.4);
        let seg = make_segment(&mut rng, from, to, 0.5);
        assert_eq!(seg.p0, from);
        assert_eq!(seg.p3, to);
    }

    #[test]
    fn zero_curvature_is_straight() {
        let mut rng = Rng::new(1);
        let seg = make_segment(&mut rng, DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0), 0.0);
        assert_eq!(seg.p1.y, 0.0);
        assert_eq!(seg.p2.y, 0.0);
    }

    #[test]
    fn archetype_segment_counts() {
        let anchors = vec![DVec2::new(0.5, 0.5), DVec2::new(0.2, 0.8)];
        let mut rng = Rng::new(21);
        let expected = [1, 2, 2, 3, 1];
        for (archetype, n) in Archetype::ALL.into_iter().zip(expected) {
            let segs = archetype.build(&mut rng, &anchors, 0.4).unwrap();
            assert_eq!(segs.len(), n, "{archetype:?}");
        }
    }

    #[test]
    fn empty_anchor_pool_is_an_error() {
        let mut rng = Rng::new(1);
        let err = Archetype::Dot.build(&mut rng, &[], 0.5).unwrap_err();
        assert!(matches!(err, GenerationError::EmptyPool("anchor")));
    }

    #[test]
    fn vocabulary_size_and_widths() {
        for seed in 0..20 {
            let mut rng = Rng::new(seed);
            let params = GenerationParams::default();
            let strokes = generate_stroke_vocabulary(&mut rng, &params).unwrap();
            assert!((6..=10).contains(&strokes.len()));
            for (i, s) in strokes.iter().enumerate() {
                assert_eq!(s.id, i);
                assert!((1..=3).contains(&s.segments.len()));
                assert!((s.base_width - params.stroke_width).abs() <= 0.5);
            }
        }
    }

    #[test]
    fn first_five_cover_every_archetype() {
        // Segment counts 1,2,2,3,1 identify archetypes up to SimpleCurve/Dot and
        // LongStroke/Hook; the loop must appear exactly once among the first five.
        let mut rng = Rng::new(77);
        let strokes = generate_stroke_vocabulary(&mut rng, &GenerationParams::default()).unwrap();
        let counts: Vec<usize> = strokes.iter().take(5).map(|s| s.segments.len()).collect();
        assert_eq!(counts.iter().filter(|&&n| n == 3).count(), 1);
        assert_eq!(counts.iter().filter(|&&n| n == 2).count(), 2);
        assert_eq!(counts.iter().filter(|&&n| n == 1).count(), 2);
    }
}
