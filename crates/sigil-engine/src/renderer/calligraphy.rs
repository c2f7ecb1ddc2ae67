//! Calligraphic stroke rendering.
//!
//! Each placed stroke becomes one closed outline: samples are taken at even
//! arc-length steps along every segment, pushed out along the normal by a
//! width that tapers at the ends, narrows mid-stroke like a fast pen, and
//! wobbles with seeded noise. The left edge runs forward and the right edge
//! returns, so the polygon is a filled ribbon.

use glam::{DVec2, Vec2};

use super::options::RenderOptions;
use super::surface::GlyphSurface;
use crate::glyph::types::{Bounds, GenerationParams, Glyph, Stroke, Transform};
use crate::math::{lerp, smoothstep, ArcLengthTable, SimplexNoise};

/// Outline samples per Bezier segment; the final segment adds its endpoint.
pub const SAMPLES_PER_SEGMENT: usize = 16;

/// Arc-length table resolution per segment.
pub const ARC_SUBDIVISIONS: usize = 32;

/// Converts stroke width units into glyph units.
const WIDTH_UNITS: f64 = 40.0;

/// Noise seed multiplier; glyphs never share a noise field.
const NOISE_SEED_PRIME: i32 = 7919;

/// Width multiplier from 0.3 at the stroke ends up to 1.0 once `taper` of the
/// stroke has passed.
pub fn taper_profile(t: f64, taper: f64) -> f64 {
    let start = smoothstep(0.0, taper, t);
    let end = smoothstep(0.0, taper, 1.0 - t);
    lerp(0.3, 1.0, start * end)
}

/// Pen-speed thinning, 0.75 at mid-stroke.
pub fn velocity_profile(t: f64) -> f64 {
    1.0 - 0.25 * (t * std::f64::consts::PI).sin()
}

/// Glyph-to-canvas mapping after fitting the glyph bounds.
#[derive(Debug, Clone, Copy)]
struct CanvasFit {
    scale: f64,
    offset: DVec2,
}

impl CanvasFit {
    fn new(bounds: &Bounds, options: &RenderOptions) -> Self {
        let w = if bounds.w == 0.0 { 1.0 } else { bounds.w };
        let h = if bounds.h == 0.0 { 1.0 } else { bounds.h };
        let fit = (1.0 / w).min(1.0 / h).min(1.5) * 0.8;
        let offset = DVec2::new(
            options.offset_x + options.scale * (0.5 - (bounds.x + bounds.w / 2.0) * fit),
            options.offset_y + options.scale * (0.5 - (bounds.y + bounds.h / 2.0) * fit),
        );
        Self { scale: options.scale * fit, offset }
    }
}

/// Everything shared by the strokes of one glyph render.
struct StrokePen<'a> {
    fit: CanvasFit,
    taper: f64,
    noise_amount: f64,
    noise: &'a SimplexNoise,
}

#[derive(Debug, Clone, Copy)]
struct RibbonSample {
    center: DVec2,
    normal: DVec2,
    half_width: f64,
}

impl StrokePen<'_> {
    /// Sample a stroke, stopping after `limit` samples when given.
    fn sample(
        &self,
        stroke: &Stroke,
        transform: &Transform,
        noise_offset: f64,
        limit: Option<usize>,
    ) -> Vec<RibbonSample> {
        let seg_count = stroke.segments.len();
        let total = seg_count * SAMPLES_PER_SEGMENT + 1;
        let cap = limit.map_or(total, |l| l.min(total));
        let mut out = Vec::with_capacity(cap);

        for (si, seg) in stroke.segments.iter().enumerate() {
            let table = ArcLengthTable::build(seg, ARC_SUBDIVISIONS);
            let length = table.total();
            let count = if si + 1 == seg_count {
                SAMPLES_PER_SEGMENT + 1
            } else {
                SAMPLES_PER_SEGMENT
            };

            for i in 0..count {
                if out.len() >= cap {
                    return out;
                }
                let t = table.t_at(i as f64 / SAMPLES_PER_SEGMENT as f64 * length);
                let global_t = (si as f64 + t) / seg_count as f64;

                let n1 = self.noise.noise2d(global_t * 8.0 + noise_offset, 0.0);
                let width_noise = 1.0 + n1 * self.noise_amount * 0.3;
                let half_width = stroke.base_width
                    * taper_profile(global_t, self.taper)
                    * velocity_profile(global_t)
                    * width_noise
                    / 2.0;

                let glyph_pt = transform.apply(seg.point(t));
                let normal = transform.rotate_vector(seg.normal(t));
                let hw = half_width / WIDTH_UNITS * self.fit.scale;
                let n2 = self.noise.noise2d(global_t * 12.0 + noise_offset, 1.5);
                let edge_noise = n2 * self.noise_amount * hw * 0.2;

                out.push(RibbonSample {
                    center: glyph_pt * self.fit.scale + self.fit.offset,
                    normal,
                    half_width: hw + edge_noise,
                });
            }
        }
        out
    }
}

/// Left edge forward then right edge back. `None` below two samples.
fn ribbon_outline(samples: &[RibbonSample]) -> Option<Vec<Vec2>> {
    if samples.len() < 2 {
        return None;
    }
    let left = samples.iter().map(|s| s.center + s.normal * s.half_width);
    let right = samples.iter().rev().map(|s| s.center - s.normal * s.half_width);
    Some(left.chain(right).map(|p| p.as_vec2()).collect())
}

fn glyph_noise(glyph: &Glyph) -> SimplexNoise {
    SimplexNoise::new((glyph.id as i32).wrapping_add(1).wrapping_mul(NOISE_SEED_PRIME))
}

/// Draw a whole glyph, one filled outline per placed stroke.
///
/// Placed strokes that point outside the vocabulary are skipped.
pub fn render_glyph<S: GlyphSurface + ?Sized>(
    surface: &mut S,
    glyph: &Glyph,
    strokes: &[Stroke],
    params: &GenerationParams,
    options: &RenderOptions,
) {
    render_glyph_animated(surface, glyph, strokes, params, 1.0, options);
}

/// Draw a glyph as if written up to `progress` (0 to 1) of its strokes.
///
/// `floor(progress * n)` strokes are drawn whole and the next one is cut off
/// at the remaining fraction of its samples.
pub fn render_glyph_animated<S: GlyphSurface + ?Sized>(
    surface: &mut S,
    glyph: &Glyph,
    strokes: &[Stroke],
    params: &GenerationParams,
    progress: f64,
    options: &RenderOptions,
) {
    let placed = &glyph.positioned_strokes;
    if progress <= 0.0 || placed.is_empty() {
        return;
    }

    let noise = glyph_noise(glyph);
    let pen = StrokePen {
        fit: CanvasFit::new(&glyph.bounds, options),
        taper: params.taper,
        noise_amount: options.noise_amount,
        noise: &noise,
    };

    let stroke_progress = progress * placed.len() as f64;
    let full = stroke_progress.floor() as usize;
    let partial = stroke_progress - full as f64;

    for (i, ps) in placed.iter().enumerate().take(full.saturating_add(1)) {
        let Some(stroke) = strokes.get(ps.stroke_idx) else {
            log::warn!("glyph {}: stroke {} missing, skipped", glyph.id, ps.stroke_idx);
            continue;
        };
        let noise_offset = (i * 10) as f64;

        let limit = if i < full {
            None
        } else {
            if partial <= 0.0 {
                break;
            }
            let total = stroke.segments.len() * SAMPLES_PER_SEGMENT + 1;
            let max_samples = (partial * total as f64).floor() as usize;
            if max_samples < 2 {
                break;
            }
            Some(max_samples)
        };

        let samples = pen.sample(stroke, &ps.transform, noise_offset, limit);
        if let Some(outline) = ribbon_outline(&samples) {
            surface.fill_polygon(&outline, options.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::glyph::types::PositionedStroke;
    use crate::math::BezierSegment;
    use crate::renderer::surface::DrawList;

    fn line_stroke(id: usize, segments: usize) -> Stroke {
        let segs = (0..segments)
            .map(|k| {
                let x0 = 0.1 + 0.2 * k as f64;
                let a = DVec2::new(x0, 0.5);
                let b = DVec2::new(x0 + 0.2, 0.5);
                BezierSegment::new(a, a.lerp(b, 1.0 / 3.0), a.lerp(b, 2.0 / 3.0), b)
            })
            .collect();
        Stroke { id, segments: segs, base_width: 3.0 }
    }

    fn identity(stroke_idx: usize) -> PositionedStroke {
        PositionedStroke {
            stroke_idx,
            transform: Transform { x: 0.0, y: 0.0, scale: 1.0, rotation: 0.0 },
        }
    }

    fn glyph(placed: Vec<PositionedStroke>) -> Glyph {
        Glyph { id: 0, radical_indices: vec![0], positioned_strokes: placed, bounds: Bounds::UNIT }
    }

    #[test]
    fn taper_profile_shape() {
        assert!((taper_profile(0.0, 0.5) - 0.3).abs() < 1e-12);
        assert!((taper_profile(1.0, 0.5) - 0.3).abs() < 1e-12);
        assert!((taper_profile(0.5, 0.5) - 1.0).abs() < 1e-12);
        assert!(taper_profile(0.1, 0.5) < taper_profile(0.3, 0.5));
    }

    #[test]
    fn velocity_profile_dips_mid_stroke() {
        assert!((velocity_profile(0.0) - 1.0).abs() < 1e-12);
        assert!((velocity_profile(0.5) - 0.75).abs() < 1e-12);
        assert!((velocity_profile(1.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn one_outline_per_stroke() {
        let strokes = vec![line_stroke(0, 1), line_stroke(1, 3)];
        let g = glyph(vec![identity(0), identity(1)]);
        let mut list = DrawList::new();
        render_glyph(
            &mut list,
            &g,
            &strokes,
            &GenerationParams::default(),
            &RenderOptions::default(),
        );
        assert_eq!(list.len(), 2);
        assert_eq!(list.commands[0].outline.len(), 2 * (SAMPLES_PER_SEGMENT + 1));
        assert_eq!(list.commands[1].outline.len(), 2 * (3 * SAMPLES_PER_SEGMENT + 1));
        assert!(list.commands.iter().all(|c| c.color == RenderOptions::default().color));
    }

    #[test]
    fn outline_is_centred_on_the_stroke() {
        let strokes = vec![line_stroke(0, 1)];
        let g = glyph(vec![identity(0)]);
        let mut list = DrawList::new();
        render_glyph(
            &mut list,
            &g,
            &strokes,
            &GenerationParams::default(),
            &RenderOptions::default(),
        );
        let outline = &list.commands[0].outline;
        // Unit bounds: fit 0.8, offset 20, scale 160. Stroke starts at (0.1, 0.5).
        let mid = (outline[0] + outline[outline.len() - 1]) / 2.0;
        assert!((mid - Vec2::new(36.0, 100.0)).length() < 1e-3, "{mid}");
        // Horizontal line: normal is vertical, so edges straddle y = 100.
        assert!(outline[0].y > 100.0 && outline[outline.len() - 1].y < 100.0);
    }

    #[test]
    fn noise_free_widths_follow_profiles() {
        let strokes = vec![line_stroke(0, 1)];
        let g = glyph(vec![identity(0)]);
        let opts = RenderOptions { noise_amount: 0.0, ..RenderOptions::default() };
        let params = GenerationParams { taper: 0.5, ..GenerationParams::default() };
        let mut list = DrawList::new();
        render_glyph(&mut list, &g, &strokes, &params, &opts);
        let outline = &list.commands[0].outline;
        let n = outline.len();
        let first_width = (outline[0] - outline[n - 1]).length() as f64;
        // 3.0 * 0.3 * 1.0 / 2 / 40 * 160, doubled for both edges
        assert!((first_width - 3.6).abs() < 1e-3, "{first_width}");
    }

    #[test]
    fn missing_strokes_are_skipped() {
        let strokes = vec![line_stroke(0, 1)];
        let g = glyph(vec![identity(5), identity(0)]);
        let mut list = DrawList::new();
        render_glyph(
            &mut list,
            &g,
            &strokes,
            &GenerationParams::default(),
            &RenderOptions::default(),
        );
        assert_eq!(list.len(), 1);
    }

    static WARNINGS: Mutex<Vec<String>> = Mutex::new(Vec::new());

    struct WarnCapture;

    impl log::Log for WarnCapture {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() <= log::Level::Warn
        }

        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) {
                WARNINGS.lock().unwrap().push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    static CAPTURE: WarnCapture = WarnCapture;

    #[test]
    fn missing_strokes_are_reported_as_warnings() {
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(log::LevelFilter::Warn);

        let strokes = vec![line_stroke(0, 1)];
        let mut g = glyph(vec![identity(0), identity(9)]);
        g.id = 41;
        let mut list = DrawList::new();
        render_glyph(
            &mut list,
            &g,
            &strokes,
            &GenerationParams::default(),
            &RenderOptions::default(),
        );

        let warnings = WARNINGS.lock().unwrap();
        let expected = "glyph 41: stroke 9 missing, skipped";
        assert!(warnings.iter().any(|w| w == expected), "{warnings:?}");
    }

    #[test]
    fn animation_progress() {
        let strokes = vec![line_stroke(0, 1), line_stroke(1, 1)];
        let g = glyph(vec![identity(0), identity(1)]);
        let params = GenerationParams::default();
        let opts = RenderOptions::default();
        let draw = |progress: f64| {
            let mut list = DrawList::new();
            render_glyph_animated(&mut list, &g, &strokes, &params, progress, &opts);
            list
        };

        assert!(draw(0.0).is_empty());
        assert!(draw(-1.0).is_empty());
        assert_eq!(draw(0.5).len(), 1);

        let three_quarters = draw(0.75);
        assert_eq!(three_quarters.len(), 2);
        // half of 17 samples -> 8
        assert_eq!(three_quarters.commands[1].outline.len(), 16);

        let mut full = DrawList::new();
        render_glyph(&mut full, &g, &strokes, &params, &opts);
        assert_eq!(draw(1.0), full);
        assert_eq!(draw(2.0), full);
    }

    #[test]
    fn tiny_partial_is_not_drawn() {
        let strokes = vec![line_stroke(0, 1)];
        let g = glyph(vec![identity(0)]);
        let mut list = DrawList::new();
        // 0.1 * 17 = 1 sample, below the two needed for an outline
        render_glyph_animated(
            &mut list,
            &g,
            &strokes,
            &GenerationParams::default(),
            0.1,
            &RenderOptions::default(),
        );
        assert!(list.is_empty());
    }

    #[test]
    fn generated_glyph_renders_deterministically() {
        let system = crate::glyph::generate_writing_system("oracle").unwrap();
        let g = &system.glyphs[0];
        let mut a = DrawList::new();
        let mut b = DrawList::new();
        render_glyph(&mut a, g, &system.strokes, &system.params, &RenderOptions::default());
        render_glyph(&mut b, g, &system.strokes, &system.params, &RenderOptions::default());
        assert_eq!(a, b);
        assert_eq!(a.len(), g.positioned_strokes.len());
        assert!(a.commands.iter().flat_map(|c| &c.outline).all(|p| p.is_finite()));
    }
}
