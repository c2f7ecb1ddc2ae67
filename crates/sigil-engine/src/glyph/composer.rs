//! Glyph composition: assemble radicals into complete glyphs.

use super::types::{Bounds, Glyph, PositionedStroke, Radical, Slot, Stroke, Transform};
use crate::error::GenerationError;
use crate::math::Rng;

/// A normalized placement region: origin plus uniform scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotRegion {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

/// Region used when a glyph is made of a single radical.
pub const SINGLE_SLOT: SlotRegion = SlotRegion { x: 0.1, y: 0.1, scale: 0.8 };

impl Slot {
    /// Layout region for this slot inside a multi-radical glyph.
    pub fn region(self) -> SlotRegion {
        match self {
            Slot::Top => SlotRegion { x: 0.2, y: 0.05, scale: 0.5 },
            Slot::Bottom => SlotRegion { x: 0.2, y: 0.55, scale: 0.5 },
            Slot::Left => SlotRegion { x: 0.0, y: 0.15, scale: 0.45 },
            Slot::Right => SlotRegion { x: 0.5, y: 0.15, scale: 0.45 },
            Slot::Center => SlotRegion { x: 0.15, y: 0.15, scale: 0.7 },
        }
    }
}

/// Place a radical's strokes in a region. One rotation bias is shared by the
/// whole radical; offsets and scale jitter per stroke.
fn position_radical(
    rng: &mut Rng,
    radical: &Radical,
    region: SlotRegion,
    out: &mut Vec<PositionedStroke>,
) {
    let rotation = rng.float(-0.1, 0.1);
    for &stroke_idx in &radical.stroke_indices {
        let x = region.x + rng.float(-0.02, 0.02);
        let y = region.y + rng.float(-0.02, 0.02);
        let scale = region.scale + rng.float(-0.05, 0.05);
        out.push(PositionedStroke {
            stroke_idx,
            transform: Transform { x, y, scale, rotation },
        });
    }
}

/// A borrowed stroke shape placed between two regions.
fn make_connector(
    rng: &mut Rng,
    strokes: &[Stroke],
    a: SlotRegion,
    b: SlotRegion,
) -> Result<PositionedStroke, GenerationError> {
    if strokes.is_empty() {
        return Err(GenerationError::EmptyPool("connector stroke"));
    }
    let stroke_idx = rng.int(0, strokes.len() as i32 - 1) as usize;
    let x = (a.x + b.x) / 2.0 + rng.float(-0.05, 0.05);
    let y = (a.y + b.y) / 2.0 + rng.float(-0.05, 0.05);
    let scale = 0.3 + rng.float(-0.05, 0.05);
    let rotation = rng.float(-0.3, 0.3);
    Ok(PositionedStroke {
        stroke_idx,
        transform: Transform { x, y, scale, rotation },
    })
}

/// Radical subsets in priority order: singletons, then pairs, then triples
/// (lexicographic), stopping once `limit` candidates exist.
pub fn candidate_subsets(radical_count: usize, limit: usize) -> Vec<Vec<usize>> {
    let n = radical_count;
    let mut configs = Vec::with_capacity(limit);
    for i in 0..n {
        if configs.len() >= limit {
            return configs;
        }
        configs.push(vec![i]);
    }
    for i in 0..n {
        for j in i + 1..n {
            if configs.len() >= limit {
                return configs;
            }
            configs.push(vec![i, j]);
        }
    }
    for i in 0..n {
        for j in i + 1..n {
            for k in j + 1..n {
                if configs.len() >= limit {
                    return configs;
                }
                configs.push(vec![i, j, k]);
            }
        }
    }
    configs
}

/// Tight box over transform origins and `origin + scale` extents, each side
/// clamped to [0.1, 1].
pub fn compute_bounds(positioned: &[PositionedStroke]) -> Bounds {
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (1.0f64, 1.0f64, 0.0f64, 0.0f64);
    for ps in positioned {
        let t = &ps.transform;
        min_x = min_x.min(t.x);
        min_y = min_y.min(t.y);
        max_x = max_x.max(t.x + t.scale);
        max_y = max_y.max(t.y + t.scale);
    }
    Bounds {
        x: min_x,
        y: min_y,
        w: (max_x - min_x).clamp(0.1, 1.0),
        h: (max_y - min_y).clamp(0.1, 1.0),
    }
}

/// Compose 12-16 glyphs from the radicals.
pub fn compose_glyphs(
    rng: &mut Rng,
    radicals: &[Radical],
    strokes: &[Stroke],
) -> Result<Vec<Glyph>, GenerationError> {
    let count = rng.int(12, 16) as usize;
    let configs = candidate_subsets(radicals.len(), count);
    let mut chosen = rng.shuffle(&configs);
    chosen.truncate(count);

    let mut glyphs = Vec::with_capacity(chosen.len());
    for (id, radical_indices) in chosen.into_iter().enumerate() {
        let mut positioned = Vec::new();

        if let &[only] = radical_indices.as_slice() {
            match radicals.get(only) {
                Some(radical) => position_radical(rng, radical, SINGLE_SLOT, &mut positioned),
                None => log::warn!("glyph {id}: radical {only} missing, skipped"),
            }
        } else {
            let mut regions = Vec::with_capacity(radical_indices.len());
            for &ri in &radical_indices {
                let Some(radical) = radicals.get(ri) else {
                    log::warn!("glyph {id}: radical {ri} missing, skipped");
                    continue;
                };
                let region = radical.slot.region();
                position_radical(rng, radical, region, &mut positioned);
                regions.push(region);
            }

            for pair in regions.windows(2) {
                if rng.bool(0.5) {
                    positioned.push(make_connector(rng, strokes, pair[0], pair[1])?);
                }
            }
        }

        glyphs.push(Glyph {
            id,
            bounds: compute_bounds(&positioned),
            radical_indices,
            positioned_strokes: positioned,
        });
    }

    log::debug!("composed {} glyphs from {} radicals", glyphs.len(), radicals.len());
    Ok(glyphs)
}
