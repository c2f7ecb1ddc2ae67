//! Visual distinctness check: rasterize glyphs onto a coarse bitmap and
//! compare every pair.

use serde::Serialize;

use super::types::{Glyph, Stroke};

/// Side length of the comparison bitmap.
pub const GRID_SIZE: usize = 16;

/// Pairs closer than this are too similar unless a caller says otherwise.
pub const DEFAULT_MIN_DISTANCE: f64 = 0.2;

/// Sample steps per Bezier segment (inclusive of both ends).
const SEGMENT_STEPS: usize = 20;

/// Unions smaller than this are treated as fully distinct.
const MIN_UNION: usize = 5;

/// A GRID_SIZE x GRID_SIZE binary occupancy map, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphGrid {
    cells: [bool; GRID_SIZE * GRID_SIZE],
}

impl Default for GlyphGrid {
    fn default() -> Self {
        Self { cells: [false; GRID_SIZE * GRID_SIZE] }
    }
}

impl GlyphGrid {
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < GRID_SIZE && y < GRID_SIZE && self.cells[y * GRID_SIZE + x]
    }

    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Mark a cell and its 8 neighbours. Out-of-range centres mark nothing.
    fn stamp(&mut self, gx: i32, gy: i32) {
        let n = GRID_SIZE as i32;
        if !(0..n).contains(&gx) || !(0..n).contains(&gy) {
            return;
        }
        for dy in -1..=1 {
            for dx in -1..=1 {
                let (nx, ny) = (gx + dx, gy + dy);
                if (0..n).contains(&nx) && (0..n).contains(&ny) {
                    self.cells[ny as usize * GRID_SIZE + nx as usize] = true;
                }
            }
        }
    }
}

/// Rasterize a glyph's placed strokes. Missing stroke indices are skipped.
pub fn rasterize_glyph(glyph: &Glyph, strokes: &[Stroke]) -> GlyphGrid {
    let mut grid = GlyphGrid::default();
    for ps in &glyph.positioned_strokes {
        let Some(stroke) = strokes.get(ps.stroke_idx) else {
            continue;
        };
        for seg in &stroke.segments {
            for i in 0..=SEGMENT_STEPS {
                let t = i as f64 / SEGMENT_STEPS as f64;
                let p = ps.transform.apply(seg.point(t));
                let gx = (p.x * GRID_SIZE as f64).floor() as i32;
                let gy = (p.y * GRID_SIZE as f64).floor() as i32;
                grid.stamp(gx, gy);
            }
        }
    }
    grid
}

/// Differing cells over union cells, in [0, 1].
pub fn grid_distance(a: &GlyphGrid, b: &GlyphGrid) -> f64 {
    let mut diff = 0usize;
    let mut union = 0usize;
    for (&ca, &cb) in a.cells.iter().zip(b.cells.iter()) {
        if ca != cb {
            diff += 1;
        }
        if ca || cb {
            union += 1;
        }
    }
    if union < MIN_UNION {
        return 1.0;
    }
    diff as f64 / union as f64
}

/// A pair of glyphs (by id) that fell under the distance threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarPair {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistinctnessReport {
    pub valid: bool,
    pub pairs: Vec<SimilarPair>,
}

impl DistinctnessReport {
    /// Smallest offending distance, if any pair failed.
    pub fn closest(&self) -> Option<&SimilarPair> {
        self.pairs.iter().min_by(|x, y| x.distance.total_cmp(&y.distance))
    }
}

/// Compare all glyph pairs; `valid` when none is closer than `min_distance`.
pub fn validate_distinctness(
    glyphs: &[Glyph],
    strokes: &[Stroke],
    min_distance: f64,
) -> DistinctnessReport {
    let grids: Vec<GlyphGrid> = glyphs.iter().map(|g| rasterize_glyph(g, strokes)).collect();

    let mut pairs = Vec::new();
    for i in 0..glyphs.len() {
        for j in i + 1..glyphs.len() {
            let distance = grid_distance(&grids[i], &grids[j]);
            if distance < min_distance {
                pairs.push(SimilarPair { a: glyphs[i].id, b: glyphs[j].id, distance });
            }
        }
    }

    DistinctnessReport { valid: pairs.is_empty(), pairs }
}
