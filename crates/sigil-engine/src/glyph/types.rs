//! Writing-system data model.
//!
//! Everything here is created once per generation attempt and read-only
//! afterwards. Radicals and glyphs refer to strokes by index into the
//! vocabulary; geometry is never copied.

use glam::DVec2;
use serde::{Deserialize, Serialize};

pub use crate::math::bezier::BezierSegment;

/// Normalized unit-square coordinate.
pub type Point2D = DVec2;

/// A reusable stroke primitive: 1-3 chained Bezier segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub id: usize,
    pub segments: Vec<BezierSegment>,
    pub base_width: f64,
}

/// Layout slot a radical occupies inside a multi-radical glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Top,
    Bottom,
    Left,
    Right,
    Center,
}

impl Slot {
    /// Declaration order; shuffles and picks index into this.
    pub const ALL: [Slot; 5] = [Slot::Top, Slot::Bottom, Slot::Left, Slot::Right, Slot::Center];
}

/// A group of strokes placed in one slot, tagged with a semantic category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Radical {
    pub id: usize,
    pub stroke_indices: Vec<usize>,
    pub slot: Slot,
    pub category: usize,
}

/// Placement of one stroke instance within glyph space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub rotation: f64,
}

impl Transform {
    /// Map a stroke-local point into glyph space: scale, rotate, translate.
    #[inline]
    pub fn apply(&self, p: DVec2) -> DVec2 {
        let (sin, cos) = self.rotation.sin_cos();
        let sx = p.x * self.scale;
        let sy = p.y * self.scale;
        DVec2::new(sx * cos - sy * sin + self.x, sx * sin + sy * cos + self.y)
    }

    /// Rotate a direction vector (no scale, no translation).
    #[inline]
    pub fn rotate_vector(&self, v: DVec2) -> DVec2 {
        let (sin, cos) = self.rotation.sin_cos();
        DVec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
    }
}

/// A reference to a vocabulary stroke plus its placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedStroke {
    pub stroke_idx: usize,
    pub transform: Transform,
}

/// Axis-aligned glyph bounding box in unit space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Bounds {
    pub const UNIT: Bounds = Bounds { x: 0.0, y: 0.0, w: 1.0, h: 1.0 };

    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }
}

/// A composed character. `id` is its dense index in the system's glyph list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Glyph {
    pub id: usize,
    pub radical_indices: Vec<usize>,
    pub positioned_strokes: Vec<PositionedStroke>,
    pub bounds: Bounds,
}

/// Anchor layout pattern used by the stroke generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridType {
    Square,
    Triangular,
    Radial,
}

impl GridType {
    pub const ALL: [GridType; 3] = [GridType::Square, GridType::Triangular, GridType::Radial];
}

/// Visual-feel parameters derived once per attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    pub curvature: f64,
    pub grid_type: GridType,
    pub stroke_width: f64,
    pub taper: f64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            curvature: 0.5,
            grid_type: GridType::Square,
            stroke_width: 3.0,
            taper: 0.5,
        }
    }
}

/// The complete, immutable output of one accepted generation attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingSystem {
    pub seed: String,
    pub numeric_seed: i32,
    pub params: GenerationParams,
    pub strokes: Vec<Stroke>,
    pub radicals: Vec<Radical>,
    pub glyphs: Vec<Glyph>,
}

impl WritingSystem {
    pub fn glyph(&self, id: usize) -> Option<&Glyph> {
        self.glyphs.get(id)
    }

    /// Serialize for hand-off to the browser.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
