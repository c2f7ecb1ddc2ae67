//! Procedural writing-system generation.
//!
//! The pipeline runs strokes, then radicals, then glyphs from one seeded
//! [`Rng`](crate::math::Rng), and checks the glyph set for visual distinctness.

pub mod composer;
pub mod radicals;
pub mod similarity;
pub mod strokes;
pub mod system;
pub mod types;

pub use similarity::{validate_distinctness, DistinctnessReport, SimilarPair, DEFAULT_MIN_DISTANCE};
pub use system::{
    generate_writing_system, generate_writing_system_with, GenerationReport, SystemConfig,
};
pub use types::{
    Bounds, GenerationParams, Glyph, GridType, Point2D, PositionedStroke, Radical, Slot, Stroke,
    Transform, WritingSystem,
};
