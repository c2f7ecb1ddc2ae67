pub mod error;
pub mod game;
pub mod glyph;
pub mod math;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use error::{ColorParseError, GenerationError, OptionsError};
pub use glyph::{
    generate_writing_system, generate_writing_system_with, validate_distinctness, Bounds,
    DistinctnessReport, GenerationParams, GenerationReport, Glyph, GridType, PositionedStroke,
    Radical, SimilarPair, Slot, Stroke, SystemConfig, Transform, WritingSystem,
};
pub use math::{seed_from_str, BezierSegment, Rng, SimplexNoise};
pub use renderer::{
    render_glyph, render_glyph_animated, DrawList, FillCommand, GlyphSurface, RenderOptions,
    VectorColor,
};
pub use game::{Answer, AnswerOutcome, Challenge, GameState, Meaning, Phase, TestType};

#[cfg(feature = "vectors")]
pub use systems::vector::{VectorState, VectorVertex};
