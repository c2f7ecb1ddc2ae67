//! Deterministic numeric building blocks for glyph generation and rendering.
//! Nothing here touches ambient randomness: every random value flows from `Rng`.

pub mod bezier;
pub mod interp;
pub mod noise;
pub mod rng;

pub use bezier::{sample_uniform, ArcLengthTable, ArcSample, BezierSegment};
pub use interp::{lerp, smoothstep, TAU};
pub use noise::SimplexNoise;
pub use rng::{seed_from_str, Rng};
