use thiserror::Error;

/// Structural failures in the generation pipeline.
///
/// Validation failures are not errors: a writing system whose glyphs are too
/// similar is still returned after the retry budget is spent.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("cannot draw from an empty {0} pool")]
    EmptyPool(&'static str),
    #[error("writing system generation failed after {attempts} attempts")]
    Exhausted {
        attempts: u32,
        #[source]
        last: Box<GenerationError>,
    },
}

/// A colour string that is not `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("color {0:?} is not a #RRGGBB hex string")]
pub struct ColorParseError(pub String);

/// Failure to read render options supplied as JSON.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("invalid render options: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Color(#[from] ColorParseError),
}
