//! Writing-system orchestration: seed in, validated system out.

use serde::Serialize;

use super::composer::compose_glyphs;
use super::radicals::generate_radicals;
use super::similarity::{validate_distinctness, DistinctnessReport};
use super::strokes::generate_stroke_vocabulary;
use super::types::{GenerationParams, Glyph, GridType, Radical, Stroke, WritingSystem};
use crate::error::GenerationError;
use crate::math::{seed_from_str, Rng};

/// Retry policy for [`generate_writing_system_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemConfig {
    /// Attempts before settling for the last one. Values below 1 act as 1.
    pub max_attempts: u32,
    /// Added to the numeric seed once per retry.
    pub seed_stride: i32,
    /// Distinctness threshold handed to the validator.
    pub min_distance: f64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            seed_stride: 9973,
            min_distance: 0.15,
        }
    }
}

/// How the accepted system was reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationReport {
    /// Attempts consumed, including the accepted one.
    pub attempts: u32,
    pub validation: DistinctnessReport,
}

/// Draw the system-wide visual parameters.
pub fn derive_params(rng: &mut Rng) -> GenerationParams {
    let curvature = rng.float(0.2, 0.8);
    let grid_type = *rng.pick(&GridType::ALL).unwrap_or(&GridType::Square);
    let stroke_width = rng.float(2.0, 4.0);
    let taper = rng.float(0.3, 0.7);
    GenerationParams { curvature, grid_type, stroke_width, taper }
}

/// A single attempt's output before the seed string is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptDraft {
    pub params: GenerationParams,
    pub strokes: Vec<Stroke>,
    pub radicals: Vec<Radical>,
    pub glyphs: Vec<Glyph>,
}

/// Run the whole pipeline once from `attempt_seed`.
pub fn generate_attempt(attempt_seed: i32) -> Result<AttemptDraft, GenerationError> {
    let mut rng = Rng::new(attempt_seed);
    let params = derive_params(&mut rng);
    let strokes = generate_stroke_vocabulary(&mut rng, &params)?;
    let radicals = generate_radicals(&mut rng, &strokes);
    let glyphs = compose_glyphs(&mut rng, &radicals, &strokes)?;
    Ok(AttemptDraft { params, strokes, radicals, glyphs })
}

/// Generate with the default retry policy.
pub fn generate_writing_system(seed: &str) -> Result<WritingSystem, GenerationError> {
    generate_writing_system_with(seed, &SystemConfig::default()).map(|(system, _)| system)
}

/// Generate a writing system, retrying with offset seeds until the glyph set
/// passes the distinctness check.
///
/// When no attempt validates, the last structurally sound one is returned and
/// the report carries its failing pairs.
pub fn generate_writing_system_with(
    seed: &str,
    config: &SystemConfig,
) -> Result<(WritingSystem, GenerationReport), GenerationError> {
    let numeric_seed = seed_from_str(seed);
    let max_attempts = config.max_attempts.max(1);

    let mut fallback: Option<(AttemptDraft, GenerationReport)> = None;
    let mut last_error = None;

    for attempt in 0..max_attempts {
        let offset = (attempt as i32).wrapping_mul(config.seed_stride);
        let attempt_seed = numeric_seed.wrapping_add(offset);
        let draft = match generate_attempt(attempt_seed) {
            Ok(d) => d,
            Err(e) => {
                log::warn!("seed {seed:?} attempt {attempt}: {e}");
                last_error = Some(e);
                continue;
            }
        };

        let validation = validate_distinctness(&draft.glyphs, &draft.strokes, config.min_distance);
        log::debug!(
            "seed {seed:?} attempt {attempt}: {} glyphs, {} similar pairs",
            draft.glyphs.len(),
            validation.pairs.len()
        );

        let report = GenerationReport { attempts: attempt + 1, validation };
        if report.validation.valid {
            log::info!(
                "writing system {seed:?}: {} strokes, {} radicals, {} glyphs",
                draft.strokes.len(),
                draft.radicals.len(),
                draft.glyphs.len()
            );
            return Ok((assemble(seed, numeric_seed, draft), report));
        }
        fallback = Some((draft, report));
    }

    match fallback {
        Some((draft, mut report)) => {
            report.attempts = max_attempts;
            log::warn!(
                "writing system {seed:?}: no distinct attempt in {max_attempts}, \
                 keeping last ({} similar pairs)",
                report.validation.pairs.len()
            );
            Ok((assemble(seed, numeric_seed, draft), report))
        }
        None => Err(GenerationError::Exhausted {
            attempts: max_attempts,
            last: Box::new(last_error.unwrap_or(GenerationError::EmptyPool("attempt"))),
        }),
    }
}

fn assemble(seed: &str, numeric_seed: i32, draft: AttemptDraft) -> WritingSystem {
    WritingSystem {
        seed: seed.to_owned(),
        numeric_seed,
        params: draft.params,
        strokes: draft.strokes,
        radicals: draft.radicals,
        glyphs: draft.glyphs,
    }
}
