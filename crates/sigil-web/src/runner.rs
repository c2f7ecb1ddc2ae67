use sigil_engine::game::{self, Answer, AnswerOutcome, GameState};
use sigil_engine::{
    generate_writing_system_with, render_glyph_animated, DrawList, GenerationError,
    GenerationReport, OptionsError, RenderOptions, SystemConfig, WritingSystem,
};
#[cfg(feature = "vectors")]
use sigil_engine::VectorState;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("no writing system loaded; call sigil_init first")]
    NotInitialized,
    #[error("glyph {0} does not exist")]
    UnknownGlyph(usize),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Options(#[from] OptionsError),
    #[error("bad JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Owns everything the browser side talks to between calls: the active
/// writing system, the last render, and the game session.
///
/// wasm-bindgen cannot export this directly, so `lib.rs` keeps one in a
/// `thread_local!` and exposes free functions.
pub struct GlyphRunner {
    system: Option<WritingSystem>,
    report: Option<GenerationReport>,
    draw_list: DrawList,
    #[cfg(feature = "vectors")]
    vectors: VectorState,
    game: GameState,
}

impl GlyphRunner {
    pub fn new() -> Self {
        Self {
            system: None,
            report: None,
            draw_list: DrawList::new(),
            #[cfg(feature = "vectors")]
            vectors: VectorState::new(),
            game: GameState::default(),
        }
    }

    /// Generate and keep the writing system for `seed`. Returns its glyph count.
    pub fn load_system(&mut self, seed: &str) -> Result<usize, RunnerError> {
        let (system, report) = generate_writing_system_with(seed, &SystemConfig::default())?;
        if !report.validation.valid {
            log::warn!(
                "seed {seed:?}: using a system with {} similar glyph pairs",
                report.validation.pairs.len()
            );
        }
        let count = system.glyphs.len();
        self.system = Some(system);
        self.report = Some(report);
        Ok(count)
    }

    pub fn system(&self) -> Result<&WritingSystem, RunnerError> {
        self.system.as_ref().ok_or(RunnerError::NotInitialized)
    }

    pub fn system_json(&self) -> Result<String, RunnerError> {
        Ok(self.system()?.to_json()?)
    }

    pub fn report_json(&self) -> Result<String, RunnerError> {
        let report = self.report.as_ref().ok_or(RunnerError::NotInitialized)?;
        Ok(serde_json::to_string(report)?)
    }

    /// Render a glyph up to `progress` into the draw list (and the triangle
    /// buffer when vectors are enabled). Returns the number of filled outlines.
    pub fn render(
        &mut self,
        glyph_id: usize,
        progress: f64,
        options_json: &str,
    ) -> Result<usize, RunnerError> {
        let options = RenderOptions::from_json(options_json)?;
        let system = self.system.as_ref().ok_or(RunnerError::NotInitialized)?;
        let glyph = system.glyph(glyph_id).ok_or(RunnerError::UnknownGlyph(glyph_id))?;

        self.draw_list.clear();
        render_glyph_animated(
            &mut self.draw_list,
            glyph,
            &system.strokes,
            &system.params,
            progress,
            &options,
        );

        #[cfg(feature = "vectors")]
        {
            self.vectors.clear();
            self.draw_list.replay(&mut self.vectors);
        }

        Ok(self.draw_list.len())
    }

    pub fn draw_list_json(&self) -> Result<String, RunnerError> {
        Ok(serde_json::to_string(&self.draw_list)?)
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.vectors.buffer_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertex_count(&self) -> u32 {
        self.vectors.vertex_count() as u32
    }

    // ---- Game session ----

    /// Start a session; its writing system also becomes the active one.
    pub fn start_game(&mut self, seed: &str) -> Result<(), RunnerError> {
        let state = game::start_game(seed)?;
        self.system = state.system().cloned();
        self.report = None;
        self.game = state;
        Ok(())
    }

    pub fn advance_to_test(&mut self) {
        let state = std::mem::take(&mut self.game);
        self.game = game::advance_to_test(state);
    }

    pub fn submit_answer(&mut self, answer_json: &str) -> Result<AnswerOutcome, RunnerError> {
        let answer: Answer = serde_json::from_str(answer_json)?;
        let state = std::mem::take(&mut self.game);
        let (state, outcome) = game::submit_answer(state, &answer);
        self.game = state;
        Ok(outcome)
    }

    pub fn session_json(&self) -> Result<String, RunnerError> {
        Ok(serde_json::to_string(&self.game)?)
    }
}

impl Default for GlyphRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_requires_a_system() {
        let mut runner = GlyphRunner::new();
        assert!(matches!(runner.render(0, 1.0, ""), Err(RunnerError::NotInitialized)));
        assert!(runner.system_json().is_err());
    }

    #[test]
    fn renders_loaded_glyphs() {
        let mut runner = GlyphRunner::new();
        let count = runner.load_system("oracle").unwrap();
        assert_eq!(count, 13);
        let fills = runner.render(0, 1.0, r#"{"scale": 100}"#).unwrap();
        assert!(fills > 0);
        assert!(runner.draw_list_json().unwrap().starts_with("{\"commands\":["));
        assert!(matches!(runner.render(99, 1.0, ""), Err(RunnerError::UnknownGlyph(99))));
        assert!(matches!(runner.render(0, 1.0, "{"), Err(RunnerError::Options(_))));
        assert!(runner.report_json().unwrap().contains("\"attempts\":1"));
    }

    #[test]
    fn game_round_trip_through_json() {
        let mut runner = GlyphRunner::new();
        runner.start_game("oracle").unwrap();
        assert_eq!(runner.system().unwrap().seed, "oracle");
        runner.advance_to_test();
        let outcome = runner.submit_answer("{}").unwrap();
        assert!(!outcome.correct);
        assert!(runner.session_json().unwrap().contains("\"phase\":\"test\""));
        assert!(runner.submit_answer("not json").is_err());
    }
}
