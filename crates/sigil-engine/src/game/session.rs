//! Game session: learn a few glyphs, get tested, repeat for six rounds.
//!
//! The state is a plain value. Each transition takes it by value and returns
//! the next state, so a caller can keep or discard snapshots freely.

use serde::Serialize;

use super::challenges::{generate_challenges, Answer, Challenge};
use super::meanings::{assign_meanings, MeaningTable};
use super::progression::{round_config, TOTAL_ROUNDS};
use crate::error::GenerationError;
use crate::glyph::types::{Glyph, WritingSystem};
use crate::glyph::generate_writing_system;
use crate::math::{seed_from_str, Rng};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Menu,
    Learn,
    Test,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoundResult {
    pub round: usize,
    /// Running accuracy over every answer so far, at the end of this round.
    pub accuracy: f64,
}

/// Result of one submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOutcome {
    pub correct: bool,
    pub round_complete: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub phase: Phase,
    pub seed: String,
    pub numeric_seed: i32,
    pub round: usize,
    /// Glyphs `0..revealed` have been shown.
    pub revealed: usize,
    /// The last `new_count` revealed glyphs were introduced this round.
    pub new_count: usize,
    pub meanings: MeaningTable,
    pub challenges: Vec<Challenge>,
    pub challenge_index: usize,
    pub correct_count: u32,
    pub total_count: u32,
    pub round_results: Vec<RoundResult>,
    #[serde(skip)]
    system: Option<WritingSystem>,
    #[serde(skip)]
    rng: Option<Rng>,
}

impl GameState {
    pub fn system(&self) -> Option<&WritingSystem> {
        self.system.as_ref()
    }

    /// Every glyph revealed so far.
    pub fn current_glyphs(&self) -> &[Glyph] {
        match &self.system {
            Some(s) => &s.glyphs[..self.revealed.min(s.glyphs.len())],
            None => &[],
        }
    }

    /// Glyphs introduced this round.
    pub fn new_glyphs(&self) -> &[Glyph] {
        let current = self.current_glyphs();
        &current[current.len().saturating_sub(self.new_count)..]
    }

    pub fn current_challenge(&self) -> Option<&Challenge> {
        self.challenges.get(self.challenge_index)
    }

    pub fn accuracy(&self) -> f64 {
        self.correct_count as f64 / self.total_count.max(1) as f64
    }

    /// Show the next batch of glyphs, or finish after the last round.
    fn reveal(mut self, round: usize) -> Self {
        let available = self.system.as_ref().map_or(0, |s| s.glyphs.len());
        let start = self.revealed.min(available);
        let end = (start + round_config(round).new_glyph_count).min(available);
        self.round = round;
        self.revealed = end;
        self.new_count = end - start;
        self.challenges.clear();
        self.challenge_index = 0;
        self.phase = Phase::Learn;
        self
    }
}

/// Generate the writing system for `seed` and open round 0.
///
/// Meanings are drawn from a generator seeded like the system itself, so one
/// seed string reproduces the whole session.
pub fn start_game(seed: &str) -> Result<GameState, GenerationError> {
    let numeric_seed = seed_from_str(seed);
    let mut rng = Rng::new(numeric_seed);
    let system = generate_writing_system(seed)?;
    let meanings = assign_meanings(&mut rng, &system.glyphs, &system.radicals);

    let state = GameState {
        seed: seed.to_owned(),
        numeric_seed,
        meanings,
        system: Some(system),
        rng: Some(rng),
        ..GameState::default()
    };
    log::info!("game started with seed {seed:?}");
    Ok(state.reveal(0))
}

/// Build this round's challenges and switch to the test phase.
/// Only valid from the learn phase; otherwise the state is returned as is.
pub fn advance_to_test(mut state: GameState) -> GameState {
    if state.phase != Phase::Learn {
        return state;
    }
    let (Some(system), Some(rng)) = (state.system.as_ref(), state.rng.as_mut()) else {
        return state;
    };

    let current = &system.glyphs[..state.revealed.min(system.glyphs.len())];
    let new = &current[current.len().saturating_sub(state.new_count)..];
    let config = round_config(state.round);
    let challenges =
        generate_challenges(config, current, new, &mut state.meanings, system, rng);
    log::debug!("round {}: {} challenges", state.round, challenges.len());

    state.challenges = challenges;
    state.challenge_index = 0;
    state.phase = Phase::Test;
    state
}

/// Score the current challenge. Finishing the last challenge records the
/// round and moves on.
pub fn submit_answer(mut state: GameState, answer: &Answer) -> (GameState, AnswerOutcome) {
    let not_scored = AnswerOutcome { correct: false, round_complete: false };
    if state.phase != Phase::Test {
        return (state, not_scored);
    }
    let Some(correct) = state.current_challenge().map(|c| c.check(answer)) else {
        return (state, not_scored);
    };

    state.total_count += 1;
    if correct {
        state.correct_count += 1;
    }
    state.challenge_index += 1;

    let round_complete = state.challenge_index >= state.challenges.len();
    if round_complete {
        let accuracy = state.accuracy();
        state.round_results.push(RoundResult { round: state.round, accuracy });
        state = next_round(state);
    }
    (state, AnswerOutcome { correct, round_complete })
}

/// Reveal the next round's glyphs, or show results after the final round.
pub fn next_round(mut state: GameState) -> GameState {
    let next = state.round + 1;
    if next >= TOTAL_ROUNDS {
        state.challenges.clear();
        state.challenge_index = 0;
        state.phase = Phase::Results;
        log::info!("game over: {}/{} correct", state.correct_count, state.total_count);
        return state;
    }
    state.reveal(next)
}
