//! Memory game played over a generated writing system.

pub mod challenges;
pub mod meanings;
pub mod progression;
pub mod session;

pub use challenges::{generate_challenges, Answer, Challenge, TestType};
pub use meanings::{assign_meanings, InkColor, Meaning, MeaningTable};
pub use progression::{round_config, RoundConfig, TOTAL_ROUNDS};
pub use session::{
    advance_to_test, next_round, start_game, submit_answer, AnswerOutcome, GameState, Phase,
    RoundResult,
};
