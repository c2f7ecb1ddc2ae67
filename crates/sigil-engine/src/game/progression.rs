//! Difficulty curve.

use serde::Serialize;

use super::challenges::TestType;

/// What one round reveals and how it is tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundConfig {
    pub new_glyph_count: usize,
    pub test_type: TestType,
    /// Seconds per challenge, if timed.
    pub time_limit: Option<u32>,
    /// Choices offered per challenge; sequence rounds have none.
    pub option_count: Option<usize>,
}

const fn row(
    new_glyph_count: usize,
    test_type: TestType,
    time_limit: Option<u32>,
    option_count: Option<usize>,
) -> RoundConfig {
    RoundConfig { new_glyph_count, test_type, time_limit, option_count }
}

pub const ROUND_CONFIGS: [RoundConfig; 6] = [
    row(3, TestType::Recall, None, Some(3)),
    row(2, TestType::Recall, Some(8), Some(4)),
    row(2, TestType::Reverse, Some(6), Some(4)),
    row(2, TestType::Sequence, None, None),
    row(2, TestType::Inference, Some(10), Some(3)),
    row(1, TestType::Mixed, Some(5), Some(5)),
];

pub const TOTAL_ROUNDS: usize = ROUND_CONFIGS.len();

/// Config for a round; rounds past the end reuse the last row.
pub fn round_config(round: usize) -> &'static RoundConfig {
    &ROUND_CONFIGS[round.min(TOTAL_ROUNDS - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_past_last_round() {
        assert_eq!(round_config(0).new_glyph_count, 3);
        assert_eq!(round_config(5).test_type, TestType::Mixed);
        assert_eq!(round_config(99), round_config(5));
    }

    #[test]
    fn full_game_reveals_twelve_glyphs() {
        let total: usize = ROUND_CONFIGS.iter().map(|c| c.new_glyph_count).sum();
        assert_eq!(total, 12);
        assert_eq!(TOTAL_ROUNDS, 6);
    }
}
