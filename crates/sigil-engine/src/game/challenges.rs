//! Test challenges built from the glyphs revealed so far.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::meanings::{Meaning, MeaningTable, LABELS, SHAPES};
use super::progression::RoundConfig;
use crate::glyph::types::{Glyph, WritingSystem};
use crate::math::Rng;

/// Option count used when a round config leaves it unset.
const DEFAULT_OPTION_COUNT: usize = 3;

/// Redraws allowed when looking for an unused shape+label for an inferred
/// meaning.
const INFERENCE_REDRAWS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    /// Glyph shown, pick its meaning.
    Recall,
    /// Meaning shown, pick its glyph.
    Reverse,
    /// Memorize a short run of glyphs, reproduce the order.
    Sequence,
    /// Unseen glyph, guess its meaning from shared radicals.
    Inference,
    /// A random pick of recall, reverse or inference per challenge.
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum Challenge {
    Recall {
        glyph_id: usize,
        correct_meaning: Meaning,
        options: Vec<Meaning>,
    },
    Reverse {
        meaning: Meaning,
        correct_glyph_id: usize,
        options: Vec<usize>,
    },
    Sequence {
        glyph_ids: Vec<usize>,
        correct_order: Vec<usize>,
    },
    Inference {
        glyph_id: usize,
        correct_meaning: Meaning,
        options: Vec<Meaning>,
        radical_hint: String,
    },
}

/// A player's response. Only the field relevant to the challenge is read.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    #[serde(default)]
    pub meaning: Option<Meaning>,
    #[serde(default)]
    pub glyph_id: Option<usize>,
    #[serde(default)]
    pub order: Option<Vec<usize>>,
}

impl Challenge {
    /// The glyph this challenge asks about, if it targets a single one.
    pub fn tested_glyph(&self) -> Option<usize> {
        match self {
            Challenge::Recall { glyph_id, .. } | Challenge::Inference { glyph_id, .. } => {
                Some(*glyph_id)
            }
            Challenge::Reverse { correct_glyph_id, .. } => Some(*correct_glyph_id),
            Challenge::Sequence { .. } => None,
        }
    }

    pub fn check(&self, answer: &Answer) -> bool {
        match self {
            Challenge::Recall { correct_meaning, .. }
            | Challenge::Inference { correct_meaning, .. } => {
                answer.meaning.as_ref().is_some_and(|m| m.matches(correct_meaning))
            }
            Challenge::Reverse { correct_glyph_id, .. } => {
                answer.glyph_id == Some(*correct_glyph_id)
            }
            Challenge::Sequence { correct_order, .. } => {
                answer.order.as_ref() == Some(correct_order)
            }
        }
    }
}

/// Build a round's challenges.
///
/// `current` holds every revealed glyph, `new` the ones revealed this round.
/// Sequence rounds get 3 challenges, others one per revealed glyph clamped to
/// 3..=4. Glyphs already tested this round are avoided while others remain.
/// Inference challenges register the inferred meaning in `meanings`.
pub fn generate_challenges(
    config: &RoundConfig,
    current: &[Glyph],
    new: &[Glyph],
    meanings: &mut MeaningTable,
    system: &WritingSystem,
    rng: &mut Rng,
) -> Vec<Challenge> {
    let option_count = config.option_count.unwrap_or(DEFAULT_OPTION_COUNT);
    let challenge_count = match config.test_type {
        TestType::Sequence => 3,
        _ => current.len().clamp(3, 4),
    };

    let mut challenges = Vec::with_capacity(challenge_count);
    let mut used = HashSet::new();
    for _ in 0..challenge_count {
        let test_type = match config.test_type {
            TestType::Mixed => {
                let kinds = [TestType::Recall, TestType::Reverse, TestType::Inference];
                *rng.pick(&kinds).unwrap_or(&TestType::Recall)
            }
            other => other,
        };
        let challenge = match test_type {
            TestType::Recall | TestType::Mixed => {
                recall(current, new, meanings, option_count, rng, &used)
            }
            TestType::Reverse => reverse(current, new, meanings, option_count, rng, &used),
            TestType::Sequence => Some(sequence(current, rng)),
            TestType::Inference => inference(current, meanings, system, option_count, rng),
        };
        match challenge {
            Some(c) => {
                used.extend(c.tested_glyph());
                challenges.push(c);
            }
            None => log::warn!(
                "no {test_type:?} challenge possible with {} revealed glyphs",
                current.len()
            ),
        }
    }
    challenges
}

/// Pick a target from this round's glyphs plus one random earlier glyph,
/// preferring glyphs not yet tested.
fn pick_target<'a>(
    current: &'a [Glyph],
    new: &'a [Glyph],
    rng: &mut Rng,
    used: &HashSet<usize>,
) -> Option<&'a Glyph> {
    let pool: Vec<&Glyph> = if new.is_empty() {
        current.iter().collect()
    } else {
        let revisit = rng.shuffle(&current.iter().collect::<Vec<_>>());
        new.iter().chain(revisit.into_iter().take(1)).collect()
    };
    let unused: Vec<&Glyph> = pool.iter().copied().filter(|g| !used.contains(&g.id)).collect();
    let candidates = if unused.is_empty() { &pool } else { &unused };
    rng.pick(candidates).copied()
}

fn recall(
    current: &[Glyph],
    new: &[Glyph],
    meanings: &MeaningTable,
    option_count: usize,
    rng: &mut Rng,
    used: &HashSet<usize>,
) -> Option<Challenge> {
    let target = pick_target(current, new, rng, used)?;
    let correct_meaning = meanings.get(target.id)?.clone();
    let options = meaning_options(target.id, current.iter(), meanings, option_count, rng)?;
    Some(Challenge::Recall { glyph_id: target.id, correct_meaning, options })
}

fn reverse(
    current: &[Glyph],
    new: &[Glyph],
    meanings: &MeaningTable,
    option_count: usize,
    rng: &mut Rng,
    used: &HashSet<usize>,
) -> Option<Challenge> {
    let target = pick_target(current, new, rng, used)?;
    let meaning = meanings.get(target.id)?.clone();

    let distractors: Vec<usize> =
        current.iter().map(|g| g.id).filter(|&id| id != target.id).collect();
    let mut options = vec![target.id];
    options.extend(rng.shuffle(&distractors).into_iter().take(option_count.saturating_sub(1)));
    let options = rng.shuffle(&options);

    Some(Challenge::Reverse { meaning, correct_glyph_id: target.id, options })
}

fn sequence(current: &[Glyph], rng: &mut Rng) -> Challenge {
    let length = (rng.int(3, 4) as usize).min(current.len());
    let ids: Vec<usize> = current.iter().map(|g| g.id).collect();
    let glyph_ids: Vec<usize> = rng.shuffle(&ids).into_iter().take(length).collect();
    Challenge::Sequence { correct_order: glyph_ids.clone(), glyph_ids }
}

fn inference(
    current: &[Glyph],
    meanings: &mut MeaningTable,
    system: &WritingSystem,
    option_count: usize,
    rng: &mut Rng,
) -> Option<Challenge> {
    let revealed: HashSet<usize> = current.iter().map(|g| g.id).collect();
    let unseen: Vec<&Glyph> = system.glyphs.iter().filter(|g| !revealed.contains(&g.id)).collect();

    let Some(&target) = rng.pick(&unseen) else {
        // everything is revealed: fall back to plain recall on one pick
        let target = rng.pick(current)?;
        let correct_meaning = meanings.get(target.id)?.clone();
        let options = meaning_options(target.id, current.iter(), meanings, option_count, rng)?;
        return Some(Challenge::Recall { glyph_id: target.id, correct_meaning, options });
    };

    let shared = current
        .iter()
        .find(|g| g.radical_indices.iter().any(|r| target.radical_indices.contains(r)))
        .and_then(|g| meanings.get(g.id));

    let correct_meaning = match shared {
        Some(kin) => {
            let taken: HashSet<(&str, &str)> = meanings
                .iter()
                .map(|(_, m)| (m.shape.as_str(), m.label.as_str()))
                .collect();
            let mut shape = *rng.pick(&SHAPES)?;
            let mut label = *rng.pick(&LABELS)?;
            for _ in 0..INFERENCE_REDRAWS {
                if !taken.contains(&(shape, label)) {
                    break;
                }
                shape = *rng.pick(&SHAPES)?;
                label = *rng.pick(&LABELS)?;
            }
            Meaning {
                color: kin.color.clone(),
                color_name: kin.color_name.clone(),
                shape: shape.to_owned(),
                label: label.to_owned(),
            }
        }
        None => meanings.get(current.first()?.id)?.clone(),
    };

    meanings.insert(target.id, correct_meaning.clone());
    let options = meaning_options(
        target.id,
        current.iter().chain(std::iter::once(target)),
        meanings,
        option_count,
        rng,
    )?;

    let radical_hint = if target.radical_indices.is_empty() {
        "No radical hints available"
    } else {
        "Shares radicals with known glyphs"
    };

    Some(Challenge::Inference {
        glyph_id: target.id,
        correct_meaning,
        options,
        radical_hint: radical_hint.to_owned(),
    })
}

/// The correct meaning plus up to `count - 1` distractors from `glyphs`,
/// shuffled together.
fn meaning_options<'a>(
    correct_id: usize,
    glyphs: impl Iterator<Item = &'a Glyph>,
    meanings: &MeaningTable,
    count: usize,
    rng: &mut Rng,
) -> Option<Vec<Meaning>> {
    let correct = meanings.get(correct_id)?.clone();
    let distractors: Vec<&Meaning> = glyphs
        .filter(|g| g.id != correct_id)
        .filter_map(|g| meanings.get(g.id))
        .collect();

    let mut options = vec![correct];
    options.extend(
        rng.shuffle(&distractors)
            .into_iter()
            .take(count.saturating_sub(1))
            .cloned(),
    );
    Some(rng.shuffle(&options))
}
