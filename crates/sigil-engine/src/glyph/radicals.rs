//! Radical construction: reusable groups of strokes with a layout slot and a
//! semantic category.

use std::collections::HashSet;

use super::types::{Radical, Slot, Stroke};
use crate::math::Rng;

/// Draw how many strokes a radical gets: 1 below 0.2, otherwise 2 when a
/// second draw lands below 0.7, else 3.
fn draw_stroke_count(rng: &mut Rng) -> usize {
    if rng.float(0.0, 1.0) < 0.2 {
        1
    } else if rng.float(0.0, 1.0) < 0.7 {
        2
    } else {
        3
    }
}

/// Generate 4-8 radicals over the stroke vocabulary.
///
/// Stroke indices within a radical are distinct. Slots favour unused
/// (slot, stroke count) combinations; categories partition the radicals
/// round-robin into `max(2, ceil(count / 2))` groups.
pub fn generate_radicals(rng: &mut Rng, strokes: &[Stroke]) -> Vec<Radical> {
    let count = rng.int(4, 8) as usize;
    let category_count = count.div_ceil(2).max(2);
    let mut used_combos: HashSet<(Slot, usize)> = HashSet::new();
    let mut radicals = Vec::with_capacity(count);

    for id in 0..count {
        let stroke_count = draw_stroke_count(rng);
        let mut available: Vec<usize> = (0..strokes.len()).collect();
        let mut stroke_indices = Vec::with_capacity(stroke_count);
        while stroke_indices.len() < stroke_count && !available.is_empty() {
            let pick = rng.int(0, available.len() as i32 - 1) as usize;
            stroke_indices.push(available.remove(pick));
        }

        let mut slot = None;
        for candidate in rng.shuffle(&Slot::ALL) {
            if used_combos.insert((candidate, stroke_indices.len())) {
                slot = Some(candidate);
                break;
            }
        }
        let slot = match slot {
            Some(s) => s,
            None => *rng.pick(&Slot::ALL).unwrap_or(&Slot::Center),
        };

        radicals.push(Radical {
            id,
            stroke_indices,
            slot,
            category: id % category_count,
        });
    }

    log::debug!("radicals: {} across {} categories", radicals.len(), category_count);
    radicals
}
