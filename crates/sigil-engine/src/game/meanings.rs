//! Glyph meanings: a colour, a shape and a label per glyph.
//!
//! Glyphs whose first radical shares a category share a colour, which is the
//! visual hint players use to infer meanings of unseen glyphs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::glyph::types::{Glyph, Radical};
use crate::math::Rng;

/// A named ink colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InkColor {
    pub hex: &'static str,
    pub name: &'static str,
}

pub const COLORS: [InkColor; 8] = [
    InkColor { hex: "#5BCEA6", name: "teal" },
    InkColor { hex: "#D4A857", name: "amber" },
    InkColor { hex: "#E87461", name: "rose" },
    InkColor { hex: "#9B7ED8", name: "violet" },
    InkColor { hex: "#4ADE80", name: "emerald" },
    InkColor { hex: "#F97066", name: "coral" },
    InkColor { hex: "#818CF8", name: "indigo" },
    InkColor { hex: "#FCD34D", name: "gold" },
];

pub const SHAPES: [&str; 8] =
    ["circle", "triangle", "square", "diamond", "star", "wave", "spiral", "cross"];
pub const LABELS: [&str; 8] = ["flow", "peak", "root", "echo", "bloom", "drift", "void", "spark"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    pub color: String,
    pub color_name: String,
    pub shape: String,
    pub label: String,
}

impl Meaning {
    pub fn new(color: InkColor, shape: &str, label: &str) -> Self {
        Self {
            color: color.hex.to_owned(),
            color_name: color.name.to_owned(),
            shape: shape.to_owned(),
            label: label.to_owned(),
        }
    }

    /// Same colour, shape and label. The colour name is presentation only.
    pub fn matches(&self, other: &Meaning) -> bool {
        self.color == other.color && self.shape == other.shape && self.label == other.label
    }
}

/// Glyph id to meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MeaningTable {
    entries: BTreeMap<usize, Meaning>,
}

impl MeaningTable {
    pub fn get(&self, glyph_id: usize) -> Option<&Meaning> {
        self.entries.get(&glyph_id)
    }

    pub fn contains(&self, glyph_id: usize) -> bool {
        self.entries.contains_key(&glyph_id)
    }

    pub fn insert(&mut self, glyph_id: usize, meaning: Meaning) {
        self.entries.insert(glyph_id, meaning);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Meaning)> {
        self.entries.iter().map(|(&id, m)| (id, m))
    }
}

/// Every shape+label pair in assignment order: the 8 one-to-one pairs of two
/// shuffles first, then the other 56 combinations shuffled.
fn shape_label_pairs(rng: &mut Rng) -> Vec<(&'static str, &'static str)> {
    let shapes = rng.shuffle(&SHAPES);
    let labels = rng.shuffle(&LABELS);
    let base: Vec<_> = shapes.into_iter().zip(labels).collect();

    let mut extra = Vec::with_capacity(SHAPES.len() * LABELS.len() - base.len());
    for shape in rng.shuffle(&SHAPES) {
        for label in rng.shuffle(&LABELS) {
            if !base.contains(&(shape, label)) {
                extra.push((shape, label));
            }
        }
    }

    let mut pairs = base;
    pairs.extend(rng.shuffle(&extra));
    pairs
}

/// Assign a meaning to every glyph.
///
/// Glyphs are grouped by the category of their first radical (groups in
/// first-seen order, glyphs without a resolvable radical form their own
/// group). Each group gets the next colour of a shuffled palette; every glyph
/// gets a distinct shape+label pair.
pub fn assign_meanings(rng: &mut Rng, glyphs: &[Glyph], radicals: &[Radical]) -> MeaningTable {
    let mut groups: Vec<(Option<usize>, Vec<usize>)> = Vec::new();
    for glyph in glyphs {
        let category = glyph
            .radical_indices
            .first()
            .and_then(|&r| radicals.get(r))
            .map(|r| r.category);
        match groups.iter_mut().find(|(c, _)| *c == category) {
            Some((_, ids)) => ids.push(glyph.id),
            None => groups.push((category, vec![glyph.id])),
        }
    }

    let palette = rng.shuffle(&COLORS);
    let pairs = shape_label_pairs(rng);

    let mut table = MeaningTable::default();
    let mut pair_idx = 0;
    for (group_idx, (_, ids)) in groups.iter().enumerate() {
        let color = palette[group_idx % palette.len()];
        for &id in ids {
            let (shape, label) = pairs[pair_idx % pairs.len()];
            table.insert(id, Meaning::new(color, shape, label));
            pair_idx += 1;
        }
    }

    log::debug!("assigned {} meanings across {} colour groups", table.len(), groups.len());
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::generate_writing_system;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn pairs_cover_every_combination_once() {
        let mut rng = Rng::new(3);
        let pairs = shape_label_pairs(&mut rng);
        assert_eq!(pairs.len(), 64);
        let unique: HashSet<_> = pairs.iter().collect();
        assert_eq!(unique.len(), 64);
        // the first eight use each shape and each label once
        let shapes: HashSet<_> = pairs[..8].iter().map(|p| p.0).collect();
        let labels: HashSet<_> = pairs[..8].iter().map(|p| p.1).collect();
        assert_eq!((shapes.len(), labels.len()), (8, 8));
    }

    #[test]
    fn every_glyph_gets_a_unique_meaning() {
        let system = generate_writing_system("oracle").unwrap();
        let mut rng = Rng::new(system.numeric_seed);
        let table = assign_meanings(&mut rng, &system.glyphs, &system.radicals);
        assert_eq!(table.len(), system.glyphs.len());
        let combos: HashSet<_> =
            table.iter().map(|(_, m)| (m.shape.clone(), m.label.clone())).collect();
        assert_eq!(combos.len(), system.glyphs.len());
    }

    #[test]
    fn shared_category_shares_colour() {
        let system = generate_writing_system("test-seed-1").unwrap();
        let mut rng = Rng::new(1);
        let table = assign_meanings(&mut rng, &system.glyphs, &system.radicals);

        let mut by_category: HashMap<usize, String> = HashMap::new();
        for glyph in &system.glyphs {
            let category = system.radicals[glyph.radical_indices[0]].category;
            let colour = table.get(glyph.id).unwrap().color.clone();
            let seen = by_category.entry(category).or_insert_with(|| colour.clone());
            assert_eq!(*seen, colour);
        }
        let distinct: HashSet<_> = by_category.values().collect();
        assert_eq!(distinct.len(), by_category.len());
    }

    #[test]
    fn matching_ignores_colour_name() {
        let a = Meaning::new(COLORS[0], "star", "void");
        let mut b = a.clone();
        b.color_name = "sea".into();
        assert!(a.matches(&b));
        b.label = "peak".into();
        assert!(!a.matches(&b));
    }

    #[test]
    fn meaning_json_is_camel_case() {
        let json = serde_json::to_string(&Meaning::new(COLORS[7], "wave", "echo")).unwrap();
        let expected = r##"{"color":"#FCD34D","colorName":"gold","shape":"wave","label":"echo"}"##;
        assert_eq!(json, expected);
    }
}
