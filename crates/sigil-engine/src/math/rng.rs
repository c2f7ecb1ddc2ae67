//! Seedable pseudo-random number generator (splitmix32).
//! Deterministic across platforms: the mixing constants and the draw order of
//! every derived operation are part of the seed compatibility contract.

/// Seedable pseudo-random number generator (splitmix32).
///
/// Every method consumes draws in a fixed order, so the same seed replays the
/// same writing system bit-for-bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rng {
    state: u32,
}

impl Rng {
    pub fn new(seed: i32) -> Self {
        Rng { state: seed as u32 }
    }

    /// Advance the state and return the mixed 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x9e37_79b9);
        let mut t = self.state ^ (self.state >> 16);
        t = t.wrapping_mul(0x21f0_aaad);
        t ^= t >> 15;
        t = t.wrapping_mul(0x735a_2d97);
        t ^= t >> 15;
        t
    }

    /// Uniform value in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }

    /// Uniform value in [min, max).
    pub fn float(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform integer in [min, max] (inclusive).
    pub fn int(&mut self, min: i32, max: i32) -> i32 {
        self.float(min as f64, max as f64 + 1.0).floor() as i32
    }

    /// Uniform index in [0, len). Callers guarantee `len > 0`.
    pub fn index(&mut self, len: usize) -> usize {
        (self.next_f64() * len as f64).floor() as usize
    }

    /// True with the given probability.
    pub fn bool(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Pick a uniformly random element. Returns `None` (without consuming a
    /// draw) when the slice is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let i = self.index(items.len());
        items.get(i)
    }

    /// Fisher-Yates shuffle from the end. Returns a new vector; the input is
    /// left untouched.
    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut result = items.to_vec();
        for i in (1..result.len()).rev() {
            let j = self.index(i + 1);
            result.swap(i, j);
        }
        result
    }

    /// Normally distributed value (Box-Muller, two draws).
    pub fn gaussian(&mut self, mean: f64, stddev: f64) -> f64 {
        let u1 = self.next_f64();
        let u2 = self.next_f64();
        let u1 = if u1 == 0.0 { 1e-10 } else { u1 };
        let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
        mean + z * stddev
    }
}

/// Fold a seed string into a 32-bit seed with a rolling `hash * 31 + unit`
/// hash over its UTF-16 code units.
pub fn seed_from_str(seed: &str) -> i32 {
    seed.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOLDEN_42: [f64; 10] = [
        0.12848330102860928,
        0.03353364090435207,
        0.07509804493747652,
        0.7065966189838946,
        0.21141720796003938,
        0.6166351919528097,
        0.014377369545400143,
        0.43412282480858266,
        0.5706630498170853,
        0.5412136949598789,
    ];

    #[test]
    fn rng_matches_golden_sequence() {
        let mut rng = Rng::new(42);
        for expected in GOLDEN_42 {
            assert_eq!(rng.next_f64(), expected);
        }
    }

    #[test]
    fn rng_deterministic() {
        let mut rng1 = Rng::new(-1008861826);
        let mut rng2 = Rng::new(-1008861826);
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn shuffle_reproducible_and_non_mutating() {
        let input = [1, 2, 3, 4, 5];
        let a = Rng::new(42).shuffle(&input);
        let b = Rng::new(42).shuffle(&input);
        assert_eq!(a, b);
        assert_eq!(a, vec![3, 2, 4, 5, 1]);
        assert_eq!(input, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn derived_draws_match_reference() {
        let mut rng = Rng::new(7);
        assert_eq!(rng.int(6, 10), 10);
        assert_eq!(rng.float(2.0, 4.0), 3.9607809060253203);
        assert!(rng.bool(0.5));
        assert_eq!(rng.pick(&["a", "b", "c"]), Some(&"b"));
    }

    #[test]
    fn int_stays_in_inclusive_range() {
        let mut rng = Rng::new(1234);
        for _ in 0..1000 {
            let v = rng.int(4, 8);
            assert!((4..=8).contains(&v), "value {v} out of range");
        }
    }

    #[test]
    fn pick_empty_returns_none_without_draw() {
        let mut rng = Rng::new(5);
        let before = rng.clone();
        let empty: [u8; 0] = [];
        assert!(rng.pick(&empty).is_none());
        assert_eq!(rng, before);
    }

    #[test]
    fn gaussian_is_finite() {
        let mut rng = Rng::new(99);
        let mut sum = 0.0;
        for _ in 0..2000 {
            let v = rng.gaussian(10.0, 2.0);
            assert!(v.is_finite());
            sum += v;
        }
        let mean = sum / 2000.0;
        assert!((mean - 10.0).abs() < 0.5, "mean was {mean}");
    }

    #[test]
    fn seed_from_str_folds_like_reference() {
        assert_eq!(seed_from_str(""), 0);
        assert_eq!(seed_from_str("a"), 97);
        assert_eq!(seed_from_str("oracle"), -1008861826);
        assert_eq!(seed_from_str("test-seed-1"), -1680524944);
    }
}
