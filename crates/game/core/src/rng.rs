//! Deterministic random numbers for deck shuffling.
//!
//! Shuffles must be reproducible from the match seed alone so that a command
//! log replays to the same hands on every machine.

/// Seeded source of 32-bit values.
pub trait RngOracle {
    fn next_u32(&mut self) -> u32;

    /// Uniform-ish value in `0..bound`. Returns 0 when `bound` is 0.
    fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.next_u32() % bound
    }
}

/// PCG-XSH-RR: 64-bit LCG state, 32-bit permuted output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        Self {
            state: Self::step(seed),
        }
    }

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let out = Self::output(self.state);
        self.state = Self::step(self.state);
        out
    }
}

/// Derives an independent stream seed for one purpose within a match.
///
/// `stream` distinguishes the two decks so that identical deck lists still
/// shuffle differently.
pub fn compute_seed(match_seed: u64, stream: u32) -> u64 {
    let mut hash = match_seed;
    hash ^= (stream as u64).wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}

/// Fisher-Yates shuffle driven by `rng`.
pub fn shuffle<T, R: RngOracle + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.below(i as u32 + 1) as usize;
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = PcgRng::new(42);
        let mut b = PcgRng::new(42);
        let xs: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        assert_eq!(xs, ys);
        assert_ne!(PcgRng::new(43).next_u32(), xs[0]);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut items: Vec<u32> = (0..15).collect();
        shuffle(&mut items, &mut PcgRng::new(7));
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..15).collect::<Vec<_>>());
    }

    #[test]
    fn streams_diverge() {
        assert_ne!(compute_seed(1, 0), compute_seed(1, 1));
        assert_eq!(compute_seed(9, 1), compute_seed(9, 1));
    }
}
