//! RNG module - 7-bag piece supply
//!
//! Each bag contains one of each piece (I, J, L, O, S, T, Z), shuffled with
//! Fisher-Yates. Bags are appended whole to the supply queue whenever fewer
//! than `SUPPLY_LOW_WATER` kinds remain, so the preview is always resolvable
//! and every bag boundary stays intact.
//!
//! Also provides a small seeded RNG so games are reproducible.

use std::collections::VecDeque;

use arrayvec::ArrayVec;

use crate::types::{PieceKind, PREVIEW_LEN, SUPPLY_LOW_WATER};

/// Small seeded RNG (SplitMix64 output function)
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            state: u64::from(seed),
        }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        ((z ^ (z >> 31)) >> 32) as u32
    }

    /// Generate a uniform value in range [0, max)
    ///
    /// Draws that fall in the tail above the largest multiple of `max` are
    /// rejected so no residue is favoured.
    pub fn next_range(&mut self, max: u32) -> u32 {
        assert!(max > 0, "next_range requires a non-empty range");
        let zone = (u32::MAX / max) * max;
        loop {
            let v = self.next_u32();
            if v < zone {
                return v % max;
            }
        }
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// One freshly shuffled bag holding every kind exactly once
pub fn new_bag(rng: &mut SimpleRng) -> [PieceKind; 7] {
    let mut bag = PieceKind::ALL;
    rng.shuffle(&mut bag);
    bag
}

/// Queue of upcoming kinds, replenished a bag at a time
#[derive(Debug, Clone)]
pub struct PieceSupply {
    queue: VecDeque<PieceKind>,
    rng: SimpleRng,
}

impl PieceSupply {
    /// Create a supply seeded with one shuffled bag
    pub fn new(seed: u32) -> Self {
        let mut supply = Self {
            queue: VecDeque::with_capacity(14),
            rng: SimpleRng::new(seed),
        };
        supply.replenish();
        supply
    }

    fn replenish(&mut self) {
        while self.queue.len() < SUPPLY_LOW_WATER {
            let bag = new_bag(&mut self.rng);
            self.queue.extend(bag);
        }
    }

    /// Pop the front kind, topping the queue up with a new bag if it runs low
    pub fn draw(&mut self) -> PieceKind {
        let kind = self
            .queue
            .pop_front()
            .expect("piece supply is replenished before it can run dry");
        self.replenish();
        kind
    }

    /// Peek at the kind the next `draw` returns
    pub fn peek(&self) -> PieceKind {
        self.queue[0]
    }

    /// The next `PREVIEW_LEN` kinds in draw order
    pub fn upcoming(&self) -> ArrayVec<PieceKind, PREVIEW_LEN> {
        self.queue.iter().copied().take(PREVIEW_LEN).collect()
    }

    /// Number of kinds currently queued
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is queued; a supply refills before this can happen
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Derive a seed for the next game from this supply's RNG
    pub fn next_seed(&mut self) -> u32 {
        self.rng.next_u32()
    }
}

impl Default for PieceSupply {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut kinds: Vec<PieceKind>) -> Vec<PieceKind> {
        kinds.sort();
        kinds
    }

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in 1..=7 {
            for _ in 0..200 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_new_bag_is_permutation() {
        let mut rng = SimpleRng::new(99);
        for _ in 0..1000 {
            let bag = new_bag(&mut rng);
            assert_eq!(sorted(bag.to_vec()), PieceKind::ALL.to_vec());
        }
    }

    #[test]
    fn test_new_bag_first_slot_is_roughly_uniform() {
        let mut rng = SimpleRng::new(2024);
        let mut counts = [0u32; 7];
        let trials = 7000;
        for _ in 0..trials {
            let bag = new_bag(&mut rng);
            let idx = PieceKind::ALL.iter().position(|k| *k == bag[0]).unwrap();
            counts[idx] += 1;
        }
        for count in counts {
            assert!((800..=1200).contains(&count), "skewed count {}", count);
        }
    }

    #[test]
    fn test_supply_starts_with_full_bag() {
        let supply = PieceSupply::new(1);
        assert_eq!(supply.len(), 7);
    }

    #[test]
    fn test_supply_replenishes_below_low_water() {
        let mut supply = PieceSupply::new(1);
        supply.draw();
        supply.draw();
        assert_eq!(supply.len(), 5);
        supply.draw();
        assert_eq!(supply.len(), 11);
    }

    #[test]
    fn test_supply_never_runs_dry() {
        let mut supply = PieceSupply::new(3);
        for _ in 0..500 {
            supply.draw();
            assert!(supply.len() >= SUPPLY_LOW_WATER);
        }
    }

    #[test]
    fn test_every_bag_window_is_permutation() {
        let mut supply = PieceSupply::new(42);
        for _ in 0..50 {
            let window: Vec<PieceKind> = (0..7).map(|_| supply.draw()).collect();
            assert_eq!(sorted(window), PieceKind::ALL.to_vec());
        }
    }

    #[test]
    fn test_peek_matches_draw() {
        let mut supply = PieceSupply::new(5);
        for _ in 0..30 {
            let peeked = supply.peek();
            assert_eq!(supply.upcoming()[0], peeked);
            assert_eq!(supply.draw(), peeked);
        }
    }

    #[test]
    fn test_upcoming_is_always_full() {
        let mut supply = PieceSupply::new(11);
        for _ in 0..40 {
            assert_eq!(supply.upcoming().len(), PREVIEW_LEN);
            supply.draw();
        }
    }
}
