//! Random group assignment

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed integers.
pub trait RandomSource: Send {
    /// Uniform draw from `low..=high`.
    fn next_in_range(&mut self, low: u32, high: u32) -> u32;
}

/// Thread-local OS-seeded generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_in_range(&mut self, low: u32, high: u32) -> u32 {
        rand::rng().random_range(low..=high)
    }
}

/// Seeded generator for reproducible assignments.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_in_range(&mut self, low: u32, high: u32) -> u32 {
        self.rng.random_range(low..=high)
    }
}

/// Group number in `1..=group_count`. A count of 0 is treated as 1.
pub fn assign<R: RandomSource + ?Sized>(rng: &mut R, group_count: u32) -> u32 {
    let upper = group_count.max(1);
    if upper == 1 {
        return 1;
    }
    rng.next_in_range(1, upper)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_stays_in_bounds() {
        let mut rng = SeededRandom::new(7);
        for group_count in 1..=40 {
            for _ in 0..50 {
                let n = assign(&mut rng, group_count);
                assert!((1..=group_count).contains(&n), "{} not in 1..={}", n, group_count);
            }
        }
    }

    #[test]
    fn test_single_group_always_one() {
        let mut rng = ThreadRandom;
        for _ in 0..100 {
            assert_eq!(assign(&mut rng, 1), 1);
        }
        assert_eq!(assign(&mut rng, 0), 1);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SeededRandom::new(2025);
        let mut b = SeededRandom::new(2025);
        let left: Vec<u32> = (0..32).map(|_| assign(&mut a, 5)).collect();
        let right: Vec<u32> = (0..32).map(|_| assign(&mut b, 5)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_every_group_is_reachable() {
        let mut rng = SeededRandom::new(42);
        let mut seen = [false; 5];
        for _ in 0..500 {
            seen[(assign(&mut rng, 5) - 1) as usize] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }
}
