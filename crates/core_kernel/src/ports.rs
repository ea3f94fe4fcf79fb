//! Injected capabilities
//!
//! Pure domain services receive their side effects through these traits.
//! Production wiring uses the thread RNG; tests pass a [`FixedRandom`].

use rand::Rng;

/// Source of uniformly distributed integers
pub trait RandomSource: Send + Sync {
    /// Returns a value in `low..=high`
    fn next_in_range(&self, low: u16, high: u16) -> u16;
}

/// Random source backed by `rand::thread_rng`
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_in_range(&self, low: u16, high: u16) -> u16 {
        if low >= high {
            return low;
        }
        rand::thread_rng().gen_range(low..=high)
    }
}

/// Random source that always yields the same value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedRandom(u16);

impl FixedRandom {
    pub fn new(value: u16) -> Self {
        Self(value)
    }
}

impl RandomSource for FixedRandom {
    fn next_in_range(&self, _low: u16, _high: u16) -> u16 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_random_stays_in_range() {
        let random = ThreadRandom;
        for _ in 0..1000 {
            let value = random.next_in_range(1000, 9999);
            assert!((1000..=9999).contains(&value));
        }
    }

    #[test]
    fn test_degenerate_range() {
        assert_eq!(ThreadRandom.next_in_range(5, 5), 5);
    }
}
