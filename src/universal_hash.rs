//! Universal hash functions for integer keys.
//!
//! A [`UniversalHasher`] is one member of the affine family
//! `h(k) = ((a*k + b) mod p) mod capacity`, with `a` and `b` drawn uniformly
//! at random when the instance is constructed. For any two distinct keys the
//! collision probability over the random draw is at most `1/capacity`, which
//! holds regardless of how the keys were chosen.

use rand::Rng;

/// Default prime modulus for the hash family. Large enough to sit above any
/// capacity the table reaches in practice.
pub const DEFAULT_PRIME: u64 = 109_345_121;

/// A randomly drawn member of an affine universal hash family.
///
/// Instances are immutable: a given hasher returns the same index for the
/// same key on every call. Fresh instances are drawn independently, so two
/// hashers over the same capacity will usually disagree.
#[derive(Debug, Clone)]
pub struct UniversalHasher {
    /// Number of buckets the computed index is reduced into.
    capacity: usize,
    /// Prime modulus of the family.
    prime: u64,
    /// Multiplicative coefficient, uniform in `[1, prime - 1]`.
    a: u64,
    /// Additive coefficient, uniform in `[0, prime - 1]`.
    b: u64,
}

impl UniversalHasher {
    /// Draws a hasher for the given capacity using the thread-local RNG and
    /// the default prime modulus.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or not smaller than [`DEFAULT_PRIME`].
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::from_rng(capacity, DEFAULT_PRIME, &mut rand::rng())
    }

    /// Draws a hasher from an explicit randomness source.
    ///
    /// Callers that need reproducible draws (tests, or a table that owns a
    /// seeded RNG) pass their own `rng`; `a` lands in `[1, prime - 1]` and
    /// `b` in `[0, prime - 1]`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero, or if `prime <= capacity`: reducing a
    /// residue class of `prime` values into at least as many buckets voids
    /// the collision bound, so construction fails fast instead.
    pub fn from_rng<R: Rng + ?Sized>(capacity: usize, prime: u64, rng: &mut R) -> Self {
        assert!(capacity >= 1, "hasher capacity must be at least 1");
        assert!(
            u64::try_from(capacity).is_ok_and(|c| prime > c),
            "prime modulus must exceed the capacity"
        );

        let a = rng.random_range(1..prime);
        let b = rng.random_range(0..prime);
        Self { capacity, prime, a, b }
    }

    /// Maps an integer key to a bucket index in `[0, capacity)`.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    pub fn index(&self, key: u64) -> usize {
        // 128-bit intermediates: a and b are below the prime (< 2^64) and the
        // key is a full u64, so the affine form cannot overflow here.
        let affine = (u128::from(self.a) * u128::from(key) + u128::from(self.b))
            % u128::from(self.prime);
        // The result is below capacity, so the narrowing cast is lossless.
        (affine % self.capacity as u128) as usize
    }

    /// Returns the capacity this hasher reduces into.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the `(a, b)` coefficients, mostly useful for diagnostics.
    #[must_use]
    pub fn coefficients(&self) -> (u64, u64) {
        (self.a, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_index_stays_in_range() {
        let hasher = UniversalHasher::new(11);
        for key in 0..10_000_u64 {
            assert!(hasher.index(key) < 11);
        }
    }

    #[test]
    fn test_index_is_deterministic_per_instance() {
        let hasher = UniversalHasher::new(23);
        for key in [0_u64, 1, 42, u64::MAX] {
            let first = hasher.index(key);
            assert_eq!(hasher.index(key), first);
            assert_eq!(hasher.index(key), first);
        }
    }

    #[test]
    fn test_multiplier_is_never_zero() {
        for seed in 0..256 {
            let mut rng = StdRng::seed_from_u64(seed);
            let hasher = UniversalHasher::from_rng(11, DEFAULT_PRIME, &mut rng);
            let (a, _) = hasher.coefficients();
            assert_ne!(a, 0);
        }
    }

    #[test]
    fn test_same_seed_draws_same_coefficients() {
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);
        let first = UniversalHasher::from_rng(11, DEFAULT_PRIME, &mut rng_a);
        let second = UniversalHasher::from_rng(11, DEFAULT_PRIME, &mut rng_b);
        assert_eq!(first.coefficients(), second.coefficients());
        for key in 0..100_u64 {
            assert_eq!(first.index(key), second.index(key));
        }
    }

    #[test]
    fn test_independent_instances_are_uncorrelated() {
        // Not guaranteed per pair, but 64 seeds agreeing on everything would
        // mean the draw is broken.
        let mut distinct = false;
        let mut base_rng = StdRng::seed_from_u64(0);
        let base = UniversalHasher::from_rng(101, DEFAULT_PRIME, &mut base_rng);
        for seed in 1..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let other = UniversalHasher::from_rng(101, DEFAULT_PRIME, &mut rng);
            if other.coefficients() != base.coefficients() {
                distinct = true;
            }
        }
        assert!(distinct);
    }

    #[test]
    #[should_panic(expected = "capacity must be at least 1")]
    fn test_zero_capacity_is_rejected() {
        let _hasher = UniversalHasher::new(0);
    }

    #[test]
    #[should_panic(expected = "prime modulus must exceed the capacity")]
    fn test_prime_not_above_capacity_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let _hasher = UniversalHasher::from_rng(97, 97, &mut rng);
    }
}
