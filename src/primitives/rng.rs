//! Randomness for ephemeral scalars.
//!
//! Every protocol draw goes through [`random_scalar`] with an injected
//! generator, so a seeded RNG reproduces a run exactly.

use num_bigint::{BigUint, RandBigInt};
use rand::Rng;
use rand_core::{CryptoRng, CryptoRngCore, OsRng, RngCore};

/// Cryptographically secure random number generator.
///
/// A thin wrapper around `OsRng`, used wherever the caller does not inject
/// its own generator.
#[derive(Clone, Copy, Debug)]
pub struct SecureRng(OsRng);

impl SecureRng {
    /// Creates a new cryptographically secure random number generator.
    pub fn new() -> Self {
        Self(OsRng)
    }
}

impl Default for SecureRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RngCore for SecureRng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.0.try_fill_bytes(dest)
    }
}

impl CryptoRng for SecureRng {}

/// Draws a scalar uniformly from the inclusive range `[low, high]`.
///
/// Returns `low` when the range holds a single value; callers guarantee
/// `low <= high`.
pub fn random_scalar<R: CryptoRngCore>(rng: &mut R, low: &BigUint, high: &BigUint) -> BigUint {
    if low >= high {
        return low.clone();
    }
    rng.gen_biguint_range(low, &(high + 1u32))
}

/// Draws an index uniformly from `[0, len)`. `len` must be non-zero.
pub(crate) fn random_index<R: CryptoRngCore>(rng: &mut R, len: usize) -> usize {
    rng.gen_range(0..len)
}

#[cfg(test)]
mod tests {
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    use super::*;

    #[test]
    fn scalar_stays_in_range() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let low = BigUint::from(1u32);
        let high = BigUint::from(10u32);

        for _ in 0..200 {
            let k = random_scalar(&mut rng, &low, &high);
            assert!(k >= low && k <= high);
        }
    }

    #[test]
    fn degenerate_range_returns_low() {
        let mut rng = SecureRng::new();
        let one = BigUint::from(1u32);
        assert_eq!(random_scalar(&mut rng, &one, &one), one);
    }

    #[test]
    fn seeded_draws_are_reproducible() {
        let low = BigUint::from(1u32);
        let high = BigUint::from(1215u32);

        let mut first = ChaCha20Rng::seed_from_u64(42);
        let mut second = ChaCha20Rng::seed_from_u64(42);

        for _ in 0..16 {
            assert_eq!(
                random_scalar(&mut first, &low, &high),
                random_scalar(&mut second, &low, &high)
            );
        }
    }

    #[test]
    fn index_below_len() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        for _ in 0..100 {
            assert!(random_index(&mut rng, 5) < 5);
        }
    }
}
