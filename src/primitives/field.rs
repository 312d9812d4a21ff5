//! Modular arithmetic over `Z/mZ` on arbitrary-precision integers.
//!
//! Every helper returns a canonical residue in `[0, m)`, so callers can compare
//! results with `==` directly.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::{Error, Result};

/// Bases for the Miller-Rabin test. Deterministic for every `n < 3.3 * 10^24`.
const MILLER_RABIN_BASES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Reduces a signed integer into `[0, modulus)`.
///
/// # Panics
///
/// Panics if `modulus` is zero.
pub fn reduce(value: &BigInt, modulus: &BigUint) -> BigUint {
    let m = BigInt::from(modulus.clone());
    let (_, magnitude) = value.mod_floor(&m).into_parts();
    magnitude
}

/// `(a + b) mod m`
///
/// # Panics
///
/// Panics if `m` is zero.
pub fn mod_add(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a + b) % m
}

/// `(a - b) mod m`, without leaving the unsigned domain.
///
/// # Panics
///
/// Panics if `m` is zero.
pub fn mod_sub(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    let a = a % m;
    let b = b % m;
    if a >= b { a - b } else { m - (b - a) }
}

/// `(a * b) mod m`
///
/// # Panics
///
/// Panics if `m` is zero.
pub fn mod_mul(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a * b) % m
}

/// `-a mod m`
///
/// # Panics
///
/// Panics if `m` is zero.
pub fn mod_neg(a: &BigUint, m: &BigUint) -> BigUint {
    mod_sub(&BigUint::zero(), a, m)
}

/// Computes `base^exp mod modulus` by square-and-multiply.
///
/// # Panics
///
/// Panics if `modulus` is zero.
pub fn mod_pow(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    base.modpow(exp, modulus)
}

/// Returns `b` such that `value * b = 1 (mod modulus)`.
///
/// Uses the extended Euclidean algorithm.
///
/// # Errors
///
/// Returns [`Error::NotInvertible`] when `gcd(value, modulus) != 1` or the
/// modulus is zero.
pub fn mod_inverse(value: &BigUint, modulus: &BigUint) -> Result<BigUint> {
    if modulus.is_zero() {
        return Err(Error::not_invertible(value, modulus));
    }

    let a = BigInt::from(value % modulus);
    let m = BigInt::from(modulus.clone());
    let egcd = a.extended_gcd(&m);

    if !egcd.gcd.is_one() {
        return Err(Error::not_invertible(value, modulus));
    }

    Ok(reduce(&egcd.x, modulus))
}

/// Miller-Rabin primality test with fixed witness bases.
///
/// Exact for every input this crate is meant to handle (toy fields and group
/// orders); above `3.3 * 10^24` it degrades to a strong probable-prime test.
pub fn is_probable_prime(n: &BigUint) -> bool {
    let two = BigUint::from(2u32);
    if n < &two {
        return false;
    }

    for base in MILLER_RABIN_BASES {
        let base = BigUint::from(base);
        if n == &base {
            return true;
        }
        if (n % &base).is_zero() {
            return false;
        }
    }

    let n_minus_one = n - 1u32;
    let mut d = n_minus_one.clone();
    let mut r = 0u32;
    while d.is_even() {
        d >>= 1u32;
        r += 1;
    }

    'witness: for base in MILLER_RABIN_BASES {
        let mut x = mod_pow(&BigUint::from(base), &d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }

        for _ in 1..r {
            x = mod_mul(&x, &x, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }

        return false;
    }

    true
}
