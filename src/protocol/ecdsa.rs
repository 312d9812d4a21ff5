//! Elliptic Curve Digital Signature Algorithm over a prime-order subgroup.
//!
//! With a generator `G` of prime order `n` and a private scalar `s`, the
//! public key is `Q = s * G`. A signature on digest `m` is the pair
//! `(x, y)` where `x = (k * G).x mod n` and `y = k^-1 (m + s x) mod n` for a
//! fresh nonce `k`.

use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, trace, warn};

use crate::primitives::field::{is_probable_prime, mod_add, mod_inverse, mod_mul};
use crate::primitives::rng::random_scalar;
use crate::{Curve, Error, Point, Result};

/// Signing attempts made before [`Error::SigningExhausted`] is returned.
pub const DEFAULT_MAX_SIGNING_ATTEMPTS: usize = 64;

/// Domain parameters: a generator `G` and its prime order `n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameters {
    generator: Point,
    order: BigUint,
}

impl Parameters {
    /// Creates domain parameters from a known generator and order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDomainParameters`] if the generator is the point
    /// at infinity, the order is not a prime, or `n * G` is not the identity.
    pub fn new(generator: Point, order: BigUint) -> Result<Self> {
        if generator.is_infinity() {
            return Err(Error::InvalidDomainParameters(
                "generator cannot be the point at infinity".to_string(),
            ));
        }

        if !is_probable_prime(&order) {
            return Err(Error::InvalidDomainParameters(format!(
                "order {order} is not prime"
            )));
        }

        if !generator.scalar_mul(&order).is_infinity() {
            return Err(Error::InvalidDomainParameters(format!(
                "{order} * {generator} is not the identity"
            )));
        }

        Ok(Self { generator, order })
    }

    /// Searches `curve` for a point of prime order and uses it as generator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPrimeOrderPointFound`] when the search budget runs out.
    pub fn discover<R: CryptoRngCore>(
        curve: &Curve,
        rng: &mut R,
        max_attempts: usize,
    ) -> Result<Self> {
        let (order, generator) = curve.prime_order_generator(rng, max_attempts)?;
        debug!(%generator, %order, "discovered signature domain parameters");
        Ok(Self { generator, order })
    }

    /// Generator `G`.
    pub fn generator(&self) -> &Point {
        &self.generator
    }

    /// Order `n` of the generator.
    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// Curve of the generator.
    pub fn curve(&self) -> &Curve {
        self.generator.curve()
    }

    fn in_scalar_range(&self, value: &BigUint) -> bool {
        !value.is_zero() && value < &self.order
    }
}

/// ECDSA signature, the pair conventionally written `(r, s)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    x: BigUint,
    y: BigUint,
}

impl Signature {
    /// Creates a signature from raw components. No range check is made here;
    /// [`VerifyingKey::verify`] rejects out-of-range values.
    pub fn new(x: BigUint, y: BigUint) -> Self {
        Self { x, y }
    }

    /// First component, `(k * G).x mod n`.
    pub fn x(&self) -> &BigUint {
        &self.x
    }

    /// Second component, `k^-1 (m + s x) mod n`.
    pub fn y(&self) -> &BigUint {
        &self.y
    }
}

/// Hashes a message with SHA-256 and reads the digest as a big-endian integer.
pub fn digest(message: &[u8]) -> BigUint {
    BigUint::from_bytes_be(&Sha256::digest(message))
}

/// Private signing key `s`.
#[derive(Clone)]
pub struct SigningKey {
    params: Parameters,
    secret: BigUint,
    verifying_key: VerifyingKey,
    max_attempts: usize,
}

impl SigningKey {
    /// Creates a signing key from a private scalar.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDomainParameters`] if `secret` is a multiple of
    /// `n`, which would make the public key the point at infinity.
    pub fn new(params: Parameters, secret: BigUint) -> Result<Self> {
        if (&secret % params.order()).is_zero() {
            return Err(Error::InvalidDomainParameters(format!(
                "secret {secret} is a multiple of the order {}",
                params.order()
            )));
        }
        Ok(Self::from_valid_secret(params, secret))
    }

    fn from_valid_secret(params: Parameters, secret: BigUint) -> Self {
        let public = params.generator().scalar_mul(&secret);
        let verifying_key = VerifyingKey::new(params.clone(), public);
        Self {
            params,
            secret,
            verifying_key,
            max_attempts: DEFAULT_MAX_SIGNING_ATTEMPTS,
        }
    }

    /// Creates a signing key with a secret drawn uniformly from `[1, n - 1]`.
    pub fn random<R: CryptoRngCore>(params: Parameters, rng: &mut R) -> Self {
        let high = params.order() - 1u32;
        let secret = random_scalar(rng, &BigUint::from(1u32), &high);
        Self::from_valid_secret(params, secret)
    }

    /// Overrides the number of nonces tried before signing gives up.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Public counterpart `Q = s * G`.
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Private scalar `s`.
    pub fn secret(&self) -> &BigUint {
        &self.secret
    }

    /// Signs the integer digest `m`.
    ///
    /// Nonces are drawn from `[1, n - 1]`; a nonce that yields `x = 0`,
    /// `y = 0` or no inverse is discarded and a new one drawn.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SigningExhausted`] if every attempt was degenerate.
    pub fn sign<R: CryptoRngCore>(&self, rng: &mut R, m: &BigUint) -> Result<Signature> {
        let high = self.params.order() - 1u32;
        let one = BigUint::from(1u32);

        for attempt in 1..=self.max_attempts {
            let k = random_scalar(rng, &one, &high);
            match self.try_sign_with_nonce(&k, m) {
                Some(signature) => {
                    trace!(attempt, "produced signature");
                    return Ok(signature);
                }
                None => trace!(attempt, "degenerate nonce, drawing another"),
            }
        }

        warn!(attempts = self.max_attempts, "signing budget exhausted");
        Err(Error::SigningExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Signs the SHA-256 digest of `message`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SigningExhausted`] if every attempt was degenerate.
    pub fn sign_message<R: CryptoRngCore>(&self, rng: &mut R, message: &[u8]) -> Result<Signature> {
        self.sign(rng, &digest(message))
    }

    /// A single signing attempt with a fixed nonce `k`.
    ///
    /// Returns `None` when `k` is degenerate for this key and digest. Signing
    /// two digests with the same `k` leaks the secret; see
    /// [`recover_from_nonce_reuse`](crate::recover_from_nonce_reuse).
    pub fn try_sign_with_nonce(&self, k: &BigUint, m: &BigUint) -> Option<Signature> {
        let n = self.params.order();

        let x = self.params.generator().scalar_mul(k).x()? % n;
        if x.is_zero() {
            return None;
        }

        let k_inv = mod_inverse(k, n).ok()?;
        let y = mod_mul(&k_inv, &mod_add(m, &mod_mul(&self.secret, &x, n), n), n);
        if y.is_zero() {
            return None;
        }

        Some(Signature { x, y })
    }
}

/// Public verification key `Q`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifyingKey {
    params: Parameters,
    public: Point,
}

impl VerifyingKey {
    /// Wraps a public point. The point is checked on every verification,
    /// not here.
    pub fn new(params: Parameters, public: Point) -> Self {
        Self { params, public }
    }

    /// Public point `Q`.
    pub fn public_point(&self) -> &Point {
        &self.public
    }

    /// Domain parameters.
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Verifies `signature` on the integer digest `m`.
    ///
    /// Never fails loudly: a malformed key or signature yields `false`.
    pub fn verify(&self, m: &BigUint, signature: &Signature) -> bool {
        let generator = self.params.generator();
        let n = self.params.order();
        let q = &self.public;

        if q.curve() != generator.curve() {
            return false;
        }

        let on_curve = match (q.x(), q.y()) {
            (Some(x), Some(y)) => q.curve().contains(x, y),
            _ => false,
        };
        if !on_curve {
            return false;
        }

        if !q.scalar_mul(n).is_infinity() {
            return false;
        }

        if !self.params.in_scalar_range(&signature.x) || !self.params.in_scalar_range(&signature.y)
        {
            return false;
        }

        let Ok(y_inv) = mod_inverse(&signature.y, n) else {
            return false;
        };
        let u = mod_mul(m, &y_inv, n);
        let v = mod_mul(&signature.x, &y_inv, n);

        let Ok(point) = generator.scalar_mul(&u).add(&q.scalar_mul(&v)) else {
            return false;
        };

        match point.x() {
            Some(x) => &(x % n) == signature.x(),
            None => false,
        }
    }

    /// Verifies `signature` on the SHA-256 digest of `message`.
    pub fn verify_message(&self, message: &[u8], signature: &Signature) -> bool {
        self.verify(&digest(message), signature)
    }
}
