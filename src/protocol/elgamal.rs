//! ElGamal encryption of curve points.
//!
//! A message is a point `M`. With base `P` and recipient key `Q = l * P`:
//! `encrypt` returns `(C1, C2) = (k * P, M + k * Q)` for a fresh ephemeral
//! `k`, and `decrypt` recovers `M = C2 - l * C1`.

use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use tracing::debug;

use crate::primitives::rng::random_scalar;
use crate::{Curve, Error, Point, Result};

/// ElGamal ciphertext pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    c1: Point,
    c2: Point,
}

impl Ciphertext {
    /// Assembles a ciphertext from its two components.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleCurves`] if the points live on different curves.
    pub fn new(c1: Point, c2: Point) -> Result<Self> {
        if c1.curve() != c2.curve() {
            return Err(Error::IncompatibleCurves);
        }
        Ok(Self { c1, c2 })
    }

    /// Ephemeral component `C1 = k * P`.
    pub fn c1(&self) -> &Point {
        &self.c1
    }

    /// Masked message `C2 = M + k * Q`.
    pub fn c2(&self) -> &Point {
        &self.c2
    }
}

/// Encrypts `message` for the holder of `public`, drawing `k` uniformly from
/// `[1, p - 2]`.
///
/// # Errors
///
/// Returns [`Error::IncompatibleCurves`] if `base`, `public` or `message` is
/// not on `curve`.
pub fn encrypt<R: CryptoRngCore>(
    curve: &Curve,
    base: &Point,
    public: &Point,
    message: &Point,
    rng: &mut R,
) -> Result<Ciphertext> {
    let high = curve.p() - 2u32;
    let k = random_scalar(rng, &BigUint::from(1u32), &high);
    debug!("drew ephemeral scalar for encryption");

    encrypt_with_ephemeral(curve, base, public, message, &k)
}

/// Encrypts with a caller-chosen ephemeral scalar `k`.
///
/// Reusing `k` across messages reveals `M1 - M2`; use [`encrypt`] unless the
/// nonce is managed elsewhere.
///
/// # Errors
///
/// Returns [`Error::IncompatibleCurves`] if `base`, `public` or `message` is
/// not on `curve`.
pub fn encrypt_with_ephemeral(
    curve: &Curve,
    base: &Point,
    public: &Point,
    message: &Point,
    k: &BigUint,
) -> Result<Ciphertext> {
    if [base, public, message].iter().any(|point| point.curve() != curve) {
        return Err(Error::IncompatibleCurves);
    }

    let c1 = base.scalar_mul(k);
    let c2 = message.add(&public.scalar_mul(k))?;

    Ok(Ciphertext { c1, c2 })
}

/// Recovers the message point `C2 - l * C1`.
///
/// # Errors
///
/// Propagates [`Error::IncompatibleCurves`] from the group law.
pub fn decrypt(private: &BigUint, ciphertext: &Ciphertext) -> Result<Point> {
    ciphertext.c2.sub(&ciphertext.c1.scalar_mul(private))
}

#[cfg(test)]
mod tests {
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    use super::*;
    use crate::Key;

    fn setup() -> (Curve, Key) {
        let curve = Curve::new(-3, 1, 1217u32).unwrap();
        let base = curve.point(743, 473).unwrap();
        let key = Key::new(&curve, base, BigUint::from(83u32)).unwrap();
        (curve, key)
    }

    #[test]
    fn roundtrip() {
        let (curve, key) = setup();
        let message = curve.point(1130, 1138).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(5);

        let ciphertext =
            encrypt(&curve, key.base(), key.public_point(), &message, &mut rng).unwrap();
        assert_eq!(decrypt(key.private_key(), &ciphertext).unwrap(), message);
    }

    #[test]
    fn ephemeral_components() {
        let (curve, key) = setup();
        let message = curve.point(1202, 825).unwrap();
        let k = BigUint::from(17u32);

        let ciphertext =
            encrypt_with_ephemeral(&curve, key.base(), key.public_point(), &message, &k).unwrap();

        assert_eq!(ciphertext.c1(), &key.base().scalar_mul(&k));
        assert_eq!(
            ciphertext.c2(),
            &message.add(&key.public_point().scalar_mul(&k)).unwrap()
        );
        assert_eq!(decrypt(key.private_key(), &ciphertext).unwrap(), message);
    }

    #[test]
    fn identity_message_roundtrips() {
        let (curve, key) = setup();
        let message = curve.identity();

        let ciphertext = encrypt_with_ephemeral(
            &curve,
            key.base(),
            key.public_point(),
            &message,
            &BigUint::from(3u32),
        )
        .unwrap();
        assert!(decrypt(key.private_key(), &ciphertext).unwrap().is_infinity());
    }

    #[test]
    fn wrong_key_does_not_decrypt() {
        let (curve, key) = setup();
        let message = curve.point(1130, 1138).unwrap();

        let ciphertext = encrypt_with_ephemeral(
            &curve,
            key.base(),
            key.public_point(),
            &message,
            &BigUint::from(29u32),
        )
        .unwrap();
        assert_ne!(decrypt(&BigUint::from(84u32), &ciphertext).unwrap(), message);
    }

    #[test]
    fn rejects_foreign_message() {
        let (curve, key) = setup();
        let other = Curve::new(2, 3, 97u32).unwrap();
        let foreign = other.point(0, 10).unwrap();

        assert!(matches!(
            encrypt_with_ephemeral(
                &curve,
                key.base(),
                key.public_point(),
                &foreign,
                &BigUint::from(3u32)
            ),
            Err(Error::IncompatibleCurves)
        ));
        assert!(Ciphertext::new(key.base().clone(), foreign).is_err());
    }
}
