use std::fmt;

use num_bigint::BigUint;
use rand_core::CryptoRngCore;

use crate::primitives::rng::random_scalar;
use crate::{Curve, Error, Point, Result};

/// Elliptic-curve key pair: a private scalar `l` and the public point
/// `Q = l * P` for a base point `P`.
///
/// `Q` is computed once at construction. Keys are never mutated; build a new
/// one to rotate the secret.
#[derive(Clone)]
pub struct Key {
    curve: Curve,
    base: Point,
    private: BigUint,
    public: Point,
}

/// Public half of a [`Key`], as published to peers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    /// Field modulus.
    pub p: BigUint,
    /// Number of points on the curve.
    pub cardinality: BigUint,
    /// The curve itself.
    pub curve: Curve,
    /// Base point `P`.
    pub base: Point,
    /// Public point `Q = l * P`.
    pub q: Point,
}

impl Key {
    /// Creates a key from an explicit private scalar.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleCurves`] if `base` is not on `curve`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weierstrass_ecc::{Curve, Key};
    ///
    /// let curve = Curve::new(-3, 1, 1217u32).unwrap();
    /// let base = curve.point(743, 473).unwrap();
    /// let key = Key::new(&curve, base, 83u32.into()).unwrap();
    ///
    /// assert_eq!(key.public_point(), &curve.point(1130, 1138).unwrap());
    /// ```
    pub fn new(curve: &Curve, base: Point, private: BigUint) -> Result<Self> {
        if base.curve() != curve {
            return Err(Error::IncompatibleCurves);
        }

        let public = base.scalar_mul(&private);
        Ok(Self {
            curve: curve.clone(),
            base,
            private,
            public,
        })
    }

    /// Creates a key with a private scalar drawn uniformly from `[1, p - 2]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleCurves`] if `base` is not on `curve`.
    pub fn random<R: CryptoRngCore>(curve: &Curve, base: Point, rng: &mut R) -> Result<Self> {
        let high = curve.p() - 2u32;
        let private = random_scalar(rng, &BigUint::from(1u32), &high);
        Self::new(curve, base, private)
    }

    /// The curve the key lives on.
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Base point `P`.
    pub fn base(&self) -> &Point {
        &self.base
    }

    /// Public point `Q = l * P`.
    pub fn public_point(&self) -> &Point {
        &self.public
    }

    /// Public parameters `(p, #E, curve, P, Q)`.
    ///
    /// Counts the curve's points, so this is only cheap on small curves.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            p: self.curve.p().clone(),
            cardinality: self.curve.cardinality(),
            curve: self.curve.clone(),
            base: self.base.clone(),
            q: self.public.clone(),
        }
    }

    /// Private scalar `l`.
    pub fn private_key(&self) -> &BigUint {
        &self.private
    }

    /// Diffie-Hellman shared point `l * peer`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleCurves`] if `peer` lives on another curve.
    pub fn shared_secret(&self, peer: &Point) -> Result<Point> {
        if peer.curve() != &self.curve {
            return Err(Error::IncompatibleCurves);
        }
        Ok(peer.scalar_mul(&self.private))
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("curve", &self.curve)
            .field("base", &self.base)
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    use super::*;

    fn demo_curve() -> Curve {
        Curve::new(-3, 1, 1217u32).unwrap()
    }

    #[test]
    fn public_point_is_derived_once() {
        let curve = demo_curve();
        let base = curve.point(743, 473).unwrap();
        let key = Key::new(&curve, base.clone(), BigUint::from(83u32)).unwrap();

        assert_eq!(key.private_key(), &BigUint::from(83u32));
        assert_eq!(key.public_point(), &base.scalar_mul(&BigUint::from(83u32)));
    }

    #[test]
    fn public_key_exposes_curve_parameters() {
        let curve = demo_curve();
        let base = curve.point(1202, 825).unwrap();
        let key = Key::new(&curve, base.clone(), BigUint::from(5u32)).unwrap();
        let public = key.public_key();

        assert_eq!(public.p, BigUint::from(1217u32));
        assert_eq!(public.cardinality, BigUint::from(1259u32));
        assert_eq!(public.curve, curve);
        assert_eq!(public.base, base);
        assert_eq!(&public.q, key.public_point());
    }

    #[test]
    fn rejects_base_from_other_curve() {
        let curve = demo_curve();
        let other = Curve::new(2, 3, 97u32).unwrap();
        let base = other.point(0, 10).unwrap();

        assert!(matches!(
            Key::new(&curve, base, BigUint::from(3u32)),
            Err(Error::IncompatibleCurves)
        ));
    }

    #[test]
    fn random_key_in_range() {
        let curve = demo_curve();
        let base = curve.point(1202, 825).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(11);

        for _ in 0..20 {
            let key = Key::random(&curve, base.clone(), &mut rng).unwrap();
            assert!(key.private_key() >= &BigUint::from(1u32));
            assert!(key.private_key() <= &BigUint::from(1215u32));
        }
    }

    #[test]
    fn shared_secrets_agree() {
        let curve = demo_curve();
        let base = curve.point(1202, 825).unwrap();
        let alice = Key::new(&curve, base.clone(), BigUint::from(7u32)).unwrap();
        let bob = Key::new(&curve, base, BigUint::from(9u32)).unwrap();

        assert_eq!(
            alice.shared_secret(bob.public_point()).unwrap(),
            bob.shared_secret(alice.public_point()).unwrap()
        );
    }

    #[test]
    fn debug_hides_private_scalar() {
        let curve = demo_curve();
        let base = curve.point(1202, 825).unwrap();
        let key = Key::new(&curve, base, BigUint::from(987_654u32)).unwrap();

        assert!(!format!("{key:?}").contains("987654"));
    }
}
