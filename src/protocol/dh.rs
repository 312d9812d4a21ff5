use num_bigint::BigUint;
use tracing::{debug, warn};

use crate::{Error, Point, Result};

/// Runs both sides of an elliptic-curve Diffie-Hellman exchange.
///
/// Party A publishes `nA * P` and party B publishes `nB * P`; A then computes
/// `nA * (nB * P)` and B computes `nB * (nA * P)`. The agreed point is
/// returned.
///
/// # Errors
///
/// Returns [`Error::KeyAgreementMismatch`] if the two sides disagree. Scalar
/// multiplication commutes, so this only fires on an arithmetic defect.
///
/// # Examples
///
/// ```rust
/// use weierstrass_ecc::{diffie_hellman, Curve};
///
/// let curve = Curve::new(-3, 1, 1217u32).unwrap();
/// let base = curve.point(1202, 825).unwrap();
///
/// let shared = diffie_hellman(&3u32.into(), &4u32.into(), &base).unwrap();
/// assert_eq!(shared, base.scalar_mul(&12u32.into()));
/// ```
pub fn diffie_hellman(n_a: &BigUint, n_b: &BigUint, base: &Point) -> Result<Point> {
    let share_a = base.scalar_mul(n_a);
    let share_b = base.scalar_mul(n_b);
    debug!(%share_a, %share_b, "exchanged public shares");

    let key_a = share_b.scalar_mul(n_a);
    let key_b = share_a.scalar_mul(n_b);

    if key_a != key_b {
        warn!(%key_a, %key_b, "parties derived different shared points");
        return Err(Error::KeyAgreementMismatch);
    }

    debug!(shared = %key_a, "key agreement succeeded");
    Ok(key_a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Curve;

    #[test]
    fn agreement_for_small_secrets() {
        let curve = Curve::new(-3, 1, 1217u32).unwrap();
        let base = curve.point(1202, 825).unwrap();

        for n_a in 1..=10u32 {
            for n_b in 1..=10u32 {
                let shared =
                    diffie_hellman(&BigUint::from(n_a), &BigUint::from(n_b), &base).unwrap();
                assert_eq!(shared, base.scalar_mul(&BigUint::from(n_a * n_b)));
            }
        }
    }

    #[test]
    fn zero_secret_agrees_on_identity() {
        let curve = Curve::new(-3, 1, 1217u32).unwrap();
        let base = curve.point(1202, 825).unwrap();

        let shared = diffie_hellman(&BigUint::from(0u32), &BigUint::from(5u32), &base).unwrap();
        assert!(shared.is_infinity());
    }
}
