//! Private-key recovery from ECDSA signatures that share a nonce.
//!
//! Two signatures made with the same `k` share `x`. From
//! `y1 - y2 = k^-1 (m1 - m2) mod n` the nonce follows, and then the secret
//! from `s = (y1 k - m1) x^-1 mod n`.

use std::collections::HashMap;

use num_bigint::BigUint;
use tracing::{debug, trace};

use super::ecdsa::Signature;
use crate::primitives::field::{mod_inverse, mod_mul, mod_sub};
use crate::{Error, Result};

/// Nonce and private scalar recovered from a reused nonce.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecoveredKey {
    /// Shared nonce `k`.
    pub nonce: BigUint,
    /// Signer's private scalar `s`.
    pub secret: BigUint,
}

/// Recovers `(k, s)` from two digests signed with the same nonce.
///
/// # Errors
///
/// Returns [`Error::InvalidDomainParameters`] if `order` is below 2 or the
/// signatures do not share `x`, and [`Error::NotInvertible`] if
/// `y1 = y2 (mod n)` or `x` has no inverse modulo `n`.
pub fn recover_from_nonce_reuse(
    order: &BigUint,
    first: (&BigUint, &Signature),
    second: (&BigUint, &Signature),
) -> Result<RecoveredKey> {
    ensure_usable_order(order)?;

    let (m1, sig1) = first;
    let (m2, sig2) = second;

    if sig1.x() != sig2.x() {
        return Err(Error::InvalidDomainParameters(
            "signatures do not share a nonce".to_string(),
        ));
    }

    let delta_y = mod_sub(sig1.y(), sig2.y(), order);
    let delta_m = mod_sub(m1, m2, order);
    let nonce = mod_mul(&delta_m, &mod_inverse(&delta_y, order)?, order);

    let x_inv = mod_inverse(sig1.x(), order)?;
    let numerator = mod_sub(&mod_mul(sig1.y(), &nonce, order), m1, order);
    let secret = mod_mul(&numerator, &x_inv, order);

    Ok(RecoveredKey { nonce, secret })
}

/// Groups signed digests by `x` and attempts recovery on every group with a
/// repeated nonce.
///
/// A recovery is returned only when every usable pair in its group agrees on
/// the secret. Groups whose pairs are all degenerate are skipped.
///
/// # Errors
///
/// Returns [`Error::InvalidDomainParameters`] if `order` is below 2.
pub fn scan_for_nonce_reuse(
    order: &BigUint,
    signed: &[(BigUint, Signature)],
) -> Result<Vec<RecoveredKey>> {
    ensure_usable_order(order)?;

    let mut groups: HashMap<&BigUint, Vec<&(BigUint, Signature)>> = HashMap::new();
    for entry in signed {
        groups.entry(entry.1.x()).or_default().push(entry);
    }

    let mut recovered = Vec::new();
    for (x, group) in groups {
        if group.len() < 2 {
            continue;
        }

        let mut candidates = Vec::new();
        for (i, (m1, sig1)) in group.iter().map(|e| (&e.0, &e.1)).enumerate() {
            for (m2, sig2) in group.iter().skip(i + 1).map(|e| (&e.0, &e.1)) {
                match recover_from_nonce_reuse(order, (m1, sig1), (m2, sig2)) {
                    Ok(key) => candidates.push(key),
                    Err(e) => trace!(%x, error = %e, "skipping degenerate pair"),
                }
            }
        }

        let Some(first) = candidates.first() else {
            continue;
        };
        if candidates.iter().all(|key| key.secret == first.secret) {
            debug!(%x, pairs = candidates.len(), "recovered secret from reused nonce");
            recovered.push(first.clone());
        }
    }

    Ok(recovered)
}

fn ensure_usable_order(order: &BigUint) -> Result<()> {
    if order < &BigUint::from(2u32) {
        return Err(Error::InvalidDomainParameters(format!(
            "order {order} cannot serve as a signature modulus"
        )));
    }
    Ok(())
}
