//! Short Weierstrass curves `y^2 = x^3 + ax + b (mod p)`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use rand_core::CryptoRngCore;
use tracing::{debug, trace, warn};

use super::field::{is_probable_prime, mod_add, mod_mul, mod_pow, reduce};
use super::point::Point;
use super::rng::random_index;
use crate::{Error, Result};

/// An elliptic curve over the prime field `Z/pZ`.
///
/// Cloning is cheap: the parameters live behind an [`Arc`] and every point
/// keeps a handle to the curve it was created on. Two curves are equal when
/// their reduced `(a, b, p)` triples are equal.
///
/// The brute-force routines ([`Curve::points`], [`Curve::cardinality`],
/// [`Curve::prime_order_generator`]) are linear in `p` or in the group order
/// and only make sense for small demonstration fields.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Curve {
    params: Arc<CurveParams>,
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct CurveParams {
    a: BigUint,
    b: BigUint,
    p: BigUint,
}

impl Curve {
    /// Creates the curve `y^2 = x^3 + ax + b (mod p)`.
    ///
    /// `a` and `b` may be negative and are stored reduced into `[0, p)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCurveParameter`] if `p` is 2, 3 or not prime,
    /// or if the curve is singular (`4a^3 + 27b^2 = 0 mod p`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weierstrass_ecc::Curve;
    ///
    /// let curve = Curve::new(-3, 1, 1217u32).unwrap();
    /// assert!(curve.contains(&1202u32.into(), &825u32.into()));
    /// ```
    pub fn new<A, B, P>(a: A, b: B, p: P) -> Result<Self>
    where
        A: Into<BigInt>,
        B: Into<BigInt>,
        P: Into<BigUint>,
    {
        let p = p.into();

        if p == BigUint::from(2u32) || p == BigUint::from(3u32) {
            return Err(Error::InvalidCurveParameter(format!(
                "p must differ from 2 and 3, got {p}"
            )));
        }

        if !is_probable_prime(&p) {
            return Err(Error::InvalidCurveParameter(format!("p = {p} is not prime")));
        }

        let a = reduce(&a.into(), &p);
        let b = reduce(&b.into(), &p);

        let a_cubed = mod_pow(&a, &BigUint::from(3u32), &p);
        let discriminant = mod_add(
            &mod_mul(&BigUint::from(4u32), &a_cubed, &p),
            &mod_mul(&BigUint::from(27u32), &mod_mul(&b, &b, &p), &p),
            &p,
        );
        if discriminant.is_zero() {
            return Err(Error::InvalidCurveParameter(format!(
                "y^2 = x^3 + {a}x + {b} mod {p} is singular"
            )));
        }

        Ok(Self {
            params: Arc::new(CurveParams { a, b, p }),
        })
    }

    /// Coefficient `a`, reduced into `[0, p)`.
    pub fn a(&self) -> &BigUint {
        &self.params.a
    }

    /// Coefficient `b`, reduced into `[0, p)`.
    pub fn b(&self) -> &BigUint {
        &self.params.b
    }

    /// Field modulus `p`.
    pub fn p(&self) -> &BigUint {
        &self.params.p
    }

    /// Right-hand side of the curve equation, `x^3 + ax + b mod p`.
    pub fn evaluate(&self, x: &BigUint) -> BigUint {
        let p = self.p();
        let x_cubed = mod_pow(x, &BigUint::from(3u32), p);
        let ax = mod_mul(self.a(), x, p);
        mod_add(&mod_add(&x_cubed, &ax, p), self.b(), p)
    }

    /// Returns `true` if `(x, y)` satisfies the curve equation modulo `p`.
    pub fn contains(&self, x: &BigUint, y: &BigUint) -> bool {
        let p = self.p();
        mod_mul(y, y, p) == self.evaluate(x)
    }

    /// Creates the affine point `(x, y)` on this curve.
    ///
    /// Coordinates are reduced modulo `p` before the membership check.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PointNotOnCurve`] if the equation does not hold.
    pub fn point<X, Y>(&self, x: X, y: Y) -> Result<Point>
    where
        X: Into<BigInt>,
        Y: Into<BigInt>,
    {
        let x = reduce(&x.into(), self.p());
        let y = reduce(&y.into(), self.p());

        if !self.contains(&x, &y) {
            return Err(Error::PointNotOnCurve {
                x: x.to_string(),
                y: y.to_string(),
            });
        }

        Ok(Point::from_affine_unchecked(self.clone(), x, y))
    }

    /// The point at infinity of this curve.
    pub fn identity(&self) -> Point {
        Point::identity(self)
    }

    /// Enumerates every point of the group: the point at infinity first, then
    /// affine points by ascending `x` and ascending `y`.
    pub fn points(&self) -> Vec<Point> {
        let p = self.p();

        let mut roots: HashMap<BigUint, Vec<BigUint>> = HashMap::new();
        let mut y = BigUint::zero();
        while &y < p {
            roots.entry(mod_mul(&y, &y, p)).or_default().push(y.clone());
            y += 1u32;
        }

        let mut points = vec![self.identity()];
        let mut x = BigUint::zero();
        while &x < p {
            if let Some(ys) = roots.get(&self.evaluate(&x)) {
                points.extend(
                    ys.iter()
                        .map(|y| Point::from_affine_unchecked(self.clone(), x.clone(), y.clone())),
                );
            }
            x += 1u32;
        }

        points
    }

    /// Number of points on the curve, the point at infinity included.
    pub fn cardinality(&self) -> BigUint {
        BigUint::from(self.points().len())
    }

    /// Samples random points until one of prime order turns up.
    ///
    /// Returns `(order, point)`. Orders are found by repeated addition, so the
    /// search is only practical on small curves.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPrimeOrderPointFound`] once `max_attempts` samples
    /// were rejected. This is an expected outcome for a curve whose prime-order
    /// points are rare relative to the budget, not a defect.
    pub fn prime_order_generator<R: CryptoRngCore>(
        &self,
        rng: &mut R,
        max_attempts: usize,
    ) -> Result<(BigUint, Point)> {
        let points = self.points();

        for attempt in 1..=max_attempts {
            let candidate = &points[random_index(rng, points.len())];
            let order = candidate.order();
            trace!(attempt, %candidate, %order, "sampled generator candidate");

            if is_probable_prime(&order) {
                debug!(attempt, %candidate, %order, "found point of prime order");
                return Ok((order, candidate.clone()));
            }
        }

        warn!(max_attempts, curve = %self, "prime-order point search exhausted");
        Err(Error::NoPrimeOrderPointFound {
            attempts: max_attempts,
        })
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "y^2 = x^3 + {}x + {} mod {}",
            self.a(),
            self.b(),
            self.p()
        )
    }
}
