//! Group elements of a short Weierstrass curve.

use std::fmt;

use num_bigint::BigUint;
use num_traits::{One, Zero};

use super::curve::Curve;
use super::field::{mod_add, mod_inverse, mod_mul, mod_neg, mod_sub};
use crate::{Error, Result};

/// Coordinates of a curve point.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Coordinates {
    /// The point at infinity, identity of the group.
    Infinity,
    /// An affine point with coordinates in `[0, p)`.
    Affine {
        /// x-coordinate
        x: BigUint,
        /// y-coordinate
        y: BigUint,
    },
}

/// A point on a specific [`Curve`].
///
/// Affine points are validated once, when built through [`Curve::point`];
/// every point produced by the group law is on the curve by construction.
/// Operations mixing points of different curves fail with
/// [`Error::IncompatibleCurves`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    curve: Curve,
    coordinates: Coordinates,
}

impl Point {
    /// The point at infinity of `curve`.
    pub fn identity(curve: &Curve) -> Self {
        Self {
            curve: curve.clone(),
            coordinates: Coordinates::Infinity,
        }
    }

    pub(crate) fn from_affine_unchecked(curve: Curve, x: BigUint, y: BigUint) -> Self {
        Self {
            curve,
            coordinates: Coordinates::Affine { x, y },
        }
    }

    /// The curve this point lives on.
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Returns the point's coordinates.
    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    /// Is this the point at infinity?
    pub fn is_infinity(&self) -> bool {
        matches!(self.coordinates, Coordinates::Infinity)
    }

    /// x-coordinate, or `None` for the point at infinity.
    pub fn x(&self) -> Option<&BigUint> {
        match &self.coordinates {
            Coordinates::Affine { x, .. } => Some(x),
            Coordinates::Infinity => None,
        }
    }

    /// y-coordinate, or `None` for the point at infinity.
    pub fn y(&self) -> Option<&BigUint> {
        match &self.coordinates {
            Coordinates::Affine { y, .. } => Some(y),
            Coordinates::Infinity => None,
        }
    }

    /// Returns `-P`, the reflection across the x-axis.
    pub fn negate(&self) -> Self {
        match &self.coordinates {
            Coordinates::Infinity => self.clone(),
            Coordinates::Affine { x, y } => Self::from_affine_unchecked(
                self.curve.clone(),
                x.clone(),
                mod_neg(y, self.curve.p()),
            ),
        }
    }

    /// Adds two points of the same curve.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleCurves`] if `other` lives on another curve.
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.ensure_same_curve(other)?;
        Ok(self.add_unchecked(other))
    }

    /// Computes `self - other`, i.e. `self + (-other)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleCurves`] if `other` lives on another curve.
    #[allow(clippy::should_implement_trait)]
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.add(&other.negate())
    }

    /// Returns `2P`.
    ///
    /// A point with `y = 0` has a vertical tangent, so its double is the point
    /// at infinity.
    pub fn double(&self) -> Self {
        let (x, y) = match &self.coordinates {
            Coordinates::Infinity => return self.clone(),
            Coordinates::Affine { x, y } => (x, y),
        };

        if y.is_zero() {
            return Self::identity(&self.curve);
        }

        let p = self.curve.p();
        let three_x_squared = mod_mul(&BigUint::from(3u32), &mod_mul(x, x, p), p);
        let numerator = mod_add(&three_x_squared, self.curve.a(), p);
        let slope = mod_mul(&numerator, &field_inverse(&mod_add(y, y, p), p), p);

        self.through_line(&slope, x, y, x)
    }

    /// Computes `n * P` by double-and-add over the bits of `n`, least
    /// significant first.
    ///
    /// Stops as soon as the doubling base reaches infinity: every remaining
    /// bit would only add the identity.
    pub fn scalar_mul(&self, n: &BigUint) -> Self {
        let mut result = Self::identity(&self.curve);
        if n.is_zero() || self.is_infinity() {
            return result;
        }

        let mut base = self.clone();
        for bit in 0..n.bits() {
            if n.bit(bit) {
                result = result.add_unchecked(&base);
            }

            base = base.double();
            if base.is_infinity() {
                break;
            }
        }

        result
    }

    /// Order of the point: the smallest `n > 0` with `n * P = O`.
    ///
    /// Found by repeated addition, so the cost is linear in the order. Only
    /// usable on small demonstration curves.
    pub fn order(&self) -> BigUint {
        let mut multiple = self.clone();
        let mut order = BigUint::one();

        while !multiple.is_infinity() {
            multiple = multiple.add_unchecked(self);
            order += 1u32;
        }

        order
    }

    fn ensure_same_curve(&self, other: &Self) -> Result<()> {
        if self.curve != other.curve {
            return Err(Error::IncompatibleCurves);
        }
        Ok(())
    }

    fn add_unchecked(&self, other: &Self) -> Self {
        let (x1, y1, x2, y2) = match (&self.coordinates, &other.coordinates) {
            (Coordinates::Infinity, _) => return other.clone(),
            (_, Coordinates::Infinity) => return self.clone(),
            (Coordinates::Affine { x: x1, y: y1 }, Coordinates::Affine { x: x2, y: y2 }) => {
                (x1, y1, x2, y2)
            }
        };

        if x1 == x2 {
            if y1 == y2 {
                return self.double();
            }
            // Same x on a curve leaves only y2 = -y1: the points are mutual inverses.
            return Self::identity(&self.curve);
        }

        let p = self.curve.p();
        let delta_y = mod_sub(y2, y1, p);
        let delta_x = mod_sub(x2, x1, p);
        let slope = mod_mul(&delta_y, &field_inverse(&delta_x, p), p);

        self.through_line(&slope, x1, y1, x2)
    }

    /// Third intersection of the line of slope `slope` through `(x1, y1)`,
    /// reflected: `x3 = m^2 - x1 - x2`, `y3 = m(x1 - x3) - y1`.
    fn through_line(&self, slope: &BigUint, x1: &BigUint, y1: &BigUint, x2: &BigUint) -> Self {
        let p = self.curve.p();
        let x3 = mod_sub(&mod_sub(&mod_mul(slope, slope, p), x1, p), x2, p);
        let y3 = mod_sub(&mod_mul(slope, &mod_sub(x1, &x3, p), p), y1, p);
        Self::from_affine_unchecked(self.curve.clone(), x3, y3)
    }
}

fn field_inverse(value: &BigUint, p: &BigUint) -> BigUint {
    mod_inverse(value, p)
        .unwrap_or_else(|_| unreachable!("p is prime and the denominator is non-zero"))
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.coordinates {
            Coordinates::Infinity => write!(f, "∞"),
            Coordinates::Affine { x, y } => write!(f, "({x}, {y})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_curve() -> Curve {
        Curve::new(-3, 1, 1217u32).unwrap()
    }

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn doubling_known_point() {
        let curve = demo_curve();
        let g = curve.point(1202, 825).unwrap();

        assert_eq!(g.double(), curve.point(751, 527).unwrap());
        assert_eq!(g.add(&g).unwrap(), curve.point(751, 527).unwrap());
    }

    #[test]
    fn addition_of_distinct_points() {
        let curve = demo_curve();
        let g = curve.point(1202, 825).unwrap();
        let two_g = curve.point(751, 527).unwrap();

        assert_eq!(g.add(&two_g).unwrap(), curve.point(924, 36).unwrap());
        assert_eq!(two_g.add(&g).unwrap(), curve.point(924, 36).unwrap());
    }

    #[test]
    fn negation() {
        let curve = demo_curve();
        let g = curve.point(1202, 825).unwrap();

        assert_eq!(g.negate(), curve.point(1202, 392).unwrap());
        assert!(curve.identity().negate().is_infinity());
        assert!(g.add(&g.negate()).unwrap().is_infinity());
    }

    #[test]
    fn subtraction_undoes_addition() {
        let curve = demo_curve();
        let g = curve.point(1202, 825).unwrap();
        let m = curve.point(1130, 1138).unwrap();

        let sum = m.add(&g).unwrap();
        assert_eq!(sum.sub(&g).unwrap(), m);
        assert!(g.sub(&g).unwrap().is_infinity());
    }

    #[test]
    fn identity_is_neutral() {
        let curve = demo_curve();
        let g = curve.point(1202, 825).unwrap();
        let o = curve.identity();

        assert_eq!(g.add(&o).unwrap(), g);
        assert_eq!(o.add(&g).unwrap(), g);
        assert!(o.add(&o).unwrap().is_infinity());
        assert!(o.double().is_infinity());
    }

    #[test]
    fn vertical_tangent_doubles_to_infinity() {
        let curve = Curve::new(1, 0, 5u32).unwrap();
        for (x, y) in [(0, 0), (2, 0), (3, 0)] {
            let point = curve.point(x, y).unwrap();
            assert!(point.double().is_infinity());
            assert_eq!(point.order(), big(2));
        }
    }

    #[test]
    fn scalar_multiplication_matches_repeated_addition() {
        let curve = demo_curve();
        let g = curve.point(1202, 825).unwrap();

        let mut expected = curve.identity();
        for n in 0..40u64 {
            assert_eq!(g.scalar_mul(&big(n)), expected, "n = {n}");
            expected = expected.add(&g).unwrap();
        }
    }

    #[test]
    fn scalar_multiplication_edge_cases() {
        let curve = demo_curve();
        let g = curve.point(1202, 825).unwrap();

        assert!(g.scalar_mul(&big(0)).is_infinity());
        assert!(curve.identity().scalar_mul(&big(12345)).is_infinity());
        assert_eq!(g.scalar_mul(&big(1)), g);
        assert!(g.scalar_mul(&big(1259)).is_infinity());
        assert_eq!(g.scalar_mul(&big(1260)), g);
    }

    #[test]
    fn scalar_multiplication_on_small_order_point() {
        // (0, 0) has order 2 on y^2 = x^3 + x mod 5; the doubling base hits
        // infinity after one step.
        let curve = Curve::new(1, 0, 5u32).unwrap();
        let t = curve.point(0, 0).unwrap();

        assert_eq!(t.scalar_mul(&big(3)), t);
        assert!(t.scalar_mul(&big(4)).is_infinity());
        assert_eq!(t.scalar_mul(&big(1001)), t);
    }

    #[test]
    fn known_multiple() {
        let curve = demo_curve();
        let p = curve.point(743, 473).unwrap();
        assert_eq!(p.scalar_mul(&big(83)), curve.point(1130, 1138).unwrap());
    }

    #[test]
    fn order_of_demo_base_point() {
        let curve = demo_curve();
        let g = curve.point(1202, 825).unwrap();
        assert_eq!(g.order(), big(1259));
        assert_eq!(curve.identity().order(), big(1));
    }

    #[test]
    fn rejects_cross_curve_operations() {
        let curve = demo_curve();
        let other = Curve::new(2, 3, 97u32).unwrap();
        let g = curve.point(1202, 825).unwrap();
        let h = other.point(0, 10).unwrap();

        assert_eq!(g.add(&h), Err(Error::IncompatibleCurves));
        assert_eq!(g.sub(&h), Err(Error::IncompatibleCurves));
        assert_eq!(g.add(&other.identity()), Err(Error::IncompatibleCurves));
    }

    #[test]
    fn display() {
        let curve = demo_curve();
        assert_eq!(curve.point(1202, 825).unwrap().to_string(), "(1202, 825)");
        assert_eq!(curve.identity().to_string(), "∞");
    }
}
