//! Elliptic curve points over a prime field: the group law, double-and-add
//! scalar multiplication, and the secp256k1 parameters.
//!
//! The point at infinity is a first-class variant of [`Point`], not a
//! null-field sentinel, so the identity element is handled by exhaustive
//! matching in the group law.

use std::ops::Add;
use std::sync::LazyLock;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::field::{fmod, mod_inverse};

/// Elliptic curve over the integers modulo a prime.
///
/// Points on the curve satisfy `y^2 = x^3 + a*x + b (mod p)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curve {
    /// Prime modulus of the finite field.
    pub p: BigInt,
    pub a: BigInt,
    pub b: BigInt,
}

impl Curve {
    pub fn new(p: BigInt, a: BigInt, b: BigInt) -> Self {
        Curve { p, a, b }
    }

    /// Check the curve equation for an affine coordinate pair, using this
    /// curve's own coefficients.
    pub fn contains(&self, x: &BigInt, y: &BigInt) -> bool {
        fmod(&(y * y - x * x * x - &self.a * x - &self.b), &self.p).is_zero()
    }
}

/// A point on a [`Curve`]: the group identity (`Infinity`) or an affine
/// coordinate pair. Immutable value type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Point {
    /// The point at infinity, identity of the group.
    Infinity,
    Affine { curve: Curve, x: BigInt, y: BigInt },
}

impl Point {
    pub fn new(curve: Curve, x: BigInt, y: BigInt) -> Self {
        Point::Affine { curve, x, y }
    }

    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    /// Affine x coordinate, `None` for infinity.
    pub fn x(&self) -> Option<&BigInt> {
        match self {
            Point::Infinity => None,
            Point::Affine { x, .. } => Some(x),
        }
    }

    /// Affine y coordinate, `None` for infinity.
    pub fn y(&self) -> Option<&BigInt> {
        match self {
            Point::Infinity => None,
            Point::Affine { y, .. } => Some(y),
        }
    }

    /// Whether this point satisfies its curve's equation. Infinity is
    /// trivially on every curve.
    pub fn on_curve(&self) -> bool {
        match self {
            Point::Infinity => true,
            Point::Affine { curve, x, y } => curve.contains(x, y),
        }
    }

    /// Scalar multiplication by double-and-add: O(log k) point additions.
    ///
    /// `k = 0` yields infinity. Not constant-time; do not reuse for
    /// hardened signing without replacing this routine.
    ///
    /// # Panics
    ///
    /// Panics if `k` is negative.
    pub fn scalar_mul(&self, k: &BigInt) -> Point {
        assert!(!k.is_negative(), "scalar must be non-negative");
        let mut k = k.clone();
        let mut result = Point::Infinity;
        let mut append = self.clone();
        while !k.is_zero() {
            if k.bit(0) {
                result = &result + &append;
            }
            append = &append + &append;
            k >>= 1;
        }
        result
    }
}

impl Add for &Point {
    type Output = Point;

    /// The elliptic curve group law. Commutative; infinity is the identity.
    ///
    /// # Panics
    ///
    /// Panics when adding affine points that live on different curves.
    fn add(self, other: &Point) -> Point {
        let (curve, x1, y1) = match self {
            Point::Infinity => return other.clone(),
            Point::Affine { curve, x, y } => (curve, x, y),
        };
        let (curve2, x2, y2) = match other {
            Point::Infinity => return self.clone(),
            Point::Affine { curve, x, y } => (curve, x, y),
        };
        assert_eq!(curve, curve2, "cannot add points on different curves");

        // P + (-P) = infinity
        if x1 == x2 && y1 != y2 {
            return Point::Infinity;
        }

        let p = &curve.p;
        let m = if x1 == x2 {
            // tangent slope for doubling (y1 == y2 is guaranteed here)
            let num = BigInt::from(3) * x1 * x1 + &curve.a;
            fmod(&(num * mod_inverse(&(BigInt::from(2) * y1), p)), p)
        } else {
            // chord slope
            fmod(&((y1 - y2) * mod_inverse(&(x1 - x2), p)), p)
        };
        let rx = fmod(&(&m * &m - x1 - x2), p);
        let ry = fmod(&(-(&m * (&rx - x1) + y1)), p);
        Point::Affine {
            curve: curve.clone(),
            x: rx,
            y: ry,
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        &self + &other
    }
}

/// A generator over a curve: a base point and its (pre-computed) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generator {
    /// The generating point G.
    pub g: Point,
    /// Order of G, so `0*G = n*G = infinity`. Prime.
    pub n: BigInt,
}

/// Frozen curve parameters shared by every component: the curve, its
/// generator and the generator's order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveConfig {
    pub curve: Curve,
    pub gen: Generator,
}

/// The secp256k1 parameters: <http://www.oid-info.com/get/1.3.132.0.10>
pub static SECP256K1: LazyLock<CurveConfig> = LazyLock::new(|| {
    let p = BigInt::parse_bytes(
        b"FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F",
        16,
    )
    .expect("hex constant");
    let curve = Curve::new(p, BigInt::from(0), BigInt::from(7));
    let gx = BigInt::parse_bytes(
        b"79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798",
        16,
    )
    .expect("hex constant");
    let gy = BigInt::parse_bytes(
        b"483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8",
        16,
    )
    .expect("hex constant");
    let n = BigInt::parse_bytes(
        b"FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141",
        16,
    )
    .expect("hex constant");
    let g = Point::new(curve.clone(), gx, gy);
    CurveConfig {
        curve,
        gen: Generator { g, n },
    }
});
