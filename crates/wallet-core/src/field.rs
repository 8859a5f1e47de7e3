//! Modular arithmetic over arbitrary-precision integers.
//!
//! Everything here operates on `BigInt` so that 256-bit field and order
//! arithmetic never truncates. Rust's `%` follows the sign of the dividend,
//! so every reduction goes through [`fmod`] to get a non-negative residue.

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

/// Extended Euclidean algorithm.
///
/// Returns `(gcd, x, y)` such that `a * x + b * y == gcd`.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut r0, mut r1) = (a.clone(), b.clone());
    let (mut s0, mut s1) = (BigInt::one(), BigInt::zero());
    let (mut t0, mut t1) = (BigInt::zero(), BigInt::one());
    while !r1.is_zero() {
        let q = &r0 / &r1;
        let r2 = &r0 - &r1 * &q;
        r0 = std::mem::replace(&mut r1, r2);
        let s2 = &s0 - &s1 * &q;
        s0 = std::mem::replace(&mut s1, s2);
        let t2 = &t0 - &t1 * &q;
        t0 = std::mem::replace(&mut t1, t2);
    }
    (r0, s0, t0)
}

/// Modular multiplicative inverse: returns `m` such that `(n * m) % p == 1`.
///
/// # Panics
///
/// Panics if `gcd(n, p) != 1`. With a prime modulus this only happens for
/// `n ≡ 0 (mod p)`, which callers must never pass.
pub fn mod_inverse(n: &BigInt, p: &BigInt) -> BigInt {
    let n = fmod(n, p);
    let (gcd, x, _) = extended_gcd(&n, p);
    assert!(gcd.is_one(), "no modular inverse: operands are not coprime");
    fmod(&x, p)
}

/// Non-negative residue of `a` modulo `p`.
pub fn fmod(a: &BigInt, p: &BigInt) -> BigInt {
    let r = a % p;
    if r.is_negative() {
        r + p
    } else {
        r
    }
}
