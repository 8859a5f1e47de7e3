//! Elliptic Curve Digital Signature Algorithm over secp256k1, with the DER
//! byte encoding of `(r, s)` pairs.
//!
//! [`sign`] draws its ephemeral nonce from the OS random source. Every
//! signature gets an independent draw; a reused or correlated nonce across
//! two signatures under the same key leaks the secret key. Reproducible
//! signatures for test vectors go through [`sign_with_rng`] with an
//! explicitly seeded generator.

use num_bigint::{BigInt, Sign};
use num_traits::{One, Zero};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use thiserror::Error;

use crate::curve::SECP256K1;
use crate::field::{fmod, mod_inverse};
use crate::hash::double_sha256;
use crate::keys::{generate_secret_key, PublicKey};

/// Redraws of the ephemeral nonce before signing gives up. Hitting r = 0 or
/// s = 0 even once is astronomically unlikely with honest randomness, so
/// exhaustion signals a broken entropy source.
const MAX_NONCE_RETRIES: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignError {
    #[error("nonce retries exhausted: upstream entropy source is suspect")]
    RetriesExhausted,
}

/// Rejections from [`Signature::decode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerError {
    #[error("invalid DER frame tag {0:#04x}, expected 0x30")]
    InvalidFrameTag(u8),
    #[error("invalid DER integer tag {0:#04x}, expected 0x02")]
    InvalidIntegerTag(u8),
    #[error("DER integer has zero length")]
    EmptyInteger,
    #[error("DER length field does not match content")]
    LengthMismatch,
    #[error("truncated DER input")]
    Truncated,
}

/// An ECDSA signature. Valid signatures have `1 <= r, s <= n-1`; signatures
/// produced here additionally keep `s` in the lower half of the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub r: BigInt,
    pub s: BigInt,
}

impl Signature {
    /// DER encoding: each integer minimally encoded big-endian, 0x00-padded
    /// when its high bit is set (DER integers are signed), wrapped as
    /// `0x02 len bytes`, the pair framed as `0x30 len content`.
    pub fn encode(&self) -> Vec<u8> {
        let rb = der_integer_bytes(&self.r);
        let sb = der_integer_bytes(&self.s);
        let mut content = Vec::with_capacity(rb.len() + sb.len() + 4);
        content.push(0x02);
        content.push(rb.len() as u8);
        content.extend_from_slice(&rb);
        content.push(0x02);
        content.push(sb.len() as u8);
        content.extend_from_slice(&sb);

        let mut frame = Vec::with_capacity(content.len() + 2);
        frame.push(0x30);
        frame.push(content.len() as u8);
        frame.extend_from_slice(&content);
        frame
    }

    /// Exact inverse of [`Signature::encode`], rejecting malformed tag or
    /// length bytes.
    pub fn decode(bytes: &[u8]) -> Result<Signature, DerError> {
        if bytes.len() < 2 {
            return Err(DerError::Truncated);
        }
        if bytes[0] != 0x30 {
            return Err(DerError::InvalidFrameTag(bytes[0]));
        }
        let content = &bytes[2..];
        if content.len() != bytes[1] as usize {
            return Err(DerError::LengthMismatch);
        }
        let (r, rest) = decode_der_integer(content)?;
        let (s, rest) = decode_der_integer(rest)?;
        if !rest.is_empty() {
            return Err(DerError::LengthMismatch);
        }
        Ok(Signature { r, s })
    }
}

fn der_integer_bytes(v: &BigInt) -> Vec<u8> {
    // num-bigint's big-endian bytes are already minimal (no leading zeros)
    let (_, mut bytes) = v.to_bytes_be();
    if bytes[0] & 0x80 != 0 {
        bytes.insert(0, 0x00);
    }
    bytes
}

fn decode_der_integer(input: &[u8]) -> Result<(BigInt, &[u8]), DerError> {
    if input.len() < 2 {
        return Err(DerError::Truncated);
    }
    if input[0] != 0x02 {
        return Err(DerError::InvalidIntegerTag(input[0]));
    }
    let len = input[1] as usize;
    if len == 0 {
        return Err(DerError::EmptyInteger);
    }
    if input.len() < 2 + len {
        return Err(DerError::Truncated);
    }
    let value = BigInt::from_bytes_be(Sign::Plus, &input[2..2 + len]);
    Ok((value, &input[2 + len..]))
}

/// Sign a message with a secure random nonce from the OS source.
pub fn sign(secret_key: &BigInt, message: &[u8]) -> Result<Signature, SignError> {
    sign_with_rng(&mut OsRng, secret_key, message)
}

/// Sign a message drawing the ephemeral nonce from the given source.
///
/// This is the injection point for reproducible test signatures; production
/// callers use [`sign`]. The nonce is redrawn while `r` or `s` comes out
/// zero, up to a bounded number of attempts.
pub fn sign_with_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
    secret_key: &BigInt,
    message: &[u8],
) -> Result<Signature, SignError> {
    let n = &SECP256K1.gen.n;
    let g = &SECP256K1.gen.g;

    // double-hash the message and reduce to the order
    let z = fmod(&BigInt::from_bytes_be(Sign::Plus, &double_sha256(message)), n);

    for _ in 0..MAX_NONCE_RETRIES {
        let k = generate_secret_key(rng, n);
        let kg = g.scalar_mul(&k);
        let r = match kg.x() {
            Some(x) => fmod(x, n),
            // k is in [1, n-1], so k*G is never infinity
            None => continue,
        };
        if r.is_zero() {
            continue;
        }
        let s = fmod(&(mod_inverse(&k, n) * (&z + secret_key * &r)), n);
        if s.is_zero() {
            continue;
        }
        // low-s canonicalization: a unique, non-malleable representative
        let s = if s > (n >> 1u32) { n - s } else { s };
        return Ok(Signature { r, s });
    }
    Err(SignError::RetriesExhausted)
}

/// Verify a signature over a message. Malformed values (`r` or `s` outside
/// `[1, n-1]`) are reported as "invalid", not as an error.
pub fn verify(public_key: &PublicKey, message: &[u8], sig: &Signature) -> bool {
    let n = &SECP256K1.gen.n;
    let g = &SECP256K1.gen.g;

    let one = BigInt::one();
    if sig.r < one || &sig.r >= n || sig.s < one || &sig.s >= n {
        return false;
    }

    let z = fmod(&BigInt::from_bytes_be(Sign::Plus, &double_sha256(message)), n);
    let s_inv = mod_inverse(&sig.s, n);
    let u1 = fmod(&(&z * &s_inv), n);
    let u2 = fmod(&(&sig.r * &s_inv), n);
    let point = &g.scalar_mul(&u1) + &public_key.point().scalar_mul(&u2);
    match point.x() {
        Some(x) => fmod(x, n) == sig.r,
        None => false,
    }
}
