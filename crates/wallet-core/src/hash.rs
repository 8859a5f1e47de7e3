//! Digest helpers used throughout the wallet core.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Single SHA256 hash.
#[inline]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let hash = Sha256::digest(data);
    let mut result = [0u8; 32];
    result.copy_from_slice(&hash);
    result
}

/// Double SHA256: SHA256(SHA256(data)).
///
/// Used for transaction ids, sighash digests and base58check checksums.
#[inline]
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut result = [0u8; 32];
    result.copy_from_slice(&second);
    result
}

/// RIPEMD160(SHA256(data)): the 20-byte public-key hash.
#[inline]
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    let ripe = Ripemd160::digest(sha);
    let mut result = [0u8; 20];
    result.copy_from_slice(&ripe);
    result
}
