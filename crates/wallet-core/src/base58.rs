//! Base58 encoding and decoding.
//!
//! Reference: <https://en.bitcoin.it/wiki/Base58Check_encoding>
//!
//! Leading zero bytes are not representable in the positional value, so they
//! map to leading copies of `'1'` (the alphabet's zero character) in both
//! directions.

use thiserror::Error;

const BASE58_ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Base58Error {
    #[error("invalid base58 character: {0}")]
    InvalidCharacter(char),
}

/// Encode bytes as a base58 string.
///
/// The empty input encodes to the empty string.
pub fn b58encode(input: &[u8]) -> String {
    let leading_zeros = input.iter().take_while(|&&b| b == 0).count();

    // interpret the input as a big-endian integer held in base-256 digits
    // and repeatedly divide by 58, collecting remainders
    let mut digits: Vec<u8> = input[leading_zeros..].to_vec();
    let mut chars = Vec::new();
    while !digits.is_empty() {
        let mut remainder = 0u32;
        let mut quotient = Vec::with_capacity(digits.len());
        for &byte in &digits {
            let acc = (remainder << 8) | byte as u32;
            let q = (acc / 58) as u8;
            remainder = acc % 58;
            if !(quotient.is_empty() && q == 0) {
                quotient.push(q);
            }
        }
        chars.push(BASE58_ALPHABET[remainder as usize]);
        digits = quotient;
    }

    let mut out = vec![b'1'; leading_zeros];
    out.extend(chars.iter().rev());
    String::from_utf8(out).expect("alphabet is ASCII")
}

/// Decode a base58 string back to bytes. Exact inverse of [`b58encode`].
pub fn b58decode(input: &str) -> Result<Vec<u8>, Base58Error> {
    let leading_zeros = input.chars().take_while(|&c| c == '1').count();

    let mut result: Vec<u8> = Vec::new();
    for c in input.chars().skip(leading_zeros) {
        let value = BASE58_ALPHABET
            .iter()
            .position(|&x| x == c as u8)
            .ok_or(Base58Error::InvalidCharacter(c))? as u32;

        // multiply the accumulator by 58 and add the digit value
        let mut carry = value;
        for byte in result.iter_mut().rev() {
            let acc = (*byte as u32) * 58 + carry;
            *byte = (acc & 0xFF) as u8;
            carry = acc >> 8;
        }
        while carry > 0 {
            result.insert(0, (carry & 0xFF) as u8);
            carry >>= 8;
        }
    }

    let mut out = vec![0u8; leading_zeros];
    out.extend(result);
    Ok(out)
}
