//! Secret/public key pairs and wallet addresses.
//!
//! "Secret" rather than "private" so that `sk` and `pk` stay unambiguous
//! shorthands for the two halves of a pair.

use num_bigint::{BigInt, Sign};
use num_traits::One;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::base58::b58encode;
use crate::curve::{Point, SECP256K1};
use crate::hash::{double_sha256, hash160};
use crate::network::Network;

/// Draw a uniformly random secret key in `[1, n-1]`.
///
/// Rejection-samples 32-byte draws from the given source until one lands in
/// range, so the result carries no modulo bias.
pub fn generate_secret_key<R: RngCore + CryptoRng>(rng: &mut R, n: &BigInt) -> BigInt {
    loop {
        let mut buf = [0u8; 32];
        rng.fill_bytes(&mut buf);
        let key = BigInt::from_bytes_be(Sign::Plus, &buf);
        if key >= BigInt::one() && &key < n {
            return key;
        }
    }
}

/// Generate a (secret, public) key pair from the OS random source.
pub fn gen_key_pair() -> (BigInt, PublicKey) {
    let sk = generate_secret_key(&mut OsRng, &SECP256K1.gen.n);
    let pk = PublicKey::from_secret_key(&sk);
    (sk, pk)
}

/// A public key: a [`Point`] on the curve, promoted with encoding and
/// address derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey(Point);

impl PublicKey {
    /// Promote a point to a public key.
    ///
    /// # Panics
    ///
    /// Panics if the point is the point at infinity, which is never a valid
    /// public key.
    pub fn from_point(point: Point) -> Self {
        assert!(
            !point.is_infinity(),
            "public key cannot be the point at infinity"
        );
        PublicKey(point)
    }

    /// Derive the public key `sk * G` for a secret key.
    pub fn from_secret_key(sk: &BigInt) -> Self {
        Self::from_point(SECP256K1.gen.g.scalar_mul(sk))
    }

    pub fn point(&self) -> &Point {
        &self.0
    }

    /// SEC byte encoding of the public key.
    ///
    /// Compressed: a parity prefix (0x02 for even y, 0x03 for odd) followed
    /// by x as 32 big-endian bytes. Uncompressed: 0x04 followed by x and y.
    pub fn encode(&self, compressed: bool) -> Vec<u8> {
        let (x, y) = match &self.0 {
            Point::Affine { x, y, .. } => (x, y),
            Point::Infinity => unreachable!("checked in from_point"),
        };
        if compressed {
            let prefix = if y.bit(0) { 0x03 } else { 0x02 };
            let mut out = Vec::with_capacity(33);
            out.push(prefix);
            out.extend_from_slice(&int_to_32_bytes(x));
            out
        } else {
            let mut out = Vec::with_capacity(65);
            out.push(0x04);
            out.extend_from_slice(&int_to_32_bytes(x));
            out.extend_from_slice(&int_to_32_bytes(y));
            out
        }
    }

    /// The 20-byte hash160 of the SEC encoding.
    pub fn hash160(&self, compressed: bool) -> [u8; 20] {
        hash160(&self.encode(compressed))
    }

    /// Checksummed base58 address: version byte, hash160 of the public key,
    /// and the first 4 bytes of the double-SHA256 checksum.
    pub fn address(&self, network: Network, compressed: bool) -> String {
        let mut payload = Vec::with_capacity(25);
        payload.push(network.p2pkh_version());
        payload.extend_from_slice(&self.hash160(compressed));
        let checksum = double_sha256(&payload);
        payload.extend_from_slice(&checksum[..4]);
        b58encode(&payload)
    }
}

/// A wallet identity: secret key, public key, and derived address.
#[derive(Debug, Clone)]
pub struct Identity {
    pub secret_key: BigInt,
    pub public_key: PublicKey,
    pub address: String,
    /// hash160 of the compressed public key, as referenced by P2PKH scripts.
    pub pkb_hash: [u8; 20],
}

impl Identity {
    /// Build the identity for an existing secret key.
    pub fn from_secret_key(secret_key: BigInt, network: Network) -> Self {
        let public_key = PublicKey::from_secret_key(&secret_key);
        let address = public_key.address(network, true);
        let pkb_hash = public_key.hash160(true);
        Identity {
            secret_key,
            public_key,
            address,
            pkb_hash,
        }
    }
}

/// Create a fresh wallet identity with a random secret key.
pub fn create_identity(network: Network) -> Identity {
    let sk = generate_secret_key(&mut OsRng, &SECP256K1.gen.n);
    Identity::from_secret_key(sk, network)
}

/// Fixed-width 32-byte big-endian encoding of a non-negative integer.
fn int_to_32_bytes(v: &BigInt) -> [u8; 32] {
    let (_, bytes) = v.to_bytes_be();
    assert!(bytes.len() <= 32, "value does not fit in 32 bytes");
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_public_key_for_sk_1231() {
        let pk = PublicKey::from_secret_key(&BigInt::from(1231));
        let x = BigInt::parse_bytes(
            b"7eb23f485eb92bd01c0e6448e19adc226ca45c46d4d5c756e552ce7d551600c5",
            16,
        )
        .unwrap();
        let y = BigInt::parse_bytes(
            b"953e9b124278b93907b3de0763e30c55a300ef97a8587328b3dc27b1a7c57ac5",
            16,
        )
        .unwrap();
        assert_eq!(pk.point().x(), Some(&x));
        assert_eq!(pk.point().y(), Some(&y));
        assert!(pk.point().on_curve());
    }

    #[test]
    fn test_sec_encoding() {
        let pk = PublicKey::from_secret_key(&BigInt::from(1231));
        assert_eq!(
            hex::encode(pk.encode(true)),
            "037eb23f485eb92bd01c0e6448e19adc226ca45c46d4d5c756e552ce7d551600c5"
        );
        assert_eq!(
            hex::encode(pk.encode(false)),
            "047eb23f485eb92bd01c0e6448e19adc226ca45c46d4d5c756e552ce7d551600c5\
             953e9b124278b93907b3de0763e30c55a300ef97a8587328b3dc27b1a7c57ac5"
        );
        assert_eq!(
            hex::encode(pk.hash160(true)),
            "b7399fcad6389aa9868884c8a687af2c4ecab548"
        );
        assert_eq!(
            hex::encode(pk.hash160(false)),
            "cd45000e876ab0abd29cbc7d676da163bf44a646"
        );
    }

    #[test]
    fn test_addresses_for_sk_1231() {
        let pk = PublicKey::from_secret_key(&BigInt::from(1231));
        assert_eq!(
            pk.address(Network::Testnet, true),
            "mxDkyxWMAFy7vhhBmF1epT7rvrNj43PNYx"
        );
        assert_eq!(
            pk.address(Network::Mainnet, true),
            "1HhoguRNMEXs9bDa3g3GzXuY4rn28QT54x"
        );
    }

    #[test]
    fn test_generate_secret_key_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let n = &SECP256K1.gen.n;
        for _ in 0..16 {
            let sk = generate_secret_key(&mut rng, n);
            assert!(sk >= BigInt::one());
            assert!(&sk < n);
        }
    }

    #[test]
    fn test_identity_matches_manual_derivation() {
        let identity = Identity::from_secret_key(BigInt::from(1231), Network::Testnet);
        assert_eq!(identity.address, "mxDkyxWMAFy7vhhBmF1epT7rvrNj43PNYx");
        assert_eq!(
            identity.pkb_hash,
            identity.public_key.hash160(true)
        );
    }

    #[test]
    #[should_panic(expected = "point at infinity")]
    fn test_infinity_is_not_a_public_key() {
        PublicKey::from_point(crate::curve::Point::Infinity);
    }
}
