//! Cryptographic and serialization core for a UTXO wallet.
//!
//! This crate provides pure Rust implementations of:
//! - Elliptic curve point arithmetic over a prime field (secp256k1)
//! - Secret key generation, SEC public-key encoding and base58check addresses
//! - ECDSA signing/verification with DER signature encoding
//! - Transaction wire serialization, including the per-input signing
//!   message (sighash) construction
//!
//! All operations are synchronous value-in/value-out computations; the only
//! I/O is drawing from the OS random source for keys and signing nonces.
//! The scalar multiplication here is not constant-time, which is acceptable
//! for this educational core but rules out hardened production use as-is.

pub mod base58;
pub mod curve;
pub mod ecdsa;
pub mod field;
pub mod hash;
pub mod keys;
pub mod network;
pub mod script;
pub mod transaction;

pub use base58::{b58decode, b58encode, Base58Error};
pub use curve::{Curve, CurveConfig, Generator, Point, SECP256K1};
pub use ecdsa::{sign, sign_with_rng, verify, DerError, SignError, Signature};
pub use hash::{double_sha256, hash160, sha256};
pub use keys::{create_identity, gen_key_pair, generate_secret_key, Identity, PublicKey};
pub use network::Network;
pub use script::{Cmd, Script, ScriptError};
pub use transaction::{encode_varint, ScriptMode, Tx, TxError, TxIn, TxOut, SIGHASH_ALL};
