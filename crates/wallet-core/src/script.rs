//! Locking/unlocking script construction and byte encoding.
//!
//! Only construction is in scope; there is no interpreter. A script is an
//! ordered list of commands, each either a single-byte opcode or a raw data
//! push.

use thiserror::Error;

use crate::transaction::encode_varint;

pub const OP_DUP: u8 = 0x76;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_CHECKSIG: u8 = 0xac;

/// Data pushes of this length or more need OP_PUSHDATA handling, which this
/// codec does not support.
const MAX_PUSH_LEN: usize = 75;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("data push of {0} bytes is too large: pushes must be under 75 bytes")]
    PushTooLarge(usize),
}

/// One script element: an opcode or a data push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    Op(u8),
    Push(Vec<u8>),
}

/// A locking or unlocking script.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Script {
    pub cmds: Vec<Cmd>,
}

impl Script {
    pub fn new(cmds: Vec<Cmd>) -> Self {
        Script { cmds }
    }

    /// The zero-length script, used to neutralize inputs during signing.
    pub fn empty() -> Self {
        Script { cmds: Vec::new() }
    }

    /// Standard pay-to-pubkey-hash locking script:
    /// `OP_DUP OP_HASH160 <20-byte hash> OP_EQUALVERIFY OP_CHECKSIG`.
    pub fn p2pkh(pkb_hash: &[u8; 20]) -> Self {
        Script {
            cmds: vec![
                Cmd::Op(OP_DUP),
                Cmd::Op(OP_HASH160),
                Cmd::Push(pkb_hash.to_vec()),
                Cmd::Op(OP_EQUALVERIFY),
                Cmd::Op(OP_CHECKSIG),
            ],
        }
    }

    /// Standard P2PKH unlocking script: `<DER signature + sighash byte>
    /// <SEC public key>`.
    pub fn p2pkh_unlock(sig_bytes: Vec<u8>, pubkey_bytes: Vec<u8>) -> Self {
        Script {
            cmds: vec![Cmd::Push(sig_bytes), Cmd::Push(pubkey_bytes)],
        }
    }

    /// Encode the script, prefixed with its own varint byte length.
    ///
    /// Opcodes encode as their byte value; a push encodes as a one-byte
    /// length followed by the raw bytes.
    pub fn encode(&self) -> Result<Vec<u8>, ScriptError> {
        let mut body = Vec::new();
        for cmd in &self.cmds {
            match cmd {
                Cmd::Op(op) => body.push(*op),
                Cmd::Push(data) => {
                    if data.len() >= MAX_PUSH_LEN {
                        return Err(ScriptError::PushTooLarge(data.len()));
                    }
                    body.push(data.len() as u8);
                    body.extend_from_slice(data);
                }
            }
        }
        let mut out = Vec::with_capacity(body.len() + 9);
        encode_varint(body.len() as u64, &mut out);
        out.extend_from_slice(&body);
        Ok(out)
    }
}
