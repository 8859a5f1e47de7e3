//! Transaction structures and their wire-format serialization, including
//! the per-input signature message (sighash) construction.
//!
//! Reference: <https://en.bitcoin.it/wiki/Transaction>

use thiserror::Error;

use crate::hash::double_sha256;
use crate::network::Network;
use crate::script::{Script, ScriptError};

/// Sighash type appended to a signing message: 1 means "sign everything".
pub const SIGHASH_ALL: u32 = 1;

/// Default sequence number for inputs.
pub const SEQUENCE_FINAL: u32 = 0xFFFF_FFFF;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxError {
    #[error("input has no unlocking script; sign the transaction before serializing")]
    MissingScriptSig,
    #[error("signing index {index} out of range for {inputs} inputs")]
    SigIndexOutOfRange { index: usize, inputs: usize },
    #[error(transparent)]
    Script(#[from] ScriptError),
}

/// Encode a variable-length integer (varint).
pub fn encode_varint(value: u64, out: &mut Vec<u8>) {
    if value < 0xfd {
        out.push(value as u8);
    } else if value < 0x10000 {
        out.push(0xfd);
        out.extend_from_slice(&(value as u16).to_le_bytes());
    } else if value < 0x100000000 {
        out.push(0xfe);
        out.extend_from_slice(&(value as u32).to_le_bytes());
    } else {
        out.push(0xff);
        out.extend_from_slice(&value.to_le_bytes());
    }
}

/// Which script an input contributes to its encoding.
///
/// `Actual` serializes the real unlocking script of a signed input.
/// During signing, the one input being signed substitutes the locking
/// script it is trying to satisfy (`Substitute`) and every other input is
/// neutralized to a zero-length script (`Empty`) so independent signers do
/// not interfere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptMode {
    Actual,
    Substitute,
    Empty,
}

/// A transaction input, spending one previous output in its entirety.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxIn {
    pub network: Network,
    /// Id of the transaction holding the output being spent, in the usual
    /// big-endian display order.
    pub prev_tx: [u8; 32],
    /// Index of the output being spent within that transaction.
    pub prev_index: u32,
    /// Locking script of the output being spent. Only consulted while
    /// building the signing message, never serialized into the final bytes.
    pub prev_script_pubkey: Script,
    /// Unlocking script, absent until the input is signed.
    pub script_sig: Option<Script>,
    pub sequence: u32,
}

impl TxIn {
    pub fn new(
        network: Network,
        prev_tx: [u8; 32],
        prev_index: u32,
        prev_script_pubkey: Script,
    ) -> Self {
        TxIn {
            network,
            prev_tx,
            prev_index,
            prev_script_pubkey,
            script_sig: None,
            sequence: SEQUENCE_FINAL,
        }
    }

    /// Serialize this input with the given script selection.
    pub fn encode(&self, mode: ScriptMode) -> Result<Vec<u8>, TxError> {
        let mut out = Vec::with_capacity(40 + 110);

        // display order is the reverse of wire byte order
        let mut prev = self.prev_tx;
        prev.reverse();
        out.extend_from_slice(&prev);
        out.extend_from_slice(&self.prev_index.to_le_bytes());

        let script = match mode {
            ScriptMode::Actual => self
                .script_sig
                .as_ref()
                .ok_or(TxError::MissingScriptSig)?
                .encode()?,
            ScriptMode::Substitute => self.prev_script_pubkey.encode()?,
            ScriptMode::Empty => Script::empty().encode()?,
        };
        out.extend_from_slice(&script);
        out.extend_from_slice(&self.sequence.to_le_bytes());
        Ok(out)
    }
}

/// A transaction output: an amount in base units and the locking script
/// that names its recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOut {
    pub amount: u64,
    pub script_pubkey: Script,
}

impl TxOut {
    pub fn new(amount: u64, script_pubkey: Script) -> Self {
        TxOut {
            amount,
            script_pubkey,
        }
    }

    fn encode(&self) -> Result<Vec<u8>, TxError> {
        let mut out = Vec::with_capacity(8 + 26);
        out.extend_from_slice(&self.amount.to_le_bytes());
        out.extend_from_slice(&self.script_pubkey.encode()?);
        Ok(out)
    }
}

/// A transaction: a list of inputs consuming previous outputs and a list of
/// newly created outputs.
///
/// Lifecycle: constructed unsigned (inputs' `script_sig` empty), then each
/// input's [`Tx::sighash`] message is signed and its unlocking script
/// populated, after which the transaction serializes with
/// [`Tx::encode`] and gets its [`Tx::id`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tx {
    pub version: u32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    pub locktime: u32,
}

impl Tx {
    /// Serialize the transaction.
    ///
    /// With `sig_index` given, the result is the signing message for that
    /// input: the indexed input contributes its previous locking script,
    /// every other input an empty script, and a 4-byte little-endian
    /// [`SIGHASH_ALL`] trailer is appended. Without `sig_index`, all inputs
    /// contribute their actual unlocking scripts and there is no trailer.
    pub fn encode(&self, sig_index: Option<usize>) -> Result<Vec<u8>, TxError> {
        if let Some(index) = sig_index {
            if index >= self.inputs.len() {
                return Err(TxError::SigIndexOutOfRange {
                    index,
                    inputs: self.inputs.len(),
                });
            }
        }

        let mut out = Vec::with_capacity(256);
        out.extend_from_slice(&self.version.to_le_bytes());

        encode_varint(self.inputs.len() as u64, &mut out);
        for (i, tx_in) in self.inputs.iter().enumerate() {
            let mode = match sig_index {
                None => ScriptMode::Actual,
                Some(s) if s == i => ScriptMode::Substitute,
                Some(_) => ScriptMode::Empty,
            };
            out.extend_from_slice(&tx_in.encode(mode)?);
        }

        encode_varint(self.outputs.len() as u64, &mut out);
        for tx_out in &self.outputs {
            out.extend_from_slice(&tx_out.encode()?);
        }

        out.extend_from_slice(&self.locktime.to_le_bytes());
        if sig_index.is_some() {
            out.extend_from_slice(&SIGHASH_ALL.to_le_bytes());
        }
        Ok(out)
    }

    /// The exact byte message that must be signed to authorize spending the
    /// given input.
    pub fn sighash(&self, input_index: usize) -> Result<Vec<u8>, TxError> {
        self.encode(Some(input_index))
    }

    /// Transaction id: double-SHA256 of the fully-signed encoding, byte
    /// order reversed for display, hex-rendered. A pure function of the
    /// final bytes, not a stored field.
    pub fn id(&self) -> Result<String, TxError> {
        let mut digest = double_sha256(&self.encode(None)?);
        digest.reverse();
        Ok(hex::encode(digest))
    }
}
