//! Signed transaction structure and its binary blob codec.
//!
//! The proxy only forwards already-signed transactions, so nothing here
//! validates or constructs signatures.

use crate::error::{PrimitiveError, PrimitiveResult};
use crate::hash::{KeyImage, PublicKey};
use serde::{Deserialize, Serialize};

/// A ring signature element (`c`, `r` scalar pair).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Challenge scalar.
    pub c: [u8; 32],
    /// Response scalar.
    pub r: [u8; 32],
}

/// Transaction input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionInput {
    /// Coinbase input carrying the block height.
    Coinbase {
        /// Height of the block that mints this output.
        height: u32,
    },
    /// Ring-signed key input.
    Key {
        /// Amount being spent.
        amount: u64,
        /// Relative global output offsets of the ring members.
        key_offsets: Vec<u32>,
        /// Key image of the real input.
        key_image: KeyImage,
    },
    /// Multisignature input.
    Multisignature {
        /// Amount being spent.
        amount: u64,
        /// Number of signatures supplied.
        signatures: u32,
        /// Global index of the spent multisignature output.
        output_index: u32,
    },
}

/// Where an output's amount is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputTarget {
    /// Single one-time key.
    Key(PublicKey),
    /// M-of-N multisignature keys.
    Multisignature {
        /// Participant keys.
        keys: Vec<PublicKey>,
        /// Signatures required to spend.
        required_signatures: u32,
    },
}

/// Transaction output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    /// Output amount in atomic units.
    pub amount: u64,
    /// Output destination.
    pub target: OutputTarget,
}

/// A signed transaction as relayed to the node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Format version.
    pub version: u8,
    /// Height or timestamp before which outputs are locked.
    pub unlock_time: u64,
    /// Inputs.
    pub inputs: Vec<TransactionInput>,
    /// Outputs.
    pub outputs: Vec<TransactionOutput>,
    /// Opaque extra field (tx public key, payment id, ...).
    pub extra: Vec<u8>,
    /// One signature list per input.
    pub signatures: Vec<Vec<Signature>>,
}

impl Transaction {
    /// Encodes the transaction into its wire blob.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::Codec` if encoding fails.
    pub fn to_blob(&self) -> PrimitiveResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| PrimitiveError::codec(e.to_string()))
    }

    /// Decodes a transaction from its wire blob.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::Codec` if the blob is malformed.
    pub fn from_blob(blob: &[u8]) -> PrimitiveResult<Self> {
        bincode::deserialize(blob).map_err(|e| PrimitiveError::codec(e.to_string()))
    }

    /// Encodes the wire blob as lowercase hex.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::Codec` if encoding fails.
    pub fn to_hex_blob(&self) -> PrimitiveResult<String> {
        self.to_blob().map(hex::encode)
    }
}
