//! Block and transaction blob containers returned by the node.

use crate::hash::Hash;
use serde::{Deserialize, Serialize};

/// A block blob together with the blobs of its non-coinbase transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockCompleteEntry {
    /// Serialized block.
    pub block: Vec<u8>,
    /// Serialized transactions.
    pub txs: Vec<Vec<u8>>,
}

/// A block returned by a block query, keyed by its hash.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueriedBlock {
    /// Block id.
    pub block_hash: Hash,
    /// Serialized block; empty when the node only sent the id.
    pub block: Vec<u8>,
    /// Serialized transactions.
    pub txs: Vec<Vec<u8>>,
}
