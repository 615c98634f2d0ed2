//! # CryptoNote Primitives
//!
//! Value types exchanged between the node RPC proxy and a remote node.
//!
//! The proxy never interprets these beyond hashes, heights and timestamps:
//! - `Hash`: 256-bit identifier (block ids, transaction ids)
//! - `PublicKey`, `KeyImage`, `Signature`: fixed-size key material
//! - `Transaction`: signed transaction with a binary blob codec
//! - `BlockCompleteEntry` / `QueriedBlock`: block and transaction blobs
//!
//! ## Example
//!
//! ```rust
//! use cn_primitives::Hash;
//!
//! let hash = Hash::zero();
//! assert!(hash.is_zero());
//!
//! let parsed = Hash::parse(&"ab".repeat(32)).unwrap();
//! assert_eq!(parsed.as_bytes()[0], 0xab);
//! ```

pub mod block;
pub mod error;
pub mod hash;
pub mod transaction;

pub use block::{BlockCompleteEntry, QueriedBlock};
pub use error::{PrimitiveError, PrimitiveResult};
pub use hash::{Hash, KeyImage, PublicKey, HASH_SIZE};
pub use transaction::{
    OutputTarget, Signature, Transaction, TransactionInput, TransactionOutput,
};
