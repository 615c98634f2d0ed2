//! # cryptonote-rpc-proxy
//!
//! Asynchronous, observer-driven client for a remote CryptoNote node.
//!
//! The proxy turns wallet-side requests into RPC calls against the node and
//! delivers each outcome to a completion callback, while a background poller
//! keeps a cached view of the node's height, top block and peer count.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cryptonote_rpc_proxy::prelude::*;
//!
//! let proxy = NodeRpcProxy::new(&ProxyConfig::new("127.0.0.1", 8081))?;
//! proxy.init(|result| println!("proxy started: {result:?}"));
//!
//! proxy.get_new_blocks(vec![Hash::zero()], |result| match result {
//!     Ok(blocks) => println!("{} blocks from {}", blocks.blocks.len(), blocks.start_height),
//!     Err(err) => eprintln!("get_new_blocks failed: {err}"),
//! });
//!
//! proxy.shutdown();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`primitives`] - hashes, keys, transactions and block containers
//! - [`config`] - proxy configuration and TOML loading
//! - [`proxy`] - the node RPC proxy, its transport and observers

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub use cn_config as config;
pub use cn_node_rpc_proxy as proxy;
pub use cn_primitives as primitives;

use std::path::Path;

/// Common imports for proxy consumers
pub mod prelude {
    pub use crate::config::ProxyConfig;
    pub use crate::primitives::{BlockCompleteEntry, Hash, QueriedBlock, Transaction};
    pub use crate::proxy::{
        NewBlocks, NodeObserver, NodeRpcProxy, PoolDifference, ProxyError, ProxyResult,
        QueriedBlocks,
    };
}

/// Result type for facade helpers
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Builds an uninitialized proxy from a TOML configuration file.
pub fn proxy_from_config_file<P: AsRef<Path>>(path: P) -> Result<proxy::NodeRpcProxy> {
    let config = config::ProxyConfig::load_from_file(path)?;
    Ok(proxy::NodeRpcProxy::new(&config)?)
}
