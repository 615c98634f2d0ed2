// Copyright (C) 2015-2025 The CryptoNote RPC Proxy Developers.
//
// error.rs file belongs to the cryptonote-rpc-proxy project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Error types for proxy operations and the transport capability.

use std::time::Duration;
use thiserror::Error;

/// Outcome kinds delivered to operation callbacks.
///
/// Guard failures (`NotInitialized`, `AlreadyInitialized`) are reported
/// synchronously; every other kind arrives through the callback from the
/// worker.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyError {
    /// The proxy is not in the initialized state.
    #[error("Node proxy is not initialized")]
    NotInitialized,

    /// `init` was called while the proxy was already running.
    #[error("Node proxy is already initialized")]
    AlreadyInitialized,

    /// The node answered with status `BUSY`.
    #[error("Node is busy")]
    NodeBusy,

    /// The exchange with the node failed (connection, timeout, malformed payload).
    #[error("Network error")]
    NetworkError,

    /// The node answered with an unexpected status or an unusable JSON-RPC envelope.
    #[error("Internal node error")]
    InternalNodeError,

    /// The operation was still queued when the proxy shut down.
    #[error("Operation cancelled by shutdown")]
    Cancelled,
}

/// Result type delivered to proxy callbacks.
pub type ProxyResult<T> = std::result::Result<T, ProxyError>;

/// Faults raised by an [`RpcTransport`](crate::RpcTransport) implementation.
#[derive(Error, Debug)]
pub enum TransportError {
    /// HTTP-level failure (connection refused, reset, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The exchange did not complete in time.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// A payload could not be encoded or decoded.
    #[error("Codec error: {0}")]
    Codec(String),

    /// The request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The proxy configuration was rejected.
    #[error("Configuration error: {0}")]
    Config(#[from] cn_config::ConfigError),
}

impl TransportError {
    /// Create an HTTP error.
    pub fn http<S: Into<String>>(message: S) -> Self {
        Self::Http(message.into())
    }

    /// Create a codec error.
    pub fn codec<S: Into<String>>(message: S) -> Self {
        Self::Codec(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_stable() {
        assert_eq!(ProxyError::NodeBusy.to_string(), "Node is busy");
        assert_eq!(
            TransportError::Timeout(Duration::from_millis(5)).to_string(),
            "Request timed out after 5ms"
        );
        assert_eq!(
            TransportError::http("refused").to_string(),
            "HTTP error: refused"
        );
    }
}
