// Copyright (C) 2015-2025 The CryptoNote RPC Proxy Developers.
//
// models/json_rpc.rs file belongs to the cryptonote-rpc-proxy project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC 2.0 request envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest<P> {
    /// JSON-RPC version
    #[serde(rename = "jsonrpc")]
    pub json_rpc: String,

    /// Request ID
    pub id: Value,

    /// Method name
    pub method: String,

    /// Method parameters
    pub params: P,
}

impl<P> JsonRpcRequest<P> {
    /// Creates a new request envelope
    pub fn new(method: impl Into<String>, params: P) -> Self {
        Self {
            json_rpc: "2.0".to_string(),
            id: Value::from(0),
            method: method.into(),
            params,
        }
    }
}

/// JSON-RPC error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code
    pub code: i64,

    /// Error message
    pub message: String,
}

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Request ID echoed back
    #[serde(default)]
    pub id: Value,

    /// Result payload, absent on error
    #[serde(default)]
    pub result: Option<Value>,

    /// Error object, absent on success
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Parses an envelope from a response body.
    pub fn parse(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Takes the result payload; `None` when the node reported an error.
    pub fn into_result(self) -> Option<Value> {
        match self.error {
            Some(_) => None,
            None => self.result,
        }
    }
}
