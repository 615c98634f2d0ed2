// Copyright (C) 2015-2025 The CryptoNote RPC Proxy Developers.
//
// models/mod.rs file belongs to the cryptonote-rpc-proxy project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Request/response shapes of the daemon RPC commands the proxy issues.

mod commands;
mod json_rpc;

pub use commands::{
    BlockFullInfo, BlockHeaderResponse, GetBlocksFastRequest, GetBlocksFastResponse,
    GetInfoRequest, GetInfoResponse, GetLastBlockHeaderRequest, GetLastBlockHeaderResponse,
    GetRandomOutsRequest, GetRandomOutsResponse, GetTxGlobalOutputsIndexesRequest,
    GetTxGlobalOutputsIndexesResponse, OutEntry, OutsForAmount, QueryBlocksRequest,
    QueryBlocksResponse, SendRawTxRequest, SendRawTxResponse,
};
pub use json_rpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

/// Responses that embed the daemon's status string.
pub trait RpcStatus {
    /// The `status` field as sent by the node.
    fn status(&self) -> &str;
}
