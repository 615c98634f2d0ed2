// Copyright (C) 2015-2025 The CryptoNote RPC Proxy Developers.
//
// models/commands.rs file belongs to the cryptonote-rpc-proxy project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::RpcStatus;
use cn_primitives::{BlockCompleteEntry, Hash, PublicKey};
use serde::{Deserialize, Serialize};

macro_rules! impl_rpc_status {
    ($($ty:ty),* $(,)?) => {
        $(
            impl RpcStatus for $ty {
                fn status(&self) -> &str {
                    &self.status
                }
            }
        )*
    };
}

impl_rpc_status!(
    GetLastBlockHeaderResponse,
    GetInfoResponse,
    SendRawTxResponse,
    GetRandomOutsResponse,
    GetBlocksFastResponse,
    GetTxGlobalOutputsIndexesResponse,
    QueryBlocksResponse,
);

// JSON-RPC `getlastblockheader`

/// Parameters of `getlastblockheader` (none).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetLastBlockHeaderRequest {}

/// Block header as reported over JSON-RPC.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockHeaderResponse {
    pub major_version: u8,
    pub minor_version: u8,
    pub timestamp: u64,
    pub prev_hash: String,
    pub nonce: u32,
    pub orphan_status: bool,
    pub height: u64,
    pub depth: u64,
    /// Hex block id.
    pub hash: String,
    pub difficulty: u64,
    pub reward: u64,
}

/// Result of `getlastblockheader`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetLastBlockHeaderResponse {
    pub block_header: BlockHeaderResponse,
    pub status: String,
}

// JSON `/getinfo`

/// Body of `/getinfo` (empty object).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetInfoRequest {}

/// Node status reported by `/getinfo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetInfoResponse {
    pub status: String,
    pub height: u64,
    pub difficulty: u64,
    pub tx_count: u64,
    pub tx_pool_size: u64,
    pub alt_blocks_count: u64,
    pub outgoing_connections_count: u64,
    pub incoming_connections_count: u64,
    pub white_peerlist_size: u64,
    pub grey_peerlist_size: u64,
}

impl GetInfoResponse {
    /// Incoming plus outgoing connections.
    pub fn peer_count(&self) -> usize {
        let total = self
            .incoming_connections_count
            .saturating_add(self.outgoing_connections_count);
        usize::try_from(total).unwrap_or(usize::MAX)
    }
}

// JSON `/sendrawtransaction`

/// Body of `/sendrawtransaction`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendRawTxRequest {
    /// Hex-encoded transaction blob.
    pub tx_as_hex: String,
}

/// Reply of `/sendrawtransaction`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SendRawTxResponse {
    pub status: String,
}

// Binary `/getrandom_outs.bin`

/// Body of `/getrandom_outs.bin`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetRandomOutsRequest {
    pub amounts: Vec<u64>,
    pub outs_count: u64,
}

/// One candidate output for mixing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutEntry {
    pub global_amount_index: u64,
    pub out_key: PublicKey,
}

/// Candidate outputs for one amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutsForAmount {
    pub amount: u64,
    pub outs: Vec<OutEntry>,
}

/// Reply of `/getrandom_outs.bin`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetRandomOutsResponse {
    pub outs: Vec<OutsForAmount>,
    pub status: String,
}

// Binary `/getblocks.bin`

/// Body of `/getblocks.bin`: sparse chain of known block ids, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetBlocksFastRequest {
    pub block_ids: Vec<Hash>,
}

/// Reply of `/getblocks.bin`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetBlocksFastResponse {
    pub blocks: Vec<BlockCompleteEntry>,
    pub start_height: u64,
    pub current_height: u64,
    pub status: String,
}

// Binary `/get_o_indexes.bin`

/// Body of `/get_o_indexes.bin`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTxGlobalOutputsIndexesRequest {
    pub txid: Hash,
}

/// Reply of `/get_o_indexes.bin`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTxGlobalOutputsIndexesResponse {
    pub o_indexes: Vec<u64>,
    pub status: String,
}

// Binary `/queryblocks.bin`

/// Body of `/queryblocks.bin`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryBlocksRequest {
    pub block_ids: Vec<Hash>,
    pub timestamp: u64,
}

/// One item of a block query; `block` is empty for id-only entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockFullInfo {
    pub block_id: Hash,
    pub block: Vec<u8>,
    pub txs: Vec<Vec<u8>>,
}

/// Reply of `/queryblocks.bin`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryBlocksResponse {
    pub start_height: u64,
    pub current_height: u64,
    pub full_offset: u64,
    pub items: Vec<BlockFullInfo>,
    pub status: String,
}
