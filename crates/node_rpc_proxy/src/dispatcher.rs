// Copyright (C) 2015-2025 The CryptoNote RPC Proxy Developers.
//
// dispatcher.rs file belongs to the cryptonote-rpc-proxy project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Queued proxy operations and their execution against the node.

use crate::commands::{binary_command, json_command};
use crate::error::{ProxyError, ProxyResult};
use crate::models::{
    GetBlocksFastRequest, GetBlocksFastResponse, GetRandomOutsRequest, GetRandomOutsResponse,
    GetTxGlobalOutputsIndexesRequest, GetTxGlobalOutputsIndexesResponse, OutsForAmount,
    QueryBlocksRequest, QueryBlocksResponse, SendRawTxRequest, SendRawTxResponse,
};
use crate::transport::RpcTransport;
use cn_config::routes;
use cn_primitives::{BlockCompleteEntry, Hash, QueriedBlock, Transaction};
use tracing::{trace, warn};

/// Completion callback of a proxy operation.
pub type Callback<T> = Box<dyn FnOnce(ProxyResult<T>) + Send + 'static>;

/// Blocks returned by [`get_new_blocks`](crate::NodeRpcProxy::get_new_blocks).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBlocks {
    pub blocks: Vec<BlockCompleteEntry>,
    pub start_height: u64,
}

/// Blocks returned by [`query_blocks`](crate::NodeRpcProxy::query_blocks),
/// in the order the node sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueriedBlocks {
    pub blocks: Vec<QueriedBlock>,
    pub start_height: u64,
}

/// Outcome of a pool reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolDifference {
    pub is_blockchain_actual: bool,
    pub new_txs: Vec<Transaction>,
    pub deleted_tx_ids: Vec<Hash>,
}

/// A captured public call waiting for the worker.
pub(crate) enum PendingOperation {
    RelayTransaction {
        transaction: Transaction,
        callback: Callback<()>,
    },
    GetRandomOutputs {
        amounts: Vec<u64>,
        outs_count: u64,
        callback: Callback<Vec<OutsForAmount>>,
    },
    GetNewBlocks {
        known_block_ids: Vec<Hash>,
        callback: Callback<NewBlocks>,
    },
    GetOutputGlobalIndices {
        tx_hash: Hash,
        callback: Callback<Vec<u64>>,
    },
    QueryBlocks {
        known_block_ids: Vec<Hash>,
        timestamp: u64,
        callback: Callback<QueriedBlocks>,
    },
}

impl PendingOperation {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::RelayTransaction { .. } => "relay_transaction",
            Self::GetRandomOutputs { .. } => "get_random_outputs_by_amounts",
            Self::GetNewBlocks { .. } => "get_new_blocks",
            Self::GetOutputGlobalIndices { .. } => "get_transaction_output_global_indices",
            Self::QueryBlocks { .. } => "query_blocks",
        }
    }

    /// Runs the operation and hands the outcome to its callback.
    pub(crate) async fn execute(self, transport: &dyn RpcTransport) {
        trace!("executing {}", self.name());
        match self {
            Self::RelayTransaction {
                transaction,
                callback,
            } => callback(relay_transaction(transport, &transaction).await),
            Self::GetRandomOutputs {
                amounts,
                outs_count,
                callback,
            } => {
                let request = GetRandomOutsRequest {
                    amounts,
                    outs_count,
                };
                let result = binary_command::<_, GetRandomOutsResponse>(
                    transport,
                    routes::GET_RANDOM_OUTS,
                    &request,
                )
                .await
                .map(|response| response.outs);
                callback(result)
            }
            Self::GetNewBlocks {
                known_block_ids,
                callback,
            } => {
                let request = GetBlocksFastRequest {
                    block_ids: known_block_ids,
                };
                let result = binary_command::<_, GetBlocksFastResponse>(
                    transport,
                    routes::GET_BLOCKS,
                    &request,
                )
                .await
                .map(|response| NewBlocks {
                    blocks: response.blocks,
                    start_height: response.start_height,
                });
                callback(result)
            }
            Self::GetOutputGlobalIndices { tx_hash, callback } => {
                let request = GetTxGlobalOutputsIndexesRequest { txid: tx_hash };
                let result = binary_command::<_, GetTxGlobalOutputsIndexesResponse>(
                    transport,
                    routes::GET_OUTPUT_INDEXES,
                    &request,
                )
                .await
                .map(|response| response.o_indexes);
                callback(result)
            }
            Self::QueryBlocks {
                known_block_ids,
                timestamp,
                callback,
            } => {
                let request = QueryBlocksRequest {
                    block_ids: known_block_ids,
                    timestamp,
                };
                let result = binary_command::<_, QueryBlocksResponse>(
                    transport,
                    routes::QUERY_BLOCKS,
                    &request,
                )
                .await
                .map(into_queried_blocks);
                callback(result)
            }
        }
    }

    /// Completes the operation with [`ProxyError::Cancelled`] without running it.
    pub(crate) fn cancel(self) {
        trace!("cancelling {}", self.name());
        match self {
            Self::RelayTransaction { callback, .. } => callback(Err(ProxyError::Cancelled)),
            Self::GetRandomOutputs { callback, .. } => callback(Err(ProxyError::Cancelled)),
            Self::GetNewBlocks { callback, .. } => callback(Err(ProxyError::Cancelled)),
            Self::GetOutputGlobalIndices { callback, .. } => callback(Err(ProxyError::Cancelled)),
            Self::QueryBlocks { callback, .. } => callback(Err(ProxyError::Cancelled)),
        }
    }
}

async fn relay_transaction(
    transport: &dyn RpcTransport,
    transaction: &Transaction,
) -> ProxyResult<()> {
    let tx_as_hex = transaction.to_hex_blob().map_err(|e| {
        warn!("failed to serialize transaction for relay: {e}");
        ProxyError::NetworkError
    })?;

    json_command::<_, SendRawTxResponse>(
        transport,
        routes::SEND_RAW_TRANSACTION,
        &SendRawTxRequest { tx_as_hex },
    )
    .await
    .map(|_| ())
}

fn into_queried_blocks(response: QueryBlocksResponse) -> QueriedBlocks {
    let blocks = response
        .items
        .into_iter()
        .map(|item| QueriedBlock {
            block_hash: item.block_id,
            block: item.block,
            txs: item.txs,
        })
        .collect();

    QueriedBlocks {
        blocks,
        start_height: response.start_height,
    }
}
