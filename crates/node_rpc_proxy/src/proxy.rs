// Copyright (C) 2015-2025 The CryptoNote RPC Proxy Developers.
//
// proxy.rs file belongs to the cryptonote-rpc-proxy project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Public proxy handle.

use crate::context::ProxyContext;
use crate::dispatcher::{NewBlocks, PendingOperation, PoolDifference, QueriedBlocks};
use crate::error::{ProxyError, ProxyResult, TransportError};
use crate::lifecycle::LifecycleState;
use crate::models::OutsForAmount;
use crate::observer::NodeObserver;
use crate::transport::{HttpTransport, RpcTransport};
use crate::worker::WorkerHandle;
use cn_config::ProxyConfig;
use cn_primitives::{Hash, Transaction};
use parking_lot::Mutex;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Asynchronous, callback-based client of a remote node.
///
/// All network I/O and every callback run on one background worker started
/// by [`init`](Self::init). Calls made while the proxy is not initialized
/// complete synchronously with [`ProxyError::NotInitialized`].
///
/// # Example
///
/// ```no_run
/// use cn_config::ProxyConfig;
/// use cn_node_rpc_proxy::NodeRpcProxy;
///
/// let proxy = NodeRpcProxy::new(&ProxyConfig::new("127.0.0.1", 8081)).unwrap();
/// proxy.init(|result| println!("proxy started: {result:?}"));
/// proxy.get_transaction_output_global_indices(Default::default(), |indices| {
///     println!("indices: {indices:?}");
/// });
/// proxy.shutdown();
/// ```
pub struct NodeRpcProxy {
    context: Arc<ProxyContext>,
    queue: Mutex<Option<mpsc::UnboundedSender<PendingOperation>>>,
    worker: Mutex<Option<WorkerHandle>>,
}

impl NodeRpcProxy {
    /// Creates a proxy talking HTTP to the node named in `config`.
    pub fn new(config: &ProxyConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(
            Arc::new(transport),
            config.poll_interval(),
        ))
    }

    /// Creates a proxy over an arbitrary transport.
    pub fn with_transport(transport: Arc<dyn RpcTransport>, poll_interval: Duration) -> Self {
        Self {
            context: Arc::new(ProxyContext::new(transport, poll_interval)),
            queue: Mutex::new(None),
            worker: Mutex::new(None),
        }
    }

    /// Starts the background worker.
    ///
    /// `callback` receives `Ok(())` from the worker once it is running,
    /// [`ProxyError::AlreadyInitialized`] synchronously if the proxy is not
    /// idle, or [`ProxyError::Cancelled`] if a shutdown overtook the start.
    pub fn init(&self, callback: impl FnOnce(ProxyResult<()>) + Send + 'static) {
        // Held from the transition until the handle is stored, so a
        // concurrent shutdown always finds the worker it has to join.
        let mut worker = self.worker.lock();
        if !self.context.lifecycle.begin_init() {
            drop(worker);
            callback(Err(ProxyError::AlreadyInitialized));
            return;
        }

        self.context.snapshot.reset();
        self.context
            .finish_shutdown_on_exit
            .store(false, Ordering::Release);

        let (sender, receiver) = mpsc::unbounded_channel();
        *self.queue.lock() = Some(sender);

        match WorkerHandle::spawn(self.context.clone(), receiver, Box::new(callback)) {
            Ok(handle) => {
                *worker = Some(handle);
                debug!("node proxy worker spawned");
            }
            Err((err, callback)) => {
                warn!("failed to start node proxy worker: {err}");
                self.queue.lock().take();
                self.context.lifecycle.abort_init();
                drop(worker);
                if let Some(callback) = callback {
                    callback(Err(ProxyError::NetworkError));
                }
            }
        }
    }

    /// Stops the worker and waits for it to exit.
    ///
    /// Returns false if the proxy was not running. An operation already
    /// executing completes normally; queued operations receive
    /// [`ProxyError::Cancelled`]. Called from inside a callback, the worker
    /// is signalled but not joined and stops once the callback returns.
    pub fn shutdown(&self) -> bool {
        if !self.context.lifecycle.begin_shutdown() {
            return false;
        }

        let handle = {
            let mut worker = self.worker.lock();
            self.queue.lock().take();
            worker.take()
        };

        match handle {
            Some(handle) if handle.is_current() => {
                self.context
                    .finish_shutdown_on_exit
                    .store(true, Ordering::Release);
                handle.signal_stop();
                debug!("node proxy shutdown requested from its worker");
            }
            Some(handle) => {
                handle.stop_and_join();
                self.context.lifecycle.end_shutdown();
            }
            None => {
                self.context.lifecycle.end_shutdown();
            }
        }

        info!("node proxy shut down");
        true
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.context.lifecycle.get()
    }

    /// Registers an observer; false if it was already registered.
    pub fn add_observer<O: NodeObserver + 'static>(&self, observer: &Arc<O>) -> bool {
        self.context.observers.add(observer)
    }

    /// Unregisters an observer; false if it was not registered.
    pub fn remove_observer<O: NodeObserver + 'static>(&self, observer: &Arc<O>) -> bool {
        self.context.observers.remove(observer)
    }

    /// Peers connected to the node, incoming plus outgoing.
    pub fn peer_count(&self) -> usize {
        self.context.snapshot.peer_count()
    }

    /// Height of the node's top block.
    pub fn last_local_block_height(&self) -> u64 {
        self.context.snapshot.local_height()
    }

    /// Highest block height the node knows of.
    pub fn last_known_block_height(&self) -> u64 {
        self.context.snapshot.known_height()
    }

    /// Local block count as reported by the top block header.
    pub fn local_block_count(&self) -> u64 {
        self.context.snapshot.local_height()
    }

    /// Known block count as reported by the top block header.
    pub fn known_block_count(&self) -> u64 {
        self.context.snapshot.known_height()
    }

    /// Timestamp of the node's top block.
    pub fn last_local_block_timestamp(&self) -> u64 {
        self.context.snapshot.last_block_timestamp()
    }

    /// Hash of the node's top block; zero until the first poll.
    pub fn last_known_block_hash(&self) -> Hash {
        self.context.snapshot.last_block_hash()
    }

    /// Submits a signed transaction to the node.
    pub fn relay_transaction(
        &self,
        transaction: &Transaction,
        callback: impl FnOnce(ProxyResult<()>) + Send + 'static,
    ) {
        if !self.context.lifecycle.is_initialized() {
            callback(Err(ProxyError::NotInitialized));
            return;
        }
        self.submit(PendingOperation::RelayTransaction {
            transaction: transaction.clone(),
            callback: Box::new(callback),
        });
    }

    /// Fetches `outs_count` random outputs for each of `amounts`.
    pub fn get_random_outputs_by_amounts(
        &self,
        amounts: Vec<u64>,
        outs_count: u64,
        callback: impl FnOnce(ProxyResult<Vec<OutsForAmount>>) + Send + 'static,
    ) {
        if !self.context.lifecycle.is_initialized() {
            callback(Err(ProxyError::NotInitialized));
            return;
        }
        self.submit(PendingOperation::GetRandomOutputs {
            amounts,
            outs_count,
            callback: Box::new(callback),
        });
    }

    /// Fetches blocks following the newest of `known_block_ids`.
    pub fn get_new_blocks(
        &self,
        known_block_ids: Vec<Hash>,
        callback: impl FnOnce(ProxyResult<NewBlocks>) + Send + 'static,
    ) {
        if !self.context.lifecycle.is_initialized() {
            callback(Err(ProxyError::NotInitialized));
            return;
        }
        self.submit(PendingOperation::GetNewBlocks {
            known_block_ids,
            callback: Box::new(callback),
        });
    }

    /// Fetches the global output indices of a transaction.
    pub fn get_transaction_output_global_indices(
        &self,
        tx_hash: Hash,
        callback: impl FnOnce(ProxyResult<Vec<u64>>) + Send + 'static,
    ) {
        if !self.context.lifecycle.is_initialized() {
            callback(Err(ProxyError::NotInitialized));
            return;
        }
        self.submit(PendingOperation::GetOutputGlobalIndices {
            tx_hash,
            callback: Box::new(callback),
        });
    }

    /// Queries blocks after `known_block_ids`, full bodies from `timestamp` on.
    pub fn query_blocks(
        &self,
        known_block_ids: Vec<Hash>,
        timestamp: u64,
        callback: impl FnOnce(ProxyResult<QueriedBlocks>) + Send + 'static,
    ) {
        if !self.context.lifecycle.is_initialized() {
            callback(Err(ProxyError::NotInitialized));
            return;
        }
        self.submit(PendingOperation::QueryBlocks {
            known_block_ids,
            timestamp,
            callback: Box::new(callback),
        });
    }

    /// Pool reconciliation is not performed; the chain is always reported as
    /// current with an empty difference.
    pub fn get_pool_symmetric_difference(
        &self,
        _known_pool_tx_ids: Vec<Hash>,
        _known_block_id: Hash,
        callback: impl FnOnce(ProxyResult<PoolDifference>) + Send + 'static,
    ) {
        if !self.context.lifecycle.is_initialized() {
            callback(Err(ProxyError::NotInitialized));
            return;
        }
        callback(Ok(PoolDifference {
            is_blockchain_actual: true,
            new_txs: Vec::new(),
            deleted_tx_ids: Vec::new(),
        }));
    }

    fn submit(&self, op: PendingOperation) {
        let rejected = match self.queue.lock().as_ref() {
            Some(queue) => queue.send(op).err().map(|e| e.0),
            None => Some(op),
        };
        if let Some(op) = rejected {
            debug!("{} submitted during shutdown", op.name());
            op.cancel();
        }
    }
}

impl Drop for NodeRpcProxy {
    fn drop(&mut self) {
        self.shutdown();
    }
}
