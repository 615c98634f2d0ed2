// Copyright (C) 2015-2025 The CryptoNote RPC Proxy Developers.
//
// context.rs file belongs to the cryptonote-rpc-proxy project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::lifecycle::LifecycleCell;
use crate::observer::ObserverRegistry;
use crate::status::StatusSnapshot;
use crate::transport::RpcTransport;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

/// State shared between the proxy handle and its worker.
pub(crate) struct ProxyContext {
    pub(crate) transport: Arc<dyn RpcTransport>,
    pub(crate) snapshot: StatusSnapshot,
    pub(crate) observers: ObserverRegistry,
    pub(crate) lifecycle: LifecycleCell,
    pub(crate) poll_interval: Duration,
    /// Set when shutdown was requested from the worker itself; the worker
    /// then completes the transition to `Stopped` on exit.
    pub(crate) finish_shutdown_on_exit: AtomicBool,
}

impl ProxyContext {
    pub(crate) fn new(transport: Arc<dyn RpcTransport>, poll_interval: Duration) -> Self {
        Self {
            transport,
            snapshot: StatusSnapshot::new(),
            observers: ObserverRegistry::new(),
            lifecycle: LifecycleCell::default(),
            poll_interval,
            finish_shutdown_on_exit: AtomicBool::new(false),
        }
    }
}
