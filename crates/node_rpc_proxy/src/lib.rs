// Copyright (C) 2015-2025 The CryptoNote RPC Proxy Developers.
//
// lib.rs file belongs to the cryptonote-rpc-proxy project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Asynchronous RPC proxy to a remote CryptoNote node.
//!
//! [`NodeRpcProxy`] turns wallet-side requests (relay a transaction, fetch
//! blocks, fetch output indices) into RPC calls against the node and delivers
//! each outcome to a completion callback. A background poller keeps a cached
//! view of the node's height, top block and peer count, and reports changes to
//! registered [`NodeObserver`]s.
//!
//! ## Modules
//!
//! - `commands`: binary, JSON and JSON-RPC call shapes with status mapping
//! - `models`: request/response types of the node RPC
//! - `transport`: the [`RpcTransport`] capability and its HTTP implementation
//! - `observer`: observer trait and registry

pub mod commands;
pub mod error;
pub mod models;
pub mod observer;
pub mod transport;

mod context;
mod dispatcher;
mod lifecycle;
mod poller;
mod proxy;
mod status;
mod worker;

pub use dispatcher::{Callback, NewBlocks, PoolDifference, QueriedBlocks};
pub use error::{ProxyError, ProxyResult, TransportError};
pub use lifecycle::LifecycleState;
pub use observer::{NodeObserver, ObserverRegistry};
pub use proxy::NodeRpcProxy;
pub use status::StatusSnapshot;
pub use transport::{ContentKind, HttpReply, HttpTransport, RpcTransport};
