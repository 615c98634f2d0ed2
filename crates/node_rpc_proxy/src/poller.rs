// Copyright (C) 2015-2025 The CryptoNote RPC Proxy Developers.
//
// poller.rs file belongs to the cryptonote-rpc-proxy project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Periodic node status refresh.
//!
//! One run issues `getlastblockheader` and `/getinfo`, updates the snapshot
//! and notifies observers only for values that actually changed. Failures are
//! logged and left for the next run.

use crate::commands::{json_command, json_rpc_command};
use crate::context::ProxyContext;
use crate::models::{
    GetInfoRequest, GetInfoResponse, GetLastBlockHeaderRequest, GetLastBlockHeaderResponse,
};
use cn_config::{methods, routes};
use cn_primitives::Hash;
use tracing::{debug, info};

/// Runs one status refresh; both steps always execute.
pub(crate) async fn poll_node_status(ctx: &ProxyContext) {
    update_node_status(ctx).await;
    update_peer_count(ctx).await;
}

async fn update_node_status(ctx: &ProxyContext) {
    let response: GetLastBlockHeaderResponse = match json_rpc_command(
        ctx.transport.as_ref(),
        methods::GET_LAST_BLOCK_HEADER,
        &GetLastBlockHeaderRequest {},
    )
    .await
    {
        Ok(response) => response,
        Err(err) => {
            debug!("last block header unavailable: {err}");
            return;
        }
    };

    let header = response.block_header;
    let hash = match Hash::parse(&header.hash) {
        Ok(hash) => hash,
        Err(err) => {
            debug!("node reported malformed block hash {:?}: {err}", header.hash);
            return;
        }
    };

    if hash == ctx.snapshot.last_block_hash() {
        return;
    }

    ctx.snapshot.set_top_block(hash, header.height, header.timestamp);
    let local = ctx.snapshot.local_height();
    let known = ctx.snapshot.known_height();
    info!("new top block {hash} at height {local}");

    ctx.observers
        .notify(|o| o.last_known_block_height_updated(known));
    ctx.observers.notify(|o| o.local_blockchain_updated(local));
}

async fn update_peer_count(ctx: &ProxyContext) {
    let info: GetInfoResponse =
        match json_command(ctx.transport.as_ref(), routes::GET_INFO, &GetInfoRequest {}).await {
            Ok(info) => info,
            Err(err) => {
                debug!("node info unavailable: {err}");
                return;
            }
        };

    let peers = info.peer_count();
    if peers == ctx.snapshot.peer_count() {
        return;
    }

    ctx.snapshot.set_peer_count(peers);
    debug!("peer count changed to {peers}");
    ctx.observers.notify(|o| o.peer_count_updated(peers));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::observer::NodeObserver;
    use crate::transport::mock::ScriptedTransport;
    use crate::transport::HttpReply;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<(&'static str, u64)>>,
    }

    impl NodeObserver for Recorder {
        fn peer_count_updated(&self, count: usize) {
            self.events.lock().push(("peers", count as u64));
        }

        fn local_blockchain_updated(&self, height: u64) {
            self.events.lock().push(("local", height));
        }

        fn last_known_block_height_updated(&self, height: u64) {
            self.events.lock().push(("known", height));
        }
    }

    fn header_reply(hash_byte: u8, height: u64, timestamp: u64) -> HttpReply {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 0,
            "result": {
                "status": "OK",
                "block_header": {
                    "hash": hex::encode([hash_byte; 32]),
                    "height": height,
                    "timestamp": timestamp
                }
            }
        });
        HttpReply::ok(serde_json::to_vec(&body).unwrap())
    }

    fn info_reply(status: &str, incoming: u64, outgoing: u64) -> HttpReply {
        let body = json!({
            "status": status,
            "incoming_connections_count": incoming,
            "outgoing_connections_count": outgoing
        });
        HttpReply::ok(serde_json::to_vec(&body).unwrap())
    }

    fn setup() -> (Arc<ScriptedTransport>, ProxyContext, Arc<Recorder>) {
        let transport = Arc::new(ScriptedTransport::default());
        let ctx = ProxyContext::new(transport.clone(), Duration::from_secs(10));
        let recorder = Arc::new(Recorder::default());
        ctx.observers.add(&recorder);
        (transport, ctx, recorder)
    }

    #[tokio::test]
    async fn identical_headers_notify_once() {
        let (transport, ctx, recorder) = setup();
        transport.push(routes::JSON_RPC, Ok(header_reply(0xaa, 100, 1_600_000_000)));
        transport.push(routes::GET_INFO, Ok(info_reply("OK", 0, 0)));

        for _ in 0..5 {
            poll_node_status(&ctx).await;
        }

        assert_eq!(
            *recorder.events.lock(),
            vec![("known", 100), ("local", 100)]
        );
        assert_eq!(transport.calls(routes::JSON_RPC), 5);
        assert_eq!(ctx.snapshot.local_height(), 100);
        assert_eq!(ctx.snapshot.known_height(), 100);
        assert_eq!(ctx.snapshot.last_block_timestamp(), 1_600_000_000);
        assert_eq!(ctx.snapshot.last_block_hash(), Hash::from_array([0xaa; 32]));
    }

    #[tokio::test]
    async fn changed_hash_notifies_again() {
        let (transport, ctx, recorder) = setup();
        transport.push(routes::JSON_RPC, Ok(header_reply(1, 10, 1)));
        transport.push(routes::JSON_RPC, Ok(header_reply(2, 11, 2)));
        transport.push(routes::GET_INFO, Ok(info_reply("OK", 0, 0)));

        poll_node_status(&ctx).await;
        poll_node_status(&ctx).await;

        assert_eq!(
            *recorder.events.lock(),
            vec![("known", 10), ("local", 10), ("known", 11), ("local", 11)]
        );
    }

    #[tokio::test]
    async fn busy_info_keeps_peer_count_until_next_ok() {
        let (transport, ctx, recorder) = setup();
        transport.push(routes::JSON_RPC, Err(TransportError::http("down")));
        transport.push(routes::GET_INFO, Ok(info_reply("OK", 1, 3)));
        transport.push(routes::GET_INFO, Ok(info_reply("BUSY", 5, 5)));
        transport.push(routes::GET_INFO, Ok(info_reply("OK", 3, 4)));

        poll_node_status(&ctx).await;
        assert_eq!(ctx.snapshot.peer_count(), 4);
        recorder.events.lock().clear();

        poll_node_status(&ctx).await;
        assert_eq!(ctx.snapshot.peer_count(), 4);
        assert!(recorder.events.lock().is_empty());

        poll_node_status(&ctx).await;
        assert_eq!(ctx.snapshot.peer_count(), 7);
        assert_eq!(*recorder.events.lock(), vec![("peers", 7)]);
    }

    #[tokio::test]
    async fn header_failure_still_refreshes_peers() {
        let (transport, ctx, recorder) = setup();
        let garbage = json!({
            "jsonrpc": "2.0",
            "id": 0,
            "result": {"status": "OK", "block_header": {"hash": "xyz", "height": 9}}
        });
        transport.push(
            routes::JSON_RPC,
            Ok(HttpReply::ok(serde_json::to_vec(&garbage).unwrap())),
        );
        transport.push(routes::GET_INFO, Ok(info_reply("OK", 2, 0)));

        poll_node_status(&ctx).await;

        assert_eq!(ctx.snapshot.local_height(), 0);
        assert!(ctx.snapshot.last_block_hash().is_zero());
        assert_eq!(*recorder.events.lock(), vec![("peers", 2)]);
    }
}
