// Copyright (C) 2015-2025 The CryptoNote RPC Proxy Developers.
//
// commands.rs file belongs to the cryptonote-rpc-proxy project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! The three RPC call shapes (binary, JSON, JSON-RPC) over one transport.
//!
//! Every call yields exactly one outcome: the decoded response when the node
//! reported `OK`, otherwise a [`ProxyError`]. Transport faults and malformed
//! payloads never escape this module as anything but `NetworkError`. No call
//! is retried here.

use crate::error::{ProxyError, ProxyResult};
use crate::models::{JsonRpcRequest, JsonRpcResponse, RpcStatus};
use crate::transport::{ContentKind, HttpReply, RpcTransport};
use cn_config::{routes, CORE_RPC_STATUS_BUSY, CORE_RPC_STATUS_OK};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// Maps the node's embedded status string to an outcome.
pub fn interpret_response_status(status: &str) -> ProxyResult<()> {
    if status == CORE_RPC_STATUS_BUSY {
        Err(ProxyError::NodeBusy)
    } else if status != CORE_RPC_STATUS_OK {
        Err(ProxyError::InternalNodeError)
    } else {
        Ok(())
    }
}

/// Sends a binary-encoded request to a `*.bin` route.
pub async fn binary_command<Req, Res>(
    transport: &dyn RpcTransport,
    route: &str,
    request: &Req,
) -> ProxyResult<Res>
where
    Req: Serialize + ?Sized,
    Res: DeserializeOwned + RpcStatus,
{
    let body = bincode::serialize(request).map_err(|e| {
        warn!("{route}: failed to encode request: {e}");
        ProxyError::NetworkError
    })?;

    let reply = exchange(transport, route, ContentKind::Binary, body).await?;
    let response: Res = bincode::deserialize(&reply.body).map_err(|e| {
        debug!("{route}: malformed binary response: {e}");
        ProxyError::NetworkError
    })?;

    checked(route, response)
}

/// Sends a JSON request to a plain JSON route.
pub async fn json_command<Req, Res>(
    transport: &dyn RpcTransport,
    route: &str,
    request: &Req,
) -> ProxyResult<Res>
where
    Req: Serialize + ?Sized,
    Res: DeserializeOwned + RpcStatus,
{
    let body = serde_json::to_vec(request).map_err(|e| {
        warn!("{route}: failed to encode request: {e}");
        ProxyError::NetworkError
    })?;

    let reply = exchange(transport, route, ContentKind::Json, body).await?;
    let response: Res = serde_json::from_slice(&reply.body).map_err(|e| {
        debug!("{route}: malformed JSON response: {e}");
        ProxyError::NetworkError
    })?;

    checked(route, response)
}

/// Wraps `params` in a JSON-RPC envelope and sends it to `/json_rpc`.
///
/// A non-200 reply, an undecodable envelope, an error envelope or a result
/// of the wrong shape all report `InternalNodeError`.
pub async fn json_rpc_command<Req, Res>(
    transport: &dyn RpcTransport,
    method: &str,
    params: &Req,
) -> ProxyResult<Res>
where
    Req: Serialize,
    Res: DeserializeOwned + RpcStatus,
{
    let envelope = JsonRpcRequest::new(method, params);
    let body = serde_json::to_vec(&envelope).map_err(|e| {
        warn!("{method}: failed to encode request: {e}");
        ProxyError::NetworkError
    })?;

    let reply = transport
        .post(routes::JSON_RPC, ContentKind::Json, body)
        .await
        .map_err(|e| {
            debug!("{method}: transport fault: {e}");
            ProxyError::NetworkError
        })?;

    if !reply.is_success() {
        debug!("{method}: HTTP status {}", reply.status);
        return Err(ProxyError::InternalNodeError);
    }

    let result = JsonRpcResponse::parse(&reply.body)
        .ok()
        .and_then(JsonRpcResponse::into_result)
        .ok_or_else(|| {
            debug!("{method}: unusable JSON-RPC envelope");
            ProxyError::InternalNodeError
        })?;

    let response: Res = serde_json::from_value(result).map_err(|e| {
        debug!("{method}: unexpected result shape: {e}");
        ProxyError::InternalNodeError
    })?;

    checked(method, response)
}

async fn exchange(
    transport: &dyn RpcTransport,
    route: &str,
    content: ContentKind,
    body: Vec<u8>,
) -> ProxyResult<HttpReply> {
    let reply = transport.post(route, content, body).await.map_err(|e| {
        debug!("{route}: transport fault: {e}");
        ProxyError::NetworkError
    })?;

    if reply.is_success() {
        Ok(reply)
    } else {
        debug!("{route}: HTTP status {}", reply.status);
        Err(ProxyError::NetworkError)
    }
}

fn checked<Res: RpcStatus>(context: &str, response: Res) -> ProxyResult<Res> {
    interpret_response_status(response.status()).map_err(|err| {
        debug!("{context}: node status {:?} -> {err}", response.status());
        err
    })?;
    Ok(response)
}
