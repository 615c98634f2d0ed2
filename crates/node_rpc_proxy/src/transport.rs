// Copyright (C) 2015-2025 The CryptoNote RPC Proxy Developers.
//
// transport.rs file belongs to the cryptonote-rpc-proxy project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! The RPC transport capability and its HTTP implementation.

use crate::error::TransportError;
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use cn_config::ProxyConfig;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::trace;

/// Encoding of a request/response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Binary-encoded payload (`*.bin` routes).
    Binary,
    /// JSON payload (plain JSON routes and the JSON-RPC endpoint).
    Json,
}

impl ContentKind {
    /// MIME type sent as `Content-Type`.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ContentKind::Binary => "application/octet-stream",
            ContentKind::Json => "application/json",
        }
    }
}

/// Raw HTTP reply: status code and body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Vec<u8>,
}

impl HttpReply {
    /// Creates a `200 OK` reply.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// True for `200 OK`.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Capability that performs one HTTP exchange with the node.
///
/// Implementations return faults as values; they must not panic on remote
/// misbehavior.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// POSTs `body` to `route` and returns the raw reply.
    async fn post(
        &self,
        route: &str,
        content: ContentKind,
        body: Vec<u8>,
    ) -> Result<HttpReply, TransportError>;
}

/// `reqwest`-backed transport talking to `http://host:port`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_address: Url,
    http_client: Client,
    request_timeout: Duration,
}

impl HttpTransport {
    /// Builds a transport from the proxy configuration.
    pub fn new(config: &ProxyConfig) -> Result<Self, TransportError> {
        config.validate()?;
        let base_address = config.base_url()?;
        let mut builder = Client::builder().timeout(config.rpc_timeout());

        // Add basic auth if provided
        if let (Some(user), Some(pass)) = (&config.rpc_user, &config.rpc_password) {
            let auth = format!("{user}:{pass}");
            let encoded = general_purpose::STANDARD.encode(auth.as_bytes());
            let value = format!("Basic {encoded}")
                .parse()
                .map_err(|_| TransportError::http("invalid basic auth header"))?;
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(reqwest::header::AUTHORIZATION, value);
            builder = builder.default_headers(headers);
        }

        let http_client = builder
            .build()
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(Self::with_client(
            http_client,
            base_address,
            config.rpc_timeout(),
        ))
    }

    /// Creates a transport with an existing HTTP client.
    pub fn with_client(client: Client, base_address: Url, request_timeout: Duration) -> Self {
        Self {
            base_address,
            http_client: client,
            request_timeout,
        }
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn post(
        &self,
        route: &str,
        content: ContentKind,
        body: Vec<u8>,
    ) -> Result<HttpReply, TransportError> {
        let url = self.base_address.join(route)?;
        trace!("POST {} ({} bytes)", url, body.len());

        let response = self
            .http_client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, content.mime_type())
            .body(body)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        Ok(HttpReply {
            status,
            body: body.to_vec(),
        })
    }
}

impl HttpTransport {
    fn map_reqwest_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.request_timeout)
        } else {
            TransportError::http(err.to_string())
        }
    }
}
