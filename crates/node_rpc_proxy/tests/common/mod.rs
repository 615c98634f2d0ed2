//! Shared fixtures for the proxy integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use cn_config::routes;
use cn_node_rpc_proxy::{ContentKind, HttpReply, NodeObserver, RpcTransport, TransportError};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::json;
use std::collections::{HashMap, VecDeque};
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};
use tokio::sync::Notify;

pub const WAIT: Duration = Duration::from_secs(5);

/// Routes proxy logs to the test output; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// In-memory node: scripted replies per route, every request recorded.
///
/// The last scripted `Ok` reply of a route repeats; an unscripted route
/// fails like a refused connection.
#[derive(Default)]
pub struct ScriptedNode {
    replies: Mutex<HashMap<String, VecDeque<Result<HttpReply, TransportError>>>>,
    sticky: Mutex<HashMap<String, HttpReply>>,
    requests: Mutex<Vec<(String, Vec<u8>)>>,
    gate: Mutex<Option<Gate>>,
}

/// Holds requests to one route until released.
struct Gate {
    route: String,
    entered: mpsc::Sender<()>,
    release: Arc<Notify>,
}

impl ScriptedNode {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, route: &str, reply: HttpReply) {
        self.push_result(route, Ok(reply));
    }

    pub fn push_result(&self, route: &str, reply: Result<HttpReply, TransportError>) {
        self.replies
            .lock()
            .entry(route.to_string())
            .or_default()
            .push_back(reply);
    }

    /// Blocks requests to `route` until the returned notify is signalled.
    /// The receiver yields once per request that reached the gate.
    pub fn hold(&self, route: &str) -> (mpsc::Receiver<()>, Arc<Notify>) {
        let (entered, entered_rx) = mpsc::channel();
        let release = Arc::new(Notify::new());
        *self.gate.lock() = Some(Gate {
            route: route.to_string(),
            entered,
            release: release.clone(),
        });
        (entered_rx, release)
    }

    pub fn calls(&self, route: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|(r, _)| r == route)
            .count()
    }

    pub fn bodies(&self, route: &str) -> Vec<Vec<u8>> {
        self.requests
            .lock()
            .iter()
            .filter(|(r, _)| r == route)
            .map(|(_, body)| body.clone())
            .collect()
    }

    pub fn total_calls(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl RpcTransport for ScriptedNode {
    async fn post(
        &self,
        route: &str,
        _content: ContentKind,
        body: Vec<u8>,
    ) -> Result<HttpReply, TransportError> {
        self.requests.lock().push((route.to_string(), body));

        let release = {
            let gate = self.gate.lock();
            match gate.as_ref() {
                Some(gate) if gate.route == route => {
                    let _ = gate.entered.send(());
                    Some(gate.release.clone())
                }
                _ => None,
            }
        };
        if let Some(release) = release {
            release.notified().await;
        }

        let next = self
            .replies
            .lock()
            .get_mut(route)
            .and_then(VecDeque::pop_front);
        match next {
            Some(Ok(reply)) => {
                self.sticky.lock().insert(route.to_string(), reply.clone());
                Ok(reply)
            }
            Some(Err(err)) => Err(err),
            None => self
                .sticky
                .lock()
                .get(route)
                .cloned()
                .ok_or_else(|| TransportError::http("connection refused")),
        }
    }
}

pub fn json_reply(value: serde_json::Value) -> HttpReply {
    HttpReply::ok(serde_json::to_vec(&value).expect("json"))
}

pub fn binary_reply<T: Serialize>(value: &T) -> HttpReply {
    HttpReply::ok(bincode::serialize(value).expect("bincode"))
}

pub fn header_reply(hash_byte: u8, height: u64, timestamp: u64) -> HttpReply {
    json_reply(json!({
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
    }))
}

pub fn info_reply(status: &str, incoming: u64, outgoing: u64) -> HttpReply {
    json_reply(json!({
        "status": status,
        "incoming_connections_count": incoming,
        "outgoing_connections_count": outgoing
    }))
}

/// Scripts a node that is healthy but idle.
pub fn quiet_node() -> Arc<ScriptedNode> {
    let node = ScriptedNode::new();
    node.push(routes::JSON_RPC, header_reply(0x11, 1, 1));
    node.push(routes::GET_INFO, info_reply("OK", 0, 0));
    node
}

/// Channel-backed callback for collecting one or more outcomes.
pub fn outcome<T: Send + 'static>() -> (mpsc::Sender<T>, mpsc::Receiver<T>) {
    mpsc::channel()
}

/// Polls `condition` until it holds or `WAIT` elapses.
pub fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + WAIT;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    condition()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Peers(usize),
    Local(u64),
    Known(u64),
}

#[derive(Default)]
pub struct RecordingObserver {
    pub events: Mutex<Vec<Event>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }
}

impl NodeObserver for RecordingObserver {
    fn peer_count_updated(&self, count: usize) {
        self.events.lock().push(Event::Peers(count));
    }

    fn local_blockchain_updated(&self, height: u64) {
        self.events.lock().push(Event::Local(height));
    }

    fn last_known_block_height_updated(&self, height: u64) {
        self.events.lock().push(Event::Known(height));
    }
}
