// Copyright (C) 2015-2025 The CryptoNote RPC Proxy Developers.
//
// worker.rs file belongs to the cryptonote-rpc-proxy project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! The proxy's single execution context.
//!
//! A dedicated OS thread drives a current-thread tokio runtime. Every RPC
//! exchange, snapshot write, observer notification and operation callback
//! happens on this thread, serialized by one `select!` loop.

use crate::context::ProxyContext;
use crate::dispatcher::{Callback, PendingOperation};
use crate::error::ProxyError;
use crate::poller::poll_node_status;
use parking_lot::Mutex;
use std::io;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tokio::runtime::{Builder, Runtime};
use tokio::sync::{mpsc, Notify};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

const WORKER_THREAD_NAME: &str = "node-rpc-proxy";

/// Handle to a running worker thread.
pub(crate) struct WorkerHandle {
    thread: JoinHandle<()>,
    stop: Arc<Notify>,
}

impl WorkerHandle {
    /// Starts the worker. `init_callback` is handed back when the thread
    /// could not be started.
    pub(crate) fn spawn(
        ctx: Arc<ProxyContext>,
        queue: mpsc::UnboundedReceiver<PendingOperation>,
        init_callback: Callback<()>,
    ) -> Result<Self, (io::Error, Option<Callback<()>>)> {
        let runtime = match Builder::new_current_thread().enable_all().build() {
            Ok(runtime) => runtime,
            Err(err) => return Err((err, Some(init_callback))),
        };

        let stop = Arc::new(Notify::new());
        let slot = Arc::new(Mutex::new(Some(init_callback)));

        let worker_stop = stop.clone();
        let worker_slot = slot.clone();
        let spawned = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                let init_callback = worker_slot.lock().take();
                if let Some(init_callback) = init_callback {
                    run(ctx, runtime, queue, worker_stop, init_callback);
                }
            });

        match spawned {
            Ok(thread) => Ok(Self { thread, stop }),
            // The closure never ran, so the slot still holds the callback.
            Err(err) => Err((err, slot.lock().take())),
        }
    }

    /// True when called from the worker thread itself.
    pub(crate) fn is_current(&self) -> bool {
        self.thread.thread().id() == thread::current().id()
    }

    /// Wakes the event loop and asks it to exit.
    pub(crate) fn signal_stop(&self) {
        self.stop.notify_one();
    }

    /// Signals the loop and waits for the thread to finish.
    pub(crate) fn stop_and_join(self) {
        self.signal_stop();
        if self.thread.join().is_err() {
            warn!("node proxy worker panicked");
        }
    }
}

fn run(
    ctx: Arc<ProxyContext>,
    runtime: Runtime,
    mut queue: mpsc::UnboundedReceiver<PendingOperation>,
    stop: Arc<Notify>,
    init_callback: Callback<()>,
) {
    runtime.block_on(async {
        if !ctx.lifecycle.end_init() {
            debug!("node proxy shut down before the worker started");
            init_callback(Err(ProxyError::Cancelled));
        } else {
            info!("node proxy worker started");
            init_callback(Ok(()));
            event_loop(&ctx, &mut queue, &stop).await;
        }
    });

    queue.close();
    let mut cancelled = 0usize;
    while let Ok(op) = queue.try_recv() {
        op.cancel();
        cancelled += 1;
    }
    if cancelled > 0 {
        debug!("cancelled {cancelled} queued operation(s) on shutdown");
    }

    if ctx.finish_shutdown_on_exit.swap(false, Ordering::AcqRel) {
        ctx.lifecycle.end_shutdown();
    }
    info!("node proxy worker stopped");
}

async fn event_loop(
    ctx: &ProxyContext,
    queue: &mut mpsc::UnboundedReceiver<PendingOperation>,
    stop: &Notify,
) {
    let mut next_poll = Instant::now();

    // The state check covers a shutdown that began while an operation or a
    // poll was running, before the stop signal was raised.
    while ctx.lifecycle.is_initialized() {
        tokio::select! {
            biased;

            _ = stop.notified() => break,

            // A due poll goes ahead of queued operations so a steady stream
            // of submissions cannot starve it.
            _ = sleep_until(next_poll) => {
                poll_node_status(ctx).await;
                next_poll = Instant::now() + ctx.poll_interval;
            }

            op = queue.recv() => match op {
                Some(op) => op.execute(ctx.transport.as_ref()).await,
                None => break,
            },
        }
    }
}
