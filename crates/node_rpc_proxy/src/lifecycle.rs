// Copyright (C) 2015-2025 The CryptoNote RPC Proxy Developers.
//
// lifecycle.rs file belongs to the cryptonote-rpc-proxy project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Proxy lifecycle state machine.
//!
//! ```text
//! Uninitialized ──init──► Initializing ──worker up──► Initialized
//!       ▲                      │                           │
//!       │                      └────────shutdown───────────┤
//!    (re-init)                                             ▼
//!     Stopped ◄──────────worker joined────────────── ShuttingDown
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use tracing::debug;

/// State of a proxy instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LifecycleState {
    /// Never started.
    Uninitialized = 0,
    /// `init` accepted, worker not yet running.
    Initializing = 1,
    /// Worker running; operations are accepted.
    Initialized = 2,
    /// `shutdown` accepted, worker still exiting.
    ShuttingDown = 3,
    /// Worker gone; `init` may start it again.
    Stopped = 4,
}

impl LifecycleState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Uninitialized,
            1 => Self::Initializing,
            2 => Self::Initialized,
            3 => Self::ShuttingDown,
            _ => Self::Stopped,
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Initializing => "initializing",
            Self::Initialized => "initialized",
            Self::ShuttingDown => "shutting down",
            Self::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Atomically swapped lifecycle cell; every transition is a compare-and-swap.
#[derive(Debug)]
pub(crate) struct LifecycleCell {
    state: AtomicU8,
}

impl Default for LifecycleCell {
    fn default() -> Self {
        Self {
            state: AtomicU8::new(LifecycleState::Uninitialized as u8),
        }
    }
}

impl LifecycleCell {
    pub(crate) fn get(&self) -> LifecycleState {
        LifecycleState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub(crate) fn is_initialized(&self) -> bool {
        self.get() == LifecycleState::Initialized
    }

    /// Uninitialized or Stopped -> Initializing.
    pub(crate) fn begin_init(&self) -> bool {
        self.transition(LifecycleState::Uninitialized, LifecycleState::Initializing)
            || self.transition(LifecycleState::Stopped, LifecycleState::Initializing)
    }

    /// Initializing -> Initialized. Fails when a shutdown raced in.
    pub(crate) fn end_init(&self) -> bool {
        self.transition(LifecycleState::Initializing, LifecycleState::Initialized)
    }

    /// Initialized or Initializing -> ShuttingDown.
    pub(crate) fn begin_shutdown(&self) -> bool {
        self.transition(LifecycleState::Initialized, LifecycleState::ShuttingDown)
            || self.transition(LifecycleState::Initializing, LifecycleState::ShuttingDown)
    }

    /// ShuttingDown -> Stopped.
    pub(crate) fn end_shutdown(&self) -> bool {
        self.transition(LifecycleState::ShuttingDown, LifecycleState::Stopped)
    }

    /// Initializing -> Uninitialized, used when the worker could not be started.
    pub(crate) fn abort_init(&self) -> bool {
        self.transition(LifecycleState::Initializing, LifecycleState::Uninitialized)
    }

    fn transition(&self, from: LifecycleState, to: LifecycleState) -> bool {
        let swapped = self
            .state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if swapped {
            debug!("node proxy {} -> {}", from, to);
        }
        swapped
    }
}
