// Copyright (C) 2015-2025 The CryptoNote RPC Proxy Developers.
//
// observer.rs file belongs to the cryptonote-rpc-proxy project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Observer registry for node status changes.

use parking_lot::RwLock;
use std::sync::{Arc, Weak};

/// Listener for changes of the cached node status.
///
/// Notifications are delivered from the proxy worker thread, never
/// concurrently with each other.
pub trait NodeObserver: Send + Sync {
    /// Sum of incoming and outgoing node connections changed.
    fn peer_count_updated(&self, _count: usize) {}

    /// A new top block was observed on the node.
    fn local_blockchain_updated(&self, _height: u64) {}

    /// The last known network height changed.
    fn last_known_block_height_updated(&self, _height: u64) {}
}

/// Set of observers held without ownership.
///
/// Dropped observers are pruned lazily on the next notification.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: RwLock<Vec<Weak<dyn NodeObserver>>>,
}

impl ObserverRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `observer`; returns false if it is already registered.
    pub fn add<O: NodeObserver + 'static>(&self, observer: &Arc<O>) -> bool {
        let observer: Arc<dyn NodeObserver> = observer.clone();
        let handle = Arc::downgrade(&observer);
        let mut observers = self.observers.write();
        if observers.iter().any(|existing| same_observer(existing, &handle)) {
            return false;
        }
        observers.push(handle);
        true
    }

    /// Unregisters `observer`; returns false if it was not registered.
    pub fn remove<O: NodeObserver + 'static>(&self, observer: &Arc<O>) -> bool {
        let observer: Arc<dyn NodeObserver> = observer.clone();
        let handle = Arc::downgrade(&observer);
        let mut observers = self.observers.write();
        let before = observers.len();
        observers.retain(|existing| !same_observer(existing, &handle));
        observers.len() != before
    }

    /// Number of live registered observers.
    pub fn len(&self) -> usize {
        self.observers
            .read()
            .iter()
            .filter(|o| o.strong_count() > 0)
            .count()
    }

    /// True when no live observer is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invokes `event` on every live observer.
    ///
    /// Iterates over a snapshot so observers may add or remove themselves
    /// from inside a notification.
    pub fn notify<F>(&self, event: F)
    where
        F: Fn(&dyn NodeObserver),
    {
        let snapshot: Vec<Arc<dyn NodeObserver>> = {
            let mut observers = self.observers.write();
            observers.retain(|o| o.strong_count() > 0);
            observers.iter().filter_map(Weak::upgrade).collect()
        };

        for observer in snapshot {
            event(observer.as_ref());
        }
    }
}

// Compares the data pointers only; vtable pointers of the same type may differ
// across codegen units.
fn same_observer(a: &Weak<dyn NodeObserver>, b: &Weak<dyn NodeObserver>) -> bool {
    std::ptr::eq(a.as_ptr() as *const u8, b.as_ptr() as *const u8)
}
