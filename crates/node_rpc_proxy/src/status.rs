// Copyright (C) 2015-2025 The CryptoNote RPC Proxy Developers.
//
// status.rs file belongs to the cryptonote-rpc-proxy project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use cn_primitives::Hash;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Cached view of the node's chain state.
///
/// Written only by the worker; any thread may read.
#[derive(Debug, Default)]
pub struct StatusSnapshot {
    peer_count: AtomicUsize,
    local_height: AtomicU64,
    known_height: AtomicU64,
    last_block_timestamp: AtomicU64,
    last_block_hash: Mutex<Hash>,
}

impl StatusSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to all-zero values.
    pub(crate) fn reset(&self) {
        self.peer_count.store(0, Ordering::Release);
        self.local_height.store(0, Ordering::Release);
        self.known_height.store(0, Ordering::Release);
        self.last_block_timestamp.store(0, Ordering::Release);
        *self.last_block_hash.lock() = Hash::zero();
    }

    pub fn peer_count(&self) -> usize {
        self.peer_count.load(Ordering::Acquire)
    }

    pub fn local_height(&self) -> u64 {
        self.local_height.load(Ordering::Acquire)
    }

    pub fn known_height(&self) -> u64 {
        self.known_height.load(Ordering::Acquire)
    }

    pub fn last_block_timestamp(&self) -> u64 {
        self.last_block_timestamp.load(Ordering::Acquire)
    }

    pub fn last_block_hash(&self) -> Hash {
        *self.last_block_hash.lock()
    }

    pub(crate) fn set_peer_count(&self, count: usize) {
        self.peer_count.store(count, Ordering::Release);
    }

    /// Records a new top block. Known height mirrors local height.
    ///
    /// The hash is written last: a reader that sees the new hash also sees
    /// the new heights and timestamp. Fields are not read as one unit, so a
    /// reader may still pair an old hash with new heights.
    pub(crate) fn set_top_block(&self, hash: Hash, height: u64, timestamp: u64) {
        self.last_block_timestamp.store(timestamp, Ordering::Release);
        self.local_height.store(height, Ordering::Release);
        self.known_height.store(height, Ordering::Release);
        *self.last_block_hash.lock() = hash;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn top_block_updates_both_heights() {
        let snapshot = StatusSnapshot::new();
        let hash = Hash::from_array([3u8; 32]);
        snapshot.set_top_block(hash, 120, 1_500_000_000);

        assert_eq!(snapshot.local_height(), 120);
        assert_eq!(snapshot.known_height(), 120);
        assert_eq!(snapshot.last_block_timestamp(), 1_500_000_000);
        assert_eq!(snapshot.last_block_hash(), hash);
    }

    #[test]
    fn reset_clears_everything() {
        let snapshot = StatusSnapshot::new();
        snapshot.set_top_block(Hash::from_array([1u8; 32]), 5, 6);
        snapshot.set_peer_count(8);
        snapshot.reset();

        assert_eq!(snapshot.peer_count(), 0);
        assert_eq!(snapshot.local_height(), 0);
        assert_eq!(snapshot.known_height(), 0);
        assert!(snapshot.last_block_hash().is_zero());
    }

    #[test]
    fn new_hash_is_never_seen_with_old_height() {
        let snapshot = Arc::new(StatusSnapshot::new());
        let writer = {
            let snapshot = snapshot.clone();
            std::thread::spawn(move || {
                for height in 1..=u8::MAX {
                    snapshot.set_top_block(Hash::from_array([height; 32]), height.into(), 0);
                }
            })
        };

        while !writer.is_finished() {
            let hash = snapshot.last_block_hash();
            let height = snapshot.local_height();
            assert!(height >= u64::from(hash.as_bytes()[0]));
        }
        writer.join().unwrap();
        assert_eq!(snapshot.local_height(), 255);
    }
}
