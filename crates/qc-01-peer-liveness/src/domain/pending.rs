//! Pending-Connection Registry
//!
//! Records peer identities with a handshake currently in flight so that no
//! two attempts to the same peer overlap.
//!
//! # Invariants
//! - An identity is present only while an attempt is outstanding.
//! - Concluded attempts are removed, never flagged.
//! - Mark and clear are atomic under one mutex; no caller sees a torn entry.
//! - The registry never holds more than `max_pending` entries.
//!
//! Marks left behind by an attempt that never concluded are reclaimed by
//! `expire_stale`. Each mark carries an attempt number so that a guard
//! belonging to an expired attempt cannot clear a newer mark for the same
//! peer.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::{NodeId, Timestamp};

/// Which side started the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionDirection {
    /// Remote peer dialed us
    Inbound,
    /// We dialed the remote peer
    Outbound,
}

/// A single in-flight handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingEntry {
    /// Who initiated
    pub direction: ConnectionDirection,
    /// When the mark was placed
    pub started_at: Timestamp,
    /// Monotonic attempt number
    pub attempt: u64,
}

/// Why a mark could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkRefused {
    /// Another attempt for this peer is in flight
    AlreadyPending,
    /// Registry is at `max_pending`
    RegistryFull,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<NodeId, PendingEntry>,
    next_attempt: u64,
}

/// Concurrent set of peers with a handshake in progress.
#[derive(Debug)]
pub struct PendingConnections {
    inner: Mutex<Inner>,
    max_pending: usize,
}

impl PendingConnections {
    /// Create an empty registry bounded at `max_pending` entries.
    pub fn new(max_pending: usize) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            max_pending,
        }
    }

    /// Atomically mark `node_id` pending if it is not already.
    ///
    /// Returns the attempt number of the new mark.
    pub fn try_mark(
        &self,
        node_id: NodeId,
        direction: ConnectionDirection,
        now: Timestamp,
    ) -> Result<u64, MarkRefused> {
        let mut inner = self.inner.lock();
        if inner.entries.contains_key(&node_id) {
            return Err(MarkRefused::AlreadyPending);
        }
        if inner.entries.len() >= self.max_pending {
            return Err(MarkRefused::RegistryFull);
        }

        let attempt = inner.next_attempt;
        inner.next_attempt += 1;
        inner.entries.insert(
            node_id,
            PendingEntry {
                direction,
                started_at: now,
                attempt,
            },
        );
        Ok(attempt)
    }

    /// Mark `node_id` pending and return a guard that clears it on drop.
    pub fn try_begin(
        self: &Arc<Self>,
        node_id: NodeId,
        direction: ConnectionDirection,
        now: Timestamp,
    ) -> Result<PendingGuard, MarkRefused> {
        let attempt = self.try_mark(node_id, direction, now)?;
        Ok(PendingGuard {
            registry: Arc::clone(self),
            node_id,
            attempt,
        })
    }

    /// Remove the mark for `node_id`, whatever attempt placed it.
    pub fn clear(&self, node_id: &NodeId) -> bool {
        self.inner.lock().entries.remove(node_id).is_some()
    }

    /// Remove the mark for `node_id` only if it belongs to `attempt`.
    pub fn clear_attempt(&self, node_id: &NodeId, attempt: u64) -> bool {
        let mut inner = self.inner.lock();
        match inner.entries.get(node_id) {
            Some(entry) if entry.attempt == attempt => {
                inner.entries.remove(node_id);
                true
            }
            _ => false,
        }
    }

    /// Remove every mark older than `max_age_secs`.
    ///
    /// Returns the identities whose marks were reclaimed.
    pub fn expire_stale(&self, now: Timestamp, max_age_secs: u64) -> Vec<NodeId> {
        let mut inner = self.inner.lock();
        let mut expired = Vec::new();
        inner.entries.retain(|id, entry| {
            let stale = now.secs_since(entry.started_at) >= max_age_secs;
            if stale {
                expired.push(*id);
            }
            !stale
        });
        expired
    }

    /// Whether an attempt for `node_id` is in flight
    pub fn contains(&self, node_id: &NodeId) -> bool {
        self.inner.lock().entries.contains_key(node_id)
    }

    /// Entry for `node_id`, if pending
    pub fn get(&self, node_id: &NodeId) -> Option<PendingEntry> {
        self.inner.lock().entries.get(node_id).copied()
    }

    /// Number of in-flight attempts
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Whether nothing is in flight
    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    /// Configured capacity
    pub fn max_pending(&self) -> usize {
        self.max_pending
    }
}

/// Holds a pending mark for the duration of one handshake attempt.
///
/// Dropping the guard clears the mark, so every exit path of an attempt
/// (success, failure, timeout, cancellation) releases the peer.
#[derive(Debug)]
pub struct PendingGuard {
    registry: Arc<PendingConnections>,
    node_id: NodeId,
    attempt: u64,
}

impl PendingGuard {
    /// Peer this guard holds
    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// Attempt number of the mark
    pub fn attempt(&self) -> u64 {
        self.attempt
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.registry.clear_attempt(&self.node_id, self.attempt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_node_id(val: u8) -> NodeId {
        let mut bytes = [0u8; 32];
        bytes[0] = val;
        NodeId::new(bytes)
    }

    #[test]
    fn test_mark_is_exclusive_per_peer() {
        let registry = PendingConnections::new(8);
        let now = Timestamp::new(100);

        assert!(registry
            .try_mark(make_node_id(1), ConnectionDirection::Outbound, now)
            .is_ok());
        assert_eq!(
            registry.try_mark(make_node_id(1), ConnectionDirection::Inbound, now),
            Err(MarkRefused::AlreadyPending)
        );
        assert!(registry
            .try_mark(make_node_id(2), ConnectionDirection::Outbound, now)
            .is_ok());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_mark_refused_when_full() {
        let registry = PendingConnections::new(1);
        let now = Timestamp::new(100);

        registry
            .try_mark(make_node_id(1), ConnectionDirection::Outbound, now)
            .unwrap();
        assert_eq!(
            registry.try_mark(make_node_id(2), ConnectionDirection::Outbound, now),
            Err(MarkRefused::RegistryFull)
        );
    }

    #[test]
    fn test_guard_clears_on_drop() {
        let registry = Arc::new(PendingConnections::new(8));
        let peer = make_node_id(3);

        {
            let guard = registry
                .try_begin(peer, ConnectionDirection::Outbound, Timestamp::new(1))
                .unwrap();
            assert_eq!(guard.node_id(), &peer);
            assert!(registry.contains(&peer));
        }

        assert!(!registry.contains(&peer));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_expire_stale_removes_old_marks_only() {
        let registry = PendingConnections::new(8);
        registry
            .try_mark(make_node_id(1), ConnectionDirection::Outbound, Timestamp::new(100))
            .unwrap();
        registry
            .try_mark(make_node_id(2), ConnectionDirection::Inbound, Timestamp::new(125))
            .unwrap();

        let expired = registry.expire_stale(Timestamp::new(130), 30);

        assert_eq!(expired, vec![make_node_id(1)]);
        assert!(!registry.contains(&make_node_id(1)));
        assert!(registry.contains(&make_node_id(2)));
    }

    #[test]
    fn test_expired_guard_does_not_clear_newer_attempt() {
        let registry = Arc::new(PendingConnections::new(8));
        let peer = make_node_id(4);

        let old_guard = registry
            .try_begin(peer, ConnectionDirection::Outbound, Timestamp::new(0))
            .unwrap();
        registry.expire_stale(Timestamp::new(60), 30);

        let new_guard = registry
            .try_begin(peer, ConnectionDirection::Outbound, Timestamp::new(60))
            .unwrap();
        assert_ne!(old_guard.attempt(), new_guard.attempt());

        drop(old_guard);
        assert!(registry.contains(&peer), "newer mark must survive");

        drop(new_guard);
        assert!(!registry.contains(&peer));
    }

    #[test]
    fn test_concurrent_marks_admit_exactly_one() {
        let registry = Arc::new(PendingConnections::new(64));
        let peer = make_node_id(9);

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    registry
                        .try_mark(peer, ConnectionDirection::Outbound, Timestamp::new(1))
                        .is_ok()
                })
            })
            .collect();

        let admitted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(admitted, 1);
        assert_eq!(registry.len(), 1);
    }
}
