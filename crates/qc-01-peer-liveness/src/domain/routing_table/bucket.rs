//! K-Bucket implementation for Kademlia routing.

use crate::domain::{NodeId, Timestamp};

/// A single routing table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketEntry {
    /// Peer identity
    pub node_id: NodeId,
    /// Last time the peer proved it was alive
    pub last_seen: Timestamp,
}

/// A k-bucket storing up to k peers at a specific distance range
///
/// Entries are ordered least-recently-seen first. A full bucket keeps its
/// existing peers and turns new candidates away.
#[derive(Debug, Clone)]
pub struct KBucket {
    /// Peers in this bucket (max size = K, default 20)
    pub(crate) entries: Vec<BucketEntry>,
    /// Last time this bucket was updated
    pub(crate) last_updated: Timestamp,
}

impl KBucket {
    /// Create a new empty k-bucket
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            last_updated: Timestamp::new(0),
        }
    }

    /// Get the number of peers in this bucket
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the bucket is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if the bucket is full
    pub fn is_full(&self, k: usize) -> bool {
        self.entries.len() >= k
    }

    /// Get the oldest peer (least recently seen)
    pub fn oldest(&self) -> Option<&BucketEntry> {
        self.entries.first()
    }

    /// Get all entries in this bucket
    pub fn entries(&self) -> &[BucketEntry] {
        &self.entries
    }

    /// Last time this bucket changed
    pub fn last_updated(&self) -> Timestamp {
        self.last_updated
    }

    /// Check if bucket contains a peer
    pub fn contains(&self, node_id: &NodeId) -> bool {
        self.entries.iter().any(|e| &e.node_id == node_id)
    }

    /// Add a peer to the bucket (assumes not full and not present)
    ///
    /// New peers are added to the end (most recently seen position)
    pub(crate) fn push(&mut self, node_id: NodeId, now: Timestamp) {
        self.entries.push(BucketEntry {
            node_id,
            last_seen: now,
        });
        self.last_updated = now;
    }

    /// Remove a peer by NodeId.
    pub(crate) fn remove(&mut self, node_id: &NodeId) -> Option<BucketEntry> {
        self.entries
            .iter()
            .position(|e| &e.node_id == node_id)
            .map(|pos| self.entries.remove(pos))
    }

    /// Move a peer to the most-recently-seen position.
    pub(crate) fn refresh(&mut self, node_id: &NodeId, now: Timestamp) -> bool {
        let Some(pos) = self.entries.iter().position(|e| &e.node_id == node_id) else {
            return false;
        };
        let mut entry = self.entries.remove(pos);
        entry.last_seen = now;
        self.entries.push(entry);
        self.last_updated = now;
        true
    }
}

impl Default for KBucket {
    fn default() -> Self {
        Self::new()
    }
}
