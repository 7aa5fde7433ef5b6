//! Main RoutingTable implementation.

use crate::domain::{bucket_for_peer, find_k_closest, LivenessError, NodeId, Timestamp};

use super::bucket::KBucket;
use super::config::NUM_BUCKETS;
use super::stats::{InsertOutcome, RoutingTableStats};

/// The routing table of live peers.
///
/// # Invariants
/// - An identity is stored in exactly one bucket, at most once.
/// - No bucket holds more than `k` entries.
/// - The local node id is never stored.
#[derive(Debug)]
pub struct RoutingTable {
    /// Our own node ID (immutable after creation)
    local_node_id: NodeId,
    /// 256 k-buckets, one for each possible XOR distance
    buckets: Vec<KBucket>,
    /// Bucket capacity
    k: usize,
}

impl RoutingTable {
    /// Create a new routing table
    pub fn new(local_node_id: NodeId, k: usize) -> Self {
        let buckets = (0..NUM_BUCKETS).map(|_| KBucket::new()).collect();

        Self {
            local_node_id,
            buckets,
            k,
        }
    }

    /// Get our local node ID
    pub fn local_node_id(&self) -> &NodeId {
        &self.local_node_id
    }

    /// Bucket capacity
    pub fn k(&self) -> usize {
        self.k
    }

    fn bucket_index(&self, node_id: &NodeId) -> usize {
        bucket_for_peer(&self.local_node_id, node_id)
    }

    /// Insert a live peer.
    ///
    /// A peer already present is refreshed. A full bucket rejects the new
    /// peer with `BucketFull`.
    pub fn insert(
        &mut self,
        node_id: NodeId,
        now: Timestamp,
    ) -> Result<InsertOutcome, LivenessError> {
        if node_id == self.local_node_id {
            return Err(LivenessError::SelfConnection);
        }

        let k = self.k;
        let idx = self.bucket_index(&node_id);
        let bucket = self
            .buckets
            .get_mut(idx)
            .ok_or(LivenessError::PeerNotFound)?;

        if bucket.refresh(&node_id, now) {
            return Ok(InsertOutcome::Refreshed);
        }
        if bucket.is_full(k) {
            return Err(LivenessError::BucketFull);
        }

        bucket.push(node_id, now);
        Ok(InsertOutcome::Inserted)
    }

    /// Remove a peer from the routing table
    pub fn remove(&mut self, node_id: &NodeId) -> Result<(), LivenessError> {
        let idx = self.bucket_index(node_id);
        self.buckets
            .get_mut(idx)
            .and_then(|b| b.remove(node_id))
            .map(|_| ())
            .ok_or(LivenessError::PeerNotFound)
    }

    /// Check whether a peer is present
    pub fn contains(&self, node_id: &NodeId) -> bool {
        self.buckets
            .get(self.bucket_index(node_id))
            .is_some_and(|b| b.contains(node_id))
    }

    /// Get total peer count across all buckets
    pub fn size(&self) -> usize {
        self.buckets.iter().map(|b| b.len()).sum()
    }

    /// All peers, ordered by bucket index then least-recently-seen first.
    pub fn list_peers(&self) -> Vec<NodeId> {
        self.buckets
            .iter()
            .flat_map(|b| b.entries().iter().map(|e| e.node_id))
            .collect()
    }

    /// Find the `count` peers closest to `target` by XOR distance
    pub fn find_closest(&self, target: &NodeId, count: usize) -> Vec<NodeId> {
        find_k_closest(&self.list_peers(), target, count)
    }

    /// Get a reference to a bucket by index
    pub fn bucket(&self, index: usize) -> Option<&KBucket> {
        self.buckets.get(index)
    }

    /// Get routing table statistics
    pub fn stats(&self, now: Timestamp) -> RoutingTableStats {
        let oldest_peer_age_seconds = self
            .buckets
            .iter()
            .flat_map(|b| b.entries().iter())
            .map(|e| now.secs_since(e.last_seen))
            .max()
            .unwrap_or(0);

        RoutingTableStats {
            total_peers: self.size(),
            buckets_used: self.buckets.iter().filter(|b| !b.is_empty()).count(),
            oldest_peer_age_seconds,
        }
    }
}
