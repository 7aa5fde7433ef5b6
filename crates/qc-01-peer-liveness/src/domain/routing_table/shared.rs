//! Thread-safe routing table handle.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::{LivenessError, NodeId, Timestamp};
use crate::ports::{PeerTable, TimeSource};

use super::stats::{InsertOutcome, RoutingTableStats};
use super::table::RoutingTable;

/// `RoutingTable` behind a `RwLock`, stamped by an injected `TimeSource`.
///
/// Every method takes the lock for the duration of one operation only, so
/// callers never coordinate locking themselves. Reads return owned values
/// and are unaffected by later mutation.
pub struct SharedRoutingTable {
    inner: RwLock<RoutingTable>,
    time_source: Arc<dyn TimeSource>,
}

impl SharedRoutingTable {
    /// Wrap a routing table.
    pub fn new(table: RoutingTable, time_source: Arc<dyn TimeSource>) -> Self {
        Self {
            inner: RwLock::new(table),
            time_source,
        }
    }

    /// Create an empty table for `local_node_id` with bucket size `k`.
    pub fn empty(local_node_id: NodeId, k: usize, time_source: Arc<dyn TimeSource>) -> Self {
        Self::new(RoutingTable::new(local_node_id, k), time_source)
    }

    fn now(&self) -> Timestamp {
        self.time_source.now()
    }

    /// Local node id of the wrapped table.
    pub fn local_node_id(&self) -> NodeId {
        *self.inner.read().local_node_id()
    }

    /// Closest peers to `target`.
    pub fn find_closest(&self, target: &NodeId, count: usize) -> Vec<NodeId> {
        self.inner.read().find_closest(target, count)
    }

    /// Current statistics.
    pub fn stats(&self) -> RoutingTableStats {
        let now = self.now();
        self.inner.read().stats(now)
    }
}

impl PeerTable for SharedRoutingTable {
    fn insert(&self, node_id: NodeId) -> Result<InsertOutcome, LivenessError> {
        let now = self.now();
        self.inner.write().insert(node_id, now)
    }

    fn remove(&self, node_id: &NodeId) -> Result<(), LivenessError> {
        self.inner.write().remove(node_id)
    }

    fn contains(&self, node_id: &NodeId) -> bool {
        self.inner.read().contains(node_id)
    }

    fn size(&self) -> usize {
        self.inner.read().size()
    }

    fn list_peers(&self) -> Vec<NodeId> {
        self.inner.read().list_peers()
    }
}

impl std::fmt::Debug for SharedRoutingTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedRoutingTable")
            .field("size", &self.inner.read().size())
            .finish()
    }
}
