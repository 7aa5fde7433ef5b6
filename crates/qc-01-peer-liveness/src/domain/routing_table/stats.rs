//! Routing table result and statistics types.

/// Result of a successful `RoutingTable::insert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Peer was not present and now is
    Inserted,
    /// Peer was already present; moved to the most-recently-seen slot
    Refreshed,
}

/// Routing table statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingTableStats {
    /// Total peers across all buckets
    pub total_peers: usize,
    /// Number of non-empty buckets
    pub buckets_used: usize,
    /// Age of the least recently seen peer in seconds
    pub oldest_peer_age_seconds: u64,
}
