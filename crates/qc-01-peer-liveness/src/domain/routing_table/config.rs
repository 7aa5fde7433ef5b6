//! Routing table constants.

/// Number of k-buckets (one per bit of NodeId)
pub const NUM_BUCKETS: usize = 256;
