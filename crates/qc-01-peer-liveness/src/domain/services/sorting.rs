//! Peer sorting and selection.

use super::distance::xor_bytes;
use crate::domain::NodeId;

/// Sort peer ids by full XOR distance from a target (closest first).
///
/// Unlike the bucket index, the full 256-bit XOR value orders peers that
/// share a bucket as well. Ties are impossible for distinct ids.
pub fn sort_by_distance(peers: &[NodeId], target: &NodeId) -> Vec<NodeId> {
    let mut sorted = peers.to_vec();
    sorted.sort_by_key(|id| xor_bytes(id, target));
    sorted
}

/// Find the k closest peers to a target from a list
///
/// # Returns
/// Up to k peer ids sorted by distance (closest first)
pub fn find_k_closest(peers: &[NodeId], target: &NodeId, k: usize) -> Vec<NodeId> {
    let mut sorted = sort_by_distance(peers, target);
    sorted.truncate(k);
    sorted
}
