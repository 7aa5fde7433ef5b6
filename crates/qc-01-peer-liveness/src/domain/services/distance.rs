//! Kademlia distance calculations.

use crate::domain::{Distance, NodeId};

/// Calculate the XOR distance between two NodeIds
///
/// # Properties
/// - Symmetric: `xor_distance(a, b) == xor_distance(b, a)`
/// - Self is max: `xor_distance(a, a)` returns bucket 255 (closest)
/// - Identifies correct bucket based on first differing bit
///
/// # Returns
/// Distance value representing the bucket index (0-255)
/// Lower values mean the nodes are "farther" in XOR space (more bits differ early)
/// Higher values mean the nodes are "closer" (more leading bits are the same)
pub fn xor_distance(a: &NodeId, b: &NodeId) -> Distance {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    for i in 0..32 {
        let xor = a_bytes[i] ^ b_bytes[i];
        if xor != 0 {
            // (byte_index * 8) + leading_zeros_in_byte
            let leading_zeros = xor.leading_zeros() as u8;
            return Distance::new((i as u8) * 8 + leading_zeros);
        }
    }

    Distance::max()
}

/// Calculate the bucket index for a remote node relative to local node.
pub fn calculate_bucket_index(local: &NodeId, remote: &NodeId) -> usize {
    xor_distance(local, remote).bucket_index() as usize
}

/// Fused version of `calculate_bucket_index` for hot paths.
#[inline]
pub fn bucket_for_peer(local: &NodeId, remote: &NodeId) -> usize {
    let local_bytes = local.as_bytes();
    let remote_bytes = remote.as_bytes();

    for i in 0..32 {
        let xor = local_bytes[i] ^ remote_bytes[i];
        if xor != 0 {
            return i * 8 + xor.leading_zeros() as usize;
        }
    }

    255
}

/// Full 256-bit XOR of two ids, big-endian.
///
/// Comparing the results lexicographically compares true XOR distance.
pub fn xor_bytes(a: &NodeId, b: &NodeId) -> [u8; 32] {
    let mut out = [0u8; 32];
    for (o, (x, y)) in out.iter_mut().zip(a.as_bytes().iter().zip(b.as_bytes())) {
        *o = x ^ y;
    }
    out
}
