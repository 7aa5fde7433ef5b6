use parking_lot::RwLock;

use crate::domain::NodeId;
use crate::ports::CandidateSource;

/// Candidate source backed by a replaceable list.
///
/// Typically seeded from `ConfigProvider::bootstrap_peers`.
#[derive(Debug, Default)]
pub struct StaticCandidates {
    peers: RwLock<Vec<NodeId>>,
}

impl StaticCandidates {
    pub fn new(peers: Vec<NodeId>) -> Self {
        Self {
            peers: RwLock::new(peers),
        }
    }

    /// Replace the candidate list used by later rounds.
    pub fn replace(&self, peers: Vec<NodeId>) {
        *self.peers.write() = peers;
    }

    /// Add one candidate.
    pub fn push(&self, peer: NodeId) {
        self.peers.write().push(peer);
    }
}

impl CandidateSource for StaticCandidates {
    fn candidates(&self) -> Vec<NodeId> {
        self.peers.read().clone()
    }
}
