//! # Driven Ports (Outbound SPI)
//!
//! These are the interfaces this subsystem **requires** the host application to implement.

use std::net::SocketAddr;

use async_trait::async_trait;

use crate::domain::{
    AliveStatus, AliveStatusResp, InsertOutcome, LivenessConfig, LivenessError, NodeId,
    Timestamp, TransportError,
};

/// Narrow view of the networking layer used for outbound Hellos.
///
/// The service depends only on this trait, never on a concrete transport,
/// so tests and alternative transports can be substituted freely.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to support concurrent access
/// from multiple async tasks.
#[async_trait]
pub trait HelloTransport: Send + Sync {
    /// Send a Hello to `target` and wait for its acknowledgement.
    ///
    /// Implementations may block until the remote answers; the service
    /// applies its own timeout on top.
    async fn send_hello(
        &self,
        target: &NodeId,
        status: AliveStatus,
    ) -> Result<AliveStatusResp, TransportError>;

    /// Network addresses the transport currently knows for `node_id`.
    fn peer_info(&self, node_id: &NodeId) -> Vec<SocketAddr>;
}

/// Routing table contract consumed by the service.
///
/// Implementations synchronize internally; every method is callable
/// concurrently through a shared reference.
pub trait PeerTable: Send + Sync {
    /// Insert or refresh a live peer.
    fn insert(&self, node_id: NodeId) -> Result<InsertOutcome, LivenessError>;

    /// Remove a peer.
    fn remove(&self, node_id: &NodeId) -> Result<(), LivenessError>;

    /// Whether a peer is present.
    fn contains(&self, node_id: &NodeId) -> bool;

    /// Count of distinct peers.
    fn size(&self) -> usize;

    /// Owned snapshot of all peers.
    fn list_peers(&self) -> Vec<NodeId>;
}

/// Source of peers worth greeting in the next outbound round.
pub trait CandidateSource: Send + Sync {
    /// Candidate identities. Entries already known or pending are skipped
    /// by the service, so sources need not filter.
    fn candidates(&self) -> Vec<NodeId>;
}

/// External health mechanism deciding when a known peer should be dropped.
pub trait PeerHealthCheck: Send + Sync {
    /// Whether `node_id` has been unreachable long enough to remove.
    fn is_unreachable(&self, node_id: &NodeId) -> bool;
}

/// Abstract interface for time-related operations.
///
/// Enables deterministic testing by injecting controllable time sources.
pub trait TimeSource: Send + Sync {
    /// Get the current timestamp.
    fn now(&self) -> Timestamp;
}

/// Abstract interface for configuration loading.
pub trait ConfigProvider: Send + Sync {
    /// Peers to greet on startup.
    fn bootstrap_peers(&self) -> Vec<NodeId>;

    /// Liveness configuration parameters.
    fn liveness_config(&self) -> LivenessConfig;
}
