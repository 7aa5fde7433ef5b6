//! # Peer Liveness Subsystem
//!
//! Tracks which remote peers of a P2P overlay node are alive.
//!
//! Peers prove liveness by exchanging a Hello (`/alive/0.2`): the caller
//! sends its `AliveStatus`, the callee records the caller in its routing
//! table and acknowledges. Outbound Hellos run in periodic rounds against
//! a candidate source, with at most one attempt per peer in flight.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture with:
//! - **Domain Layer:** Node identity, k-bucket routing table, pending
//!   registry, Hello messages
//! - **Ports Layer:** `LivenessApi` (driving) and the transport, table,
//!   candidate, health-check, time and config traits (driven)
//! - **Service Layer:** `LivenessService`, wiring domain to ports
//! - **Adapters Layer:** System clock, config providers, in-memory network
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use qc_01_peer_liveness::{
//!     InMemoryNetwork, LivenessApi, LivenessConfig, LivenessService, NodeId, SystemTimeSource,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), qc_01_peer_liveness::LivenessError> {
//! let network = InMemoryNetwork::new();
//! let mut nodes = Vec::new();
//! for byte in [1u8, 2] {
//!     let id = NodeId::new([byte; 32]);
//!     let service = Arc::new(LivenessService::with_shared_table(
//!         id,
//!         LivenessConfig::default(),
//!         Arc::new(network.transport_for(id)),
//!         Arc::new(SystemTimeSource::new()),
//!     )?);
//!     network.register(&service);
//!     nodes.push(service);
//! }
//!
//! assert!(nodes[0].connect(NodeId::new([2u8; 32])).await.is_committed());
//! assert_eq!(nodes[1].routing_table_peers(), vec![NodeId::new([1u8; 32])]);
//! # Ok(())
//! # }
//! ```

// =============================================================================
// CORE MODULES
// =============================================================================

pub mod domain;
pub mod ports;
pub mod service;

/// Adapters for external integrations.
/// `TomlConfigProvider` requires feature: `network`
pub mod adapters;

/// Test utilities (FixedTimeSource, ManualTimeSource)
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// =============================================================================
// CORE RE-EXPORTS
// =============================================================================

// Domain entities
pub use domain::{
    AliveStatus, AliveStatusResp, ConnectionDirection, DisconnectReason, Distance, HelloEnvelope,
    InsertOutcome, KBucket, LivenessConfig, LivenessError, NodeId, PendingConnections,
    PendingGuard, RequestContext, RoutingTable, RoutingTableStats, SharedRoutingTable, Timestamp,
    TransportError, MAX_MESSAGE_SIZE, PROTOCOL_ID,
};

// Domain services
pub use domain::{calculate_bucket_index, find_k_closest, xor_distance};

// Port traits
pub use ports::{
    CandidateSource, ConfigProvider, HelloTransport, LivenessApi, PeerHealthCheck, PeerTable,
    TimeSource,
};

// Service
pub use service::{HandshakeOutcome, LivenessService, RoundReport, SkipReason};

// =============================================================================
// ADAPTER RE-EXPORTS
// =============================================================================

pub use adapters::{
    InMemoryNetwork, InMemoryTransport, StaticCandidates, StaticConfigProvider, SystemTimeSource,
};

#[cfg(feature = "network")]
pub use adapters::{ConfigError, TomlConfigProvider};

// =============================================================================
// TEST UTILITIES (Requires `test-utils` feature)
// =============================================================================

#[cfg(feature = "test-utils")]
pub use test_utils::{FixedTimeSource, ManualTimeSource};
