//! Routing Table Implementation
//!
//! Kademlia k-bucket routing table holding the identities of peers that
//! completed a liveness handshake. `RoutingTable` is the single-owner
//! domain structure; `SharedRoutingTable` wraps it for concurrent use.

// Semantic submodules
mod bucket;
mod config;
mod shared;
mod stats;
mod table;

// Re-export public API
pub use bucket::{BucketEntry, KBucket};
pub use config::NUM_BUCKETS;
pub use shared::SharedRoutingTable;
pub use stats::{InsertOutcome, RoutingTableStats};
pub use table::RoutingTable;
