//! # Network Adapters
//!
//! ## Adapters Provided
//!
//! - `SystemTimeSource` - Production time source using system clock
//! - `StaticConfigProvider` - Hardcoded configuration
//! - `TomlConfigProvider` - Config file loading (requires "network" feature)
//! - `StaticCandidates` - Replaceable candidate list for outbound rounds
//! - `InMemoryNetwork` / `InMemoryTransport` - Process-local Hello delivery

// Semantic submodules
/// Candidate sources
pub mod candidates;
/// Configuration providers
pub mod config;
/// Time source adapters
pub mod time;
/// Transport adapters
pub mod transport;

// Re-export public API
pub use candidates::StaticCandidates;
pub use config::StaticConfigProvider;
pub use time::SystemTimeSource;
pub use transport::{InMemoryNetwork, InMemoryTransport};

#[cfg(feature = "network")]
pub use config::{ConfigError, TomlConfigProvider};
