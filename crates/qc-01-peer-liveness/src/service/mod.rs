//! # Liveness Service
//!
//! High-level service implementing the `LivenessApi` port.
//!
//! The service is the single owner of peer-liveness state transitions:
//!
//! ```text
//! Unknown ──connect()──→ Pending ──Hello ok──→ Known (routing table)
//!                           └────Hello failed──→ Unknown
//! Known ──remove_peer()──→ Unknown
//! ```
//!
//! Inbound Hellos (`api`), outbound handshakes (`handshake`) and the
//! periodic round loop (`maintenance`) all run concurrently against the
//! same shared routing table and pending registry.

// Semantic submodules
mod api;
mod core;
mod handshake;
mod maintenance;

// Re-export public API
pub use core::LivenessService;
pub use handshake::{HandshakeOutcome, SkipReason};
pub use maintenance::RoundReport;
