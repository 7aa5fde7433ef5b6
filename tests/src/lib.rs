//! # Peer Liveness Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Routing table and pending registry throughput
//! └── src/integration/  # Multi-node Hello exchange over InMemoryNetwork
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p liveness-tests
//! cargo bench -p liveness-tests
//! ```

pub mod integration;
