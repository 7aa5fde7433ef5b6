//! Domain Layer - Pure business logic with no I/O
//!
//! This module contains the core liveness logic including:
//! - Node identifiers and XOR distance calculation
//! - Routing table with k-buckets
//! - Pending-connection registry
//! - Hello protocol messages

pub mod entities;
pub mod errors;
pub mod messages;
pub mod pending;
pub mod routing_table;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use messages::*;
pub use pending::*;
pub use routing_table::*;
pub use services::*;
pub use value_objects::*;
