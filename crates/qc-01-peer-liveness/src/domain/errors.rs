//! Domain Errors for Peer Liveness

use std::fmt;

use thiserror::Error;

/// Errors that can occur in the liveness subsystem
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LivenessError {
    /// Inbound request context did not yield a caller identity
    #[error("invalid request context: {reason}")]
    InvalidContext { reason: String },

    /// Outbound Hello could not be delivered or was refused
    #[error("transport failure: {0}")]
    TransportFailure(#[from] TransportError),

    /// Attempted to add local node to routing table
    #[error("cannot add local node to routing table")]
    SelfConnection,

    /// K-bucket is at capacity
    #[error("k-bucket is at capacity")]
    BucketFull,

    /// Peer not found in routing table
    #[error("peer not found in routing table")]
    PeerNotFound,

    /// Wire encoding or decoding failed
    #[error("codec error: {0}")]
    Codec(String),

    /// Configuration is not usable
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl LivenessError {
    /// Shorthand for an `InvalidContext` error.
    pub fn invalid_context(reason: impl Into<String>) -> Self {
        Self::InvalidContext {
            reason: reason.into(),
        }
    }

    /// Whether a later attempt may succeed.
    ///
    /// Only transport failures are retryable; every other variant is a
    /// property of the request or the local table.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransportFailure(_))
    }
}

/// Errors from the transport carrying Hello messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No response within the Hello timeout
    #[error("hello timed out")]
    Timeout,
    /// Remote peer is unknown or unreachable
    #[error("peer unreachable")]
    Unreachable,
    /// Remote answered with `success: false`
    #[error("hello rejected by peer")]
    Rejected,
    /// Lower-level I/O failure
    #[error("i/o error: {0}")]
    Io(String),
}

/// Reasons why a peer was removed from the routing table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectReason {
    /// Health check reported the peer unreachable
    Unreachable,
    /// Explicitly removed by application
    ExplicitRemoval,
}

impl fmt::Display for DisconnectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable => write!(f, "Unreachable"),
            Self::ExplicitRemoval => write!(f, "Explicit removal"),
        }
    }
}
