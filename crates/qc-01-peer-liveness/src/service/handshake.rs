//! Outbound Hello handshake.

use tracing::{debug, info, warn};

use crate::domain::{
    ConnectionDirection, InsertOutcome, LivenessError, MarkRefused, NodeId, TransportError,
};
use crate::service::LivenessService;

/// Result of one outbound attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandshakeOutcome {
    /// Peer answered and is now in the routing table
    Committed,
    /// No Hello was sent
    Skipped(SkipReason),
    /// Hello was not acknowledged
    Failed(LivenessError),
    /// Peer answered but the routing table refused it
    Rejected(LivenessError),
}

impl HandshakeOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed)
    }
}

/// Why `connect` did not send a Hello.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Service is closed
    ShutDown,
    /// Candidate is the local node
    SelfPeer,
    /// Candidate is already in the routing table
    AlreadyKnown,
    /// Another attempt for the candidate is in flight
    AlreadyPending,
    /// Pending registry is at capacity
    RegistryFull,
}

impl From<MarkRefused> for SkipReason {
    fn from(refused: MarkRefused) -> Self {
        match refused {
            MarkRefused::AlreadyPending => Self::AlreadyPending,
            MarkRefused::RegistryFull => Self::RegistryFull,
        }
    }
}

impl LivenessService {
    /// Greet `candidate` and record it as live on acknowledgement.
    ///
    /// At most one attempt per identity is in flight at any time. The
    /// pending mark is released on every exit, including when the returned
    /// future is dropped before completion.
    pub async fn connect(&self, candidate: NodeId) -> HandshakeOutcome {
        if self.is_closed() {
            return HandshakeOutcome::Skipped(SkipReason::ShutDown);
        }
        if candidate == self.local_node_id {
            return HandshakeOutcome::Skipped(SkipReason::SelfPeer);
        }
        if self.table.contains(&candidate) {
            return HandshakeOutcome::Skipped(SkipReason::AlreadyKnown);
        }

        let _guard = match self
            .pending
            .try_begin(candidate, ConnectionDirection::Outbound, self.now())
        {
            Ok(guard) => guard,
            Err(refused) => {
                debug!(peer = %candidate, reason = ?refused, "Skipping outbound Hello");
                return HandshakeOutcome::Skipped(refused.into());
            }
        };

        // A concurrent attempt may have committed between the check above
        // and placing the mark.
        if self.table.contains(&candidate) {
            return HandshakeOutcome::Skipped(SkipReason::AlreadyKnown);
        }

        let status = self.own_status();
        let sent = tokio::time::timeout(
            self.config.hello_timeout(),
            self.transport.send_hello(&candidate, status),
        )
        .await;

        let resp = match sent {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => {
                warn!(peer = %candidate, error = %e, "Hello failed");
                return HandshakeOutcome::Failed(e.into());
            }
            Err(_elapsed) => {
                warn!(peer = %candidate, "Hello timed out");
                return HandshakeOutcome::Failed(TransportError::Timeout.into());
            }
        };

        if !resp.success {
            warn!(peer = %candidate, "Hello refused by peer");
            return HandshakeOutcome::Failed(TransportError::Rejected.into());
        }

        match self.table.insert(candidate) {
            Ok(InsertOutcome::Inserted) => {
                info!(peer = %candidate, "Peer added to routing table");
                HandshakeOutcome::Committed
            }
            Ok(InsertOutcome::Refreshed) => HandshakeOutcome::Committed,
            Err(e) => {
                debug!(peer = %candidate, error = %e, "Routing table declined peer");
                HandshakeOutcome::Rejected(e)
            }
        }
    }
}
