use tracing::{debug, info, warn};

use crate::domain::{
    AliveStatus, AliveStatusResp, ConnectionDirection, HelloEnvelope, InsertOutcome,
    LivenessError, NodeId, RequestContext,
};
use crate::ports::LivenessApi;
use crate::service::LivenessService;

impl LivenessService {
    /// Answer a Hello whose caller has already been authenticated.
    ///
    /// The call is evidence the caller is alive, so it is merged into the
    /// routing table. A full bucket or a self-Hello still acknowledges.
    ///
    /// While the caller is being recorded it holds an inbound pending mark,
    /// so an outbound attempt to the same peer started meanwhile is skipped.
    /// A Hello that crosses an attempt already in flight is recorded without
    /// touching that attempt's mark.
    pub fn handle_hello(&self, envelope: HelloEnvelope) -> AliveStatusResp {
        let HelloEnvelope { caller, status } = envelope;
        info!(caller = %caller, status = %status, "Hello received");

        let addresses = self.transport.peer_info(&caller);
        debug!(caller = %caller, known_addresses = addresses.len(), "Caller addresses");

        if caller == self.local_node_id {
            debug!(caller = %caller, "Hello from self, not recorded");
            return AliveStatusResp::ok();
        }

        let _inbound = match self
            .pending
            .try_begin(caller, ConnectionDirection::Inbound, self.now())
        {
            Ok(guard) => Some(guard),
            Err(refused) => {
                let direction = self.pending.get(&caller).map(|entry| entry.direction);
                debug!(
                    caller = %caller,
                    reason = ?refused,
                    pending_direction = ?direction,
                    "Hello crosses a pending attempt"
                );
                None
            }
        };

        match self.table.insert(caller) {
            Ok(InsertOutcome::Inserted) => {
                info!(peer = %caller, "Peer added to routing table");
            }
            Ok(InsertOutcome::Refreshed) => {
                debug!(peer = %caller, "Peer refreshed");
            }
            Err(e) => {
                debug!(peer = %caller, error = %e, "Routing table declined peer");
            }
        }

        AliveStatusResp::ok()
    }

    /// Remove a known peer, e.g. on a health-check verdict.
    pub fn remove_peer(
        &self,
        node_id: &NodeId,
        reason: crate::domain::DisconnectReason,
    ) -> Result<(), LivenessError> {
        self.table.remove(node_id)?;
        info!(peer = %node_id, reason = %reason, "Peer removed from routing table");
        Ok(())
    }
}

impl LivenessApi for LivenessService {
    fn hello(
        &self,
        ctx: RequestContext,
        status: AliveStatus,
    ) -> Result<AliveStatusResp, LivenessError> {
        let envelope = HelloEnvelope::from_context(ctx, status).map_err(|e| {
            warn!(error = %e, "Rejected Hello");
            e
        })?;
        Ok(self.handle_hello(envelope))
    }

    fn close(&self) {
        LivenessService::close(self)
    }

    fn routing_table_size(&self) -> usize {
        self.table.size()
    }

    fn routing_table_peers(&self) -> Vec<NodeId> {
        self.table.list_peers()
    }
}
