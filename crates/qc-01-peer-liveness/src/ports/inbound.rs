//! # Driving Ports (Inbound API)
//!
//! These are the public APIs this subsystem exposes to the application node
//! and to the transport adapter that delivers Hello requests.

use crate::domain::{AliveStatus, AliveStatusResp, LivenessError, NodeId, RequestContext};

/// Primary API of the liveness subsystem.
///
/// # Example
///
/// ```rust,ignore
/// use qc_01_peer_liveness::ports::LivenessApi;
///
/// fn report<T: LivenessApi>(api: &T) {
///     println!("{} live peers", api.routing_table_size());
/// }
/// ```
pub trait LivenessApi: Send + Sync {
    /// Answer an inbound Hello.
    ///
    /// # Returns
    ///
    /// - `Ok({ success: true })` once the caller has been recorded
    /// - `Err(InvalidContext)` if `ctx` yields no caller identity; no state
    ///   is modified in that case
    fn hello(
        &self,
        ctx: RequestContext,
        status: AliveStatus,
    ) -> Result<AliveStatusResp, LivenessError>;

    /// Signal all background liveness work to stop.
    ///
    /// Calling this more than once is a no-op.
    fn close(&self);

    /// Number of peers in the routing table.
    fn routing_table_size(&self) -> usize;

    /// Snapshot of the routing table's peers.
    fn routing_table_peers(&self) -> Vec<NodeId>;
}
