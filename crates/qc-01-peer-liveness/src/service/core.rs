use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::domain::{
    AliveStatus, LivenessConfig, LivenessError, NodeId, PendingConnections, SharedRoutingTable,
    Timestamp,
};
use crate::ports::{HelloTransport, PeerTable, TimeSource};

/// Liveness Service implementing the driving port.
///
/// Shared across tasks via `Arc`. The routing table and pending registry
/// synchronize internally; the service itself holds no lock across an
/// `.await`.
///
/// # Example
///
/// ```rust,ignore
/// use qc_01_peer_liveness::{LivenessConfig, LivenessService, NodeId, SystemTimeSource};
///
/// let service = LivenessService::with_shared_table(
///     NodeId::new([0u8; 32]),
///     LivenessConfig::default(),
///     transport,
///     Arc::new(SystemTimeSource::new()),
/// )?;
/// let rounds = Arc::new(service).spawn_rounds(candidates, None);
/// ```
pub struct LivenessService {
    /// Our own node ID
    pub(crate) local_node_id: NodeId,
    /// Service configuration
    pub(crate) config: LivenessConfig,
    /// Routing table of known live peers
    pub(crate) table: Arc<dyn PeerTable>,
    /// Handshakes in flight
    pub(crate) pending: Arc<PendingConnections>,
    /// Carrier for outbound Hellos
    pub(crate) transport: Arc<dyn HelloTransport>,
    /// Time source for pending marks and uptime
    pub(crate) time_source: Arc<dyn TimeSource>,
    /// When this service was created
    pub(crate) started_at: Timestamp,
    /// Set exactly once by `close()`
    closed: AtomicBool,
    /// Shutdown signal sender
    shutdown_tx: watch::Sender<bool>,
}

impl LivenessService {
    /// Create a new liveness service.
    ///
    /// # Arguments
    ///
    /// * `local_node_id` - Our own node ID
    /// * `config` - Liveness configuration (validated here)
    /// * `table` - Routing table implementation
    /// * `transport` - Carrier for outbound Hellos
    /// * `time_source` - Provider for current time
    pub fn new(
        local_node_id: NodeId,
        config: LivenessConfig,
        table: Arc<dyn PeerTable>,
        transport: Arc<dyn HelloTransport>,
        time_source: Arc<dyn TimeSource>,
    ) -> Result<Self, LivenessError> {
        config.validate()?;

        let (shutdown_tx, _) = watch::channel(false);
        let started_at = time_source.now();

        Ok(Self {
            local_node_id,
            pending: Arc::new(PendingConnections::new(config.max_pending)),
            config,
            table,
            transport,
            time_source,
            started_at,
            closed: AtomicBool::new(false),
            shutdown_tx,
        })
    }

    /// Create a service backed by a fresh `SharedRoutingTable`.
    pub fn with_shared_table(
        local_node_id: NodeId,
        config: LivenessConfig,
        transport: Arc<dyn HelloTransport>,
        time_source: Arc<dyn TimeSource>,
    ) -> Result<Self, LivenessError> {
        let table = Arc::new(SharedRoutingTable::empty(
            local_node_id,
            config.k,
            Arc::clone(&time_source),
        ));
        Self::new(local_node_id, config, table, transport, time_source)
    }

    /// Get the current timestamp from the time source.
    pub(crate) fn now(&self) -> Timestamp {
        self.time_source.now()
    }

    /// Our local node ID
    pub fn local_node_id(&self) -> &NodeId {
        &self.local_node_id
    }

    /// Active configuration
    pub fn config(&self) -> &LivenessConfig {
        &self.config
    }

    /// Status we report in outbound Hellos.
    pub fn own_status(&self) -> AliveStatus {
        AliveStatus {
            node_version: self.config.node_version.clone(),
            uptime_secs: self.now().secs_since(self.started_at),
            note: "ok".to_string(),
        }
    }

    /// Number of handshakes in flight
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether a handshake with `node_id` is in flight
    pub fn is_pending(&self, node_id: &NodeId) -> bool {
        self.pending.contains(node_id)
    }

    /// Signal shutdown to all background liveness work.
    ///
    /// Only the first call has an effect; later calls log a warning and
    /// return.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            warn!(node = %self.local_node_id, "Liveness service already closed");
            return;
        }
        self.shutdown_tx.send_replace(true);
        info!(node = %self.local_node_id, "Liveness service shutting down");
    }

    /// Whether `close()` has been called. Never blocks.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Subscribe to the shutdown signal.
    ///
    /// The receiver's value turns `true` once `close()` runs.
    pub fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.shutdown_tx.subscribe()
    }
}

impl std::fmt::Debug for LivenessService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LivenessService")
            .field("local_node_id", &self.local_node_id)
            .field("peers", &self.table.size())
            .field("pending", &self.pending.len())
            .field("closed", &self.is_closed())
            .finish()
    }
}
