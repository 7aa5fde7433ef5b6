//! # Integration Tests
//!
//! Several `LivenessService` nodes wired through one `InMemoryNetwork`.

pub mod mesh;

use std::sync::Arc;

use qc_01_peer_liveness::{
    InMemoryNetwork, LivenessConfig, LivenessService, ManualTimeSource, NodeId,
};

/// Install a test subscriber once. Honors `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Node id with every byte set to `val`.
pub fn node_id(val: u8) -> NodeId {
    NodeId::new([val; 32])
}

/// Nodes sharing one network and one clock.
pub struct Mesh {
    pub network: Arc<InMemoryNetwork>,
    pub clock: Arc<ManualTimeSource>,
    pub nodes: Vec<Arc<LivenessService>>,
}

impl Mesh {
    /// Build `count` nodes with ids `1..=count`.
    pub fn new(count: u8, config: LivenessConfig) -> Self {
        let network = InMemoryNetwork::new();
        let clock = Arc::new(ManualTimeSource::new(1_000));
        let nodes = (1..=count)
            .map(|i| {
                let id = node_id(i);
                let service = Arc::new(
                    LivenessService::with_shared_table(
                        id,
                        config.clone(),
                        Arc::new(network.transport_for(id)),
                        clock.clone(),
                    )
                    .expect("valid test config"),
                );
                network.register(&service);
                service
            })
            .collect();

        Self {
            network,
            clock,
            nodes,
        }
    }

    /// Ids of every node except `index`.
    pub fn others(&self, index: usize) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, n)| *n.local_node_id())
            .collect()
    }

    pub fn close_all(&self) {
        for node in &self.nodes {
            node.close();
        }
    }
}
