use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Weak};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{trace, warn};

use crate::domain::{
    decode_response, decode_status, encode_response, encode_status, AliveStatus, AliveStatusResp,
    NodeId, RequestContext, TransportError,
};
use crate::ports::{HelloTransport, LivenessApi};
use crate::service::LivenessService;

// ============================================================================
// InMemoryNetwork - Process-local Hello delivery
// ============================================================================

/// Process-local network connecting `LivenessService` instances.
///
/// Hellos are encoded with the wire codec, handed to the target service's
/// `hello` entry point with an authenticated `RequestContext`, and the
/// response is decoded on the way back. Services are held weakly so the
/// network never keeps a node alive.
#[derive(Debug, Default)]
pub struct InMemoryNetwork {
    nodes: RwLock<HashMap<NodeId, Weak<LivenessService>>>,
    addresses: RwLock<HashMap<NodeId, Vec<SocketAddr>>>,
    partitions: RwLock<HashSet<(NodeId, NodeId)>>,
}

impl InMemoryNetwork {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Transport that sends Hellos as `local`.
    pub fn transport_for(self: &Arc<Self>, local: NodeId) -> InMemoryTransport {
        InMemoryTransport {
            network: Arc::clone(self),
            local,
        }
    }

    /// Make `service` reachable under its local node id.
    pub fn register(&self, service: &Arc<LivenessService>) {
        self.nodes
            .write()
            .insert(*service.local_node_id(), Arc::downgrade(service));
    }

    /// Make `node_id` unreachable.
    pub fn unregister(&self, node_id: &NodeId) {
        self.nodes.write().remove(node_id);
    }

    /// Addresses reported by `peer_info` for `node_id`.
    pub fn set_addresses(&self, node_id: NodeId, addrs: Vec<SocketAddr>) {
        self.addresses.write().insert(node_id, addrs);
    }

    /// Drop all traffic between `a` and `b`.
    pub fn partition(&self, a: NodeId, b: NodeId) {
        self.partitions.write().insert(Self::pair(a, b));
    }

    /// Restore traffic between `a` and `b`.
    pub fn heal(&self, a: NodeId, b: NodeId) {
        self.partitions.write().remove(&Self::pair(a, b));
    }

    fn pair(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    fn deliver(
        &self,
        from: NodeId,
        to: &NodeId,
        request: &[u8],
    ) -> Result<Vec<u8>, TransportError> {
        if self.partitions.read().contains(&Self::pair(from, *to)) {
            return Err(TransportError::Unreachable);
        }
        let target = self
            .nodes
            .read()
            .get(to)
            .and_then(Weak::upgrade)
            .ok_or(TransportError::Unreachable)?;

        let status = decode_status(request).map_err(|e| TransportError::Io(e.to_string()))?;
        let resp = answer_hello(&*target, RequestContext::hello_from(from), status);
        encode_response(&resp).map_err(|e| TransportError::Io(e.to_string()))
    }
}

/// Run the callee side of a Hello, turning a refused request into a nack.
pub(crate) fn answer_hello(
    target: &dyn LivenessApi,
    ctx: RequestContext,
    status: AliveStatus,
) -> AliveStatusResp {
    let caller = ctx.caller;
    target.hello(ctx, status).unwrap_or_else(|e| {
        warn!(caller = ?caller, error = %e, "Hello refused by callee");
        AliveStatusResp::failed()
    })
}

/// `HelloTransport` over an `InMemoryNetwork`.
#[derive(Debug, Clone)]
pub struct InMemoryTransport {
    network: Arc<InMemoryNetwork>,
    local: NodeId,
}

#[async_trait]
impl HelloTransport for InMemoryTransport {
    async fn send_hello(
        &self,
        target: &NodeId,
        status: AliveStatus,
    ) -> Result<AliveStatusResp, TransportError> {
        trace!(from = %self.local, to = %target, "Delivering Hello");
        let request = encode_status(&status).map_err(|e| TransportError::Io(e.to_string()))?;
        let response = self.network.deliver(self.local, target, &request)?;
        decode_response(&response).map_err(|e| TransportError::Io(e.to_string()))
    }

    fn peer_info(&self, node_id: &NodeId) -> Vec<SocketAddr> {
        self.network
            .addresses
            .read()
            .get(node_id)
            .cloned()
            .unwrap_or_default()
    }
}
