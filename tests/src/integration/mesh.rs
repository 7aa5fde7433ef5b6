//! Multi-node liveness flows.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::Duration;

    use qc_01_peer_liveness::{
        LivenessApi, LivenessConfig, NodeId, PeerHealthCheck, StaticCandidates,
    };
    use tokio::time::timeout;

    use crate::integration::{init_tracing, node_id, Mesh};

    struct Unreachable(NodeId);

    impl PeerHealthCheck for Unreachable {
        fn is_unreachable(&self, node_id: &NodeId) -> bool {
            *node_id == self.0
        }
    }

    #[tokio::test]
    async fn test_one_round_per_node_forms_full_view() {
        init_tracing();
        let mesh = Mesh::new(5, LivenessConfig::for_testing());

        for (i, node) in mesh.nodes.iter().enumerate() {
            let source = StaticCandidates::new(mesh.others(i));
            node.run_round(&source, None).await;
        }

        for (i, node) in mesh.nodes.iter().enumerate() {
            let peers: HashSet<_> = node.routing_table_peers().into_iter().collect();
            let expected: HashSet<_> = mesh.others(i).into_iter().collect();
            assert_eq!(peers, expected, "node {i} view");
            assert_eq!(node.routing_table_size(), peers.len());
            assert_eq!(node.pending_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_inbound_hello_alone_makes_callee_aware() {
        init_tracing();
        let mesh = Mesh::new(3, LivenessConfig::for_testing());

        // only node 0 dials; nodes 1 and 2 learn it from the inbound Hello
        let source = StaticCandidates::new(mesh.others(0));
        let report = mesh.nodes[0].run_round(&source, None).await;

        assert_eq!(report.committed, 2);
        assert_eq!(mesh.nodes[1].routing_table_peers(), vec![node_id(1)]);
        assert_eq!(mesh.nodes[2].routing_table_peers(), vec![node_id(1)]);
    }

    #[tokio::test]
    async fn test_partitioned_peer_is_evicted_then_relearned() {
        init_tracing();
        let mesh = Mesh::new(2, LivenessConfig::for_testing());
        let (a, b) = (&mesh.nodes[0], &mesh.nodes[1]);
        let source = StaticCandidates::new(vec![node_id(2)]);

        a.run_round(&source, None).await;
        assert_eq!(a.routing_table_peers(), vec![node_id(2)]);

        mesh.network.partition(node_id(1), node_id(2));
        let report = a.run_round(&source, Some(&Unreachable(node_id(2)))).await;
        assert_eq!(report.evicted, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(a.routing_table_size(), 0);

        mesh.network.heal(node_id(1), node_id(2));
        let report = a.run_round(&source, None).await;
        assert_eq!(report.committed, 1);
        assert!(b.routing_table_peers().contains(&node_id(1)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_background_rounds_converge_and_stop() {
        init_tracing();
        let mesh = Mesh::new(4, LivenessConfig::for_testing());

        let handles: Vec<_> = mesh
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                let source = Arc::new(StaticCandidates::new(mesh.others(i)));
                Arc::clone(node).spawn_rounds(source, None)
            })
            .collect();

        let converged = timeout(Duration::from_secs(10), async {
            loop {
                if mesh.nodes.iter().all(|n| n.routing_table_size() == 3) {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        })
        .await;
        assert!(converged.is_ok(), "mesh did not converge");

        mesh.close_all();
        for handle in handles {
            timeout(Duration::from_secs(5), handle)
                .await
                .expect("round loop exits after close")
                .expect("round loop does not panic");
        }
    }

    #[tokio::test]
    async fn test_unreachable_target_releases_marks_each_round() {
        init_tracing();
        let mesh = Mesh::new(2, LivenessConfig::for_testing());
        let a = &mesh.nodes[0];
        let source = StaticCandidates::new(vec![node_id(2)]);

        mesh.network.unregister(&node_id(2));
        for _ in 0..3 {
            let report = a.run_round(&source, None).await;
            assert_eq!(report.failed, 1);
            assert_eq!(a.pending_count(), 0);
        }

        mesh.network.register(&mesh.nodes[1]);
        let report = a.run_round(&source, None).await;
        assert_eq!(report.committed, 1);
    }
}
