use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info, warn};

use crate::domain::{DisconnectReason, NodeId};
use crate::ports::{CandidateSource, PeerHealthCheck};
use crate::service::{HandshakeOutcome, LivenessService};

/// Tally of one outbound round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundReport {
    /// Peers newly committed or refreshed
    pub committed: usize,
    /// Hellos that were not acknowledged
    pub failed: usize,
    /// Acknowledged peers the routing table refused
    pub rejected: usize,
    /// Candidates for which no Hello was sent
    pub skipped: usize,
    /// Known peers removed on a health-check verdict
    pub evicted: usize,
    /// Stale pending marks reclaimed
    pub expired: usize,
}

impl RoundReport {
    fn record(&mut self, outcome: &HandshakeOutcome) {
        match outcome {
            HandshakeOutcome::Committed => self.committed += 1,
            HandshakeOutcome::Skipped(_) => self.skipped += 1,
            HandshakeOutcome::Failed(_) => self.failed += 1,
            HandshakeOutcome::Rejected(_) => self.rejected += 1,
        }
    }
}

impl LivenessService {
    /// Reclaim pending marks older than `max_pending_secs`.
    pub fn expire_stale_pending(&self) -> Vec<NodeId> {
        let expired = self
            .pending
            .expire_stale(self.now(), self.config.max_pending_secs);
        for id in &expired {
            debug!(peer = %id, "Reclaimed stale pending mark");
        }
        expired
    }

    /// Remove every known peer `health` reports unreachable.
    pub fn evict_unreachable(&self, health: &dyn PeerHealthCheck) -> usize {
        self.table
            .list_peers()
            .into_iter()
            .filter(|id| health.is_unreachable(id))
            .filter(|id| self.remove_peer(id, DisconnectReason::Unreachable).is_ok())
            .count()
    }

    /// Run one outbound round.
    ///
    /// Hellos run concurrently, bounded by `max_concurrent_hellos`. Once the
    /// service is closed no further attempts are started; attempts already
    /// in flight run to completion.
    pub async fn run_round(
        self: &Arc<Self>,
        source: &dyn CandidateSource,
        health: Option<&dyn PeerHealthCheck>,
    ) -> RoundReport {
        let mut report = RoundReport {
            expired: self.expire_stale_pending().len(),
            ..RoundReport::default()
        };
        if let Some(health) = health {
            report.evicted = self.evict_unreachable(health);
        }

        let mut seen = HashSet::new();
        let candidates: Vec<NodeId> = source
            .candidates()
            .into_iter()
            .filter(|id| seen.insert(*id))
            .collect();

        let permits = Arc::new(Semaphore::new(self.config.max_concurrent_hellos));
        let mut attempts = JoinSet::new();

        for candidate in candidates {
            if self.is_closed() {
                report.skipped += 1;
                continue;
            }
            let Ok(permit) = Arc::clone(&permits).acquire_owned().await else {
                break;
            };
            let service = Arc::clone(self);
            attempts.spawn(async move {
                let outcome = service.connect(candidate).await;
                drop(permit);
                outcome
            });
        }

        while let Some(joined) = attempts.join_next().await {
            match joined {
                Ok(outcome) => report.record(&outcome),
                Err(e) => {
                    warn!(error = %e, "Hello task aborted");
                    report.failed += 1;
                }
            }
        }

        debug!(
            committed = report.committed,
            failed = report.failed,
            rejected = report.rejected,
            skipped = report.skipped,
            evicted = report.evicted,
            expired = report.expired,
            "Liveness round complete"
        );
        report
    }

    /// Run `run_round` every `round_interval` until `close()`.
    ///
    /// The first round starts immediately.
    pub fn spawn_rounds(
        self: Arc<Self>,
        source: Arc<dyn CandidateSource>,
        health: Option<Arc<dyn PeerHealthCheck>>,
    ) -> JoinHandle<()> {
        let mut shutdown = self.shutdown_signal();
        let mut interval = tokio::time::interval(self.config.round_interval());
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        tokio::spawn(async move {
            info!(
                node = %self.local_node_id,
                interval_secs = self.config.round_interval_secs,
                "Liveness rounds started"
            );
            loop {
                if self.is_closed() {
                    break;
                }
                tokio::select! {
                    biased;
                    _ = shutdown.changed() => break,
                    _ = interval.tick() => {
                        if self.is_closed() {
                            break;
                        }
                        self.run_round(source.as_ref(), health.as_deref()).await;
                    }
                }
            }
            info!(node = %self.local_node_id, "Liveness rounds stopped");
        })
    }
}
