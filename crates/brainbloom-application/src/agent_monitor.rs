//! Periodic agent-status polling.
//!
//! The monitor polls once immediately and then on every tick of its
//! interval. Each poll produces a [`MonitorReport`] that is published on a
//! `watch` channel, so readers always see the latest report and never a
//! backlog.

use brainbloom_core::monitor::{AgentStatus, MonitorReport};
use brainbloom_core::provider::AgentStatusProvider;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Polls an [`AgentStatusProvider`] on a fixed interval.
#[derive(Clone)]
pub struct AgentMonitor {
    provider: Arc<dyn AgentStatusProvider>,
    poll_interval: Duration,
}

impl AgentMonitor {
    pub fn new(provider: Arc<dyn AgentStatusProvider>, poll_interval: Duration) -> Self {
        Self {
            provider,
            poll_interval,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Fetches statuses once.
    ///
    /// A failed fetch yields a critical report that still carries `previous`,
    /// the last list that was fetched successfully.
    pub async fn poll_once(&self, previous: &[AgentStatus]) -> MonitorReport {
        match self.provider.agent_statuses().await {
            Ok(agents) => {
                let report = MonitorReport::from_agents(agents);
                tracing::debug!(
                    agents = report.agents.len(),
                    health = %report.health,
                    "[AgentMonitor] Poll succeeded"
                );
                report
            }
            Err(e) => {
                tracing::warn!(error = %e, "[AgentMonitor] Poll failed");
                MonitorReport::failed(previous.to_vec(), e.to_string())
            }
        }
    }

    /// Spawns the polling loop.
    ///
    /// The loop ends when `cancel` is cancelled or every receiver of the
    /// returned handle's channel has been dropped.
    pub fn start(self, cancel: CancellationToken) -> MonitorHandle {
        let (tx, rx) = watch::channel(None);
        let token = cancel.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::info!(
                interval_secs = self.poll_interval.as_secs(),
                "[AgentMonitor] Started"
            );

            let mut last_good: Vec<AgentStatus> = Vec::new();
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                let report = tokio::select! {
                    _ = token.cancelled() => break,
                    report = self.poll_once(&last_good) => report,
                };
                if report.error.is_none() {
                    last_good = report.agents.clone();
                }

                if tx.send(Some(report)).is_err() {
                    tracing::debug!("[AgentMonitor] No receivers left");
                    break;
                }
            }
            tracing::info!("[AgentMonitor] Stopped");
        });

        MonitorHandle { rx, cancel, task }
    }
}

/// Handle to a running [`AgentMonitor`] loop.
pub struct MonitorHandle {
    rx: watch::Receiver<Option<MonitorReport>>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl MonitorHandle {
    /// A receiver for reports; `None` until the first poll completes.
    pub fn subscribe(&self) -> watch::Receiver<Option<MonitorReport>> {
        self.rx.clone()
    }

    /// The most recent report, if any.
    pub fn latest(&self) -> Option<MonitorReport> {
        self.rx.borrow().clone()
    }

    /// Cancels the loop and waits for it to finish.
    pub async fn stop(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "[AgentMonitor] Polling task failed");
        }
    }
}
