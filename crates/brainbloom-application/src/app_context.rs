//! Wiring of the session store and data providers for one run of the app.

use crate::agent_monitor::AgentMonitor;
use brainbloom_core::Result;
use brainbloom_core::config::RootConfig;
use brainbloom_core::directory::{GeoLocation, PeerProfile, Resource, ResourceFilter};
use brainbloom_core::provider::{AgentStatusProvider, PeerProvider, ResourceProvider};
use brainbloom_core::session::{ReplyService, SessionStore};
use brainbloom_infrastructure::{MockApiService, MockDelays};
use std::sync::Arc;
use std::time::Duration;

/// Collaborators an [`AppContext`] is built from.
pub struct Backend {
    pub replies: Arc<dyn ReplyService>,
    pub peers: Arc<dyn PeerProvider>,
    pub resources: Arc<dyn ResourceProvider>,
    pub agents: Arc<dyn AgentStatusProvider>,
}

impl Backend {
    /// Routes every concern to one mock service.
    pub fn mock(service: MockApiService) -> Self {
        let service = Arc::new(service);
        Self {
            replies: service.clone(),
            peers: service.clone(),
            resources: service.clone(),
            agents: service,
        }
    }
}

/// Everything a front-end needs: the conversation session, the user's
/// location and the directory and telemetry providers.
pub struct AppContext {
    session: Arc<SessionStore>,
    peers: Arc<dyn PeerProvider>,
    resources: Arc<dyn ResourceProvider>,
    agents: Arc<dyn AgentStatusProvider>,
    location: GeoLocation,
    poll_interval: Duration,
}

impl AppContext {
    pub fn new(config: &RootConfig, backend: Backend) -> Self {
        let session =
            SessionStore::new(backend.replies).with_reply_timeout(config.chat.reply_timeout());
        Self {
            session: Arc::new(session),
            peers: backend.peers,
            resources: backend.resources,
            agents: backend.agents,
            location: config.location,
            poll_interval: config.monitor.poll_interval(),
        }
    }

    /// Builds a context backed by [`MockApiService`], honouring
    /// `mock.failure_rate` from `config`.
    pub fn with_mock_backend(config: &RootConfig, delays: MockDelays) -> Self {
        let service = MockApiService::new(delays).with_failure_rate(config.mock.failure_rate);
        Self::new(config, Backend::mock(service))
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn location(&self) -> GeoLocation {
        self.location
    }

    /// Peers ordered for display, online first.
    pub async fn find_peers(&self) -> Result<Vec<PeerProfile>> {
        let mut peers = self.peers.peers().await?;
        PeerProfile::sort_for_display(&mut peers);
        tracing::debug!(count = peers.len(), "[AppContext] Peers loaded");
        Ok(peers)
    }

    /// Resources near the configured location that pass `filter`.
    pub async fn find_resources(&self, filter: &ResourceFilter) -> Result<Vec<Resource>> {
        let resources = self.resources.resources(Some(self.location)).await?;
        let total = resources.len();
        let matched = filter.apply(resources);
        tracing::debug!(total, matched = matched.len(), "[AppContext] Resources loaded");
        Ok(matched)
    }

    /// A monitor over the agent provider using the configured interval.
    pub fn agent_monitor(&self) -> AgentMonitor {
        AgentMonitor::new(self.agents.clone(), self.poll_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use brainbloom_core::directory::ResourceKind;
    use brainbloom_core::session::SubmitOutcome;
    use std::sync::Mutex;

    fn instant_context() -> AppContext {
        AppContext::with_mock_backend(&RootConfig::default(), MockDelays::none())
    }

    #[tokio::test]
    async fn test_find_peers_puts_online_first() {
        let peers = instant_context().find_peers().await.unwrap();
        assert_eq!(peers.len(), 3);
        assert!(peers[0].is_online);
        assert!(!peers[2].is_online);
    }

    #[tokio::test]
    async fn test_find_resources_applies_filter() {
        let context = instant_context();

        let all = context.find_resources(&ResourceFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let groups = context
            .find_resources(&ResourceFilter {
                search: String::new(),
                kind: Some(ResourceKind::SupportGroup),
            })
            .await
            .unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "Mindful Healing Support Group");

        let trauma = context
            .find_resources(&ResourceFilter {
                search: "trauma".to_string(),
                kind: None,
            })
            .await
            .unwrap();
        assert_eq!(trauma.len(), 1);
    }

    /// Records the location each lookup was made with.
    #[derive(Default)]
    struct RecordingResources {
        seen: Mutex<Vec<Option<GeoLocation>>>,
    }

    #[async_trait]
    impl ResourceProvider for RecordingResources {
        async fn resources(&self, location: Option<GeoLocation>) -> Result<Vec<Resource>> {
            self.seen.lock().unwrap().push(location);
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_resources_use_configured_location() {
        let mut config = RootConfig::default();
        config.location = GeoLocation {
            lat: 40.7128,
            lng: -74.006,
        };
        let recorder = Arc::new(RecordingResources::default());
        let mut backend = Backend::mock(MockApiService::new(MockDelays::none()));
        backend.resources = recorder.clone();

        let context = AppContext::new(&config, backend);
        context.find_resources(&ResourceFilter::default()).await.unwrap();

        assert_eq!(*recorder.seen.lock().unwrap(), vec![Some(config.location)]);
    }

    #[tokio::test]
    async fn test_session_uses_mock_replies() {
        let context = instant_context();
        let outcome = context
            .session()
            .submit_user_message("there is no point anymore")
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            SubmitOutcome::Replied {
                crisis_alert_raised: true,
                ..
            }
        ));
        assert_eq!(context.session().messages().len(), 2);
    }

    #[test]
    fn test_monitor_uses_configured_interval() {
        let mut config = RootConfig::default();
        config.monitor.poll_interval_secs = 12;
        let context = AppContext::with_mock_backend(&config, MockDelays::none());
        assert_eq!(context.agent_monitor().poll_interval(), Duration::from_secs(12));
    }
}
