//! In-memory stand-in for the BrainBloom backend.
//!
//! Every call sleeps for a simulated network delay and returns fixed data.
//! Replies are picked at random from supportive or crisis response pools,
//! chosen by [`classify`].

use async_trait::async_trait;
use brainbloom_core::directory::{Availability, GeoLocation, PeerProfile, Resource, ResourceKind};
use brainbloom_core::monitor::{AgentState, AgentStatus};
use brainbloom_core::provider::{AgentStatusProvider, PeerProvider, ResourceProvider};
use brainbloom_core::session::{Message, MessageKind, ReplyOutcome, ReplyService, classify};
use brainbloom_core::{BloomError, Result};
use rand::Rng;
use rand::seq::SliceRandom;
use std::time::Duration;

const CRISIS_RESPONSES: [&str; 3] = [
    "I hear that you're going through a really difficult time right now. Your feelings are valid, and I want you to know that help is available.",
    "I'm concerned about you. You don't have to go through this alone. There are people who want to help and support you.",
    "What you're feeling right now is temporary, even though it might not feel that way. Let's connect you with immediate support.",
];

const SUPPORTIVE_RESPONSES: [&str; 4] = [
    "I understand you're reaching out. Can you tell me more about how you're feeling today?",
    "Thank you for sharing with me. It takes courage to talk about what you're experiencing.",
    "I'm here to listen and support you. What's been on your mind lately?",
    "How has your day been? Sometimes talking through our feelings can help us process them better.",
];

/// Simulated latencies of the mock backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockDelays {
    /// Fixed part of the reply delay
    pub reply_base: Duration,
    /// Upper bound of the random part added to `reply_base`
    pub reply_jitter: Duration,
    pub peers: Duration,
    pub resources: Duration,
    pub agents: Duration,
    pub login: Duration,
    pub google_login: Duration,
}

impl MockDelays {
    /// No waiting at all; for tests.
    pub const fn none() -> Self {
        Self {
            reply_base: Duration::ZERO,
            reply_jitter: Duration::ZERO,
            peers: Duration::ZERO,
            resources: Duration::ZERO,
            agents: Duration::ZERO,
            login: Duration::ZERO,
            google_login: Duration::ZERO,
        }
    }
}

impl Default for MockDelays {
    fn default() -> Self {
        Self {
            reply_base: Duration::from_millis(1000),
            reply_jitter: Duration::from_millis(2000),
            peers: Duration::from_millis(800),
            resources: Duration::from_millis(1000),
            agents: Duration::from_millis(500),
            login: Duration::from_millis(1000),
            google_login: Duration::from_millis(1500),
        }
    }
}

/// Mock backend implementing every collaborator trait.
#[derive(Debug, Clone, Default)]
pub struct MockApiService {
    delays: MockDelays,
    /// Probability (0.0-1.0) that `send_message` fails
    failure_rate: f64,
}

impl MockApiService {
    pub fn new(delays: MockDelays) -> Self {
        Self {
            delays,
            failure_rate: 0.0,
        }
    }

    /// Makes `send_message` fail with the given probability. The rate is
    /// clamped to 0.0-1.0 and a non-finite rate disables failures.
    pub fn with_failure_rate(mut self, failure_rate: f64) -> Self {
        self.failure_rate = if failure_rate.is_finite() {
            failure_rate.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }
}

#[async_trait]
impl ReplyService for MockApiService {
    async fn send_message(&self, text: &str) -> Result<ReplyOutcome> {
        let classification = classify(text);

        // ThreadRng is not Send; finish with it before awaiting.
        let (delay, fail, content) = {
            let mut rng = rand::thread_rng();
            let jitter_ms = self.delays.reply_jitter.as_millis() as u64;
            let delay =
                self.delays.reply_base + Duration::from_millis(rng.gen_range(0..=jitter_ms));
            let fail = rng.gen_bool(self.failure_rate);
            let pool: &[&str] = if classification.is_crisis {
                &CRISIS_RESPONSES
            } else {
                &SUPPORTIVE_RESPONSES
            };
            let content = pool.choose(&mut rng).copied().unwrap_or(pool[0]);
            (delay, fail, content)
        };

        tokio::time::sleep(delay).await;

        if fail {
            tracing::warn!("[MockApi] Simulated reply failure");
            return Err(BloomError::collaborator("Simulated network error"));
        }

        let kind = if classification.is_crisis {
            MessageKind::Crisis
        } else {
            MessageKind::Normal
        };
        tracing::debug!(
            crisis = classification.is_crisis,
            delay_ms = delay.as_millis() as u64,
            "[MockApi] Reply generated"
        );

        Ok(ReplyOutcome {
            message: Message::agent(content, kind),
            crisis_alert: classification.alert(),
        })
    }
}

#[async_trait]
impl PeerProvider for MockApiService {
    async fn peers(&self) -> Result<Vec<PeerProfile>> {
        tokio::time::sleep(self.delays.peers).await;
        Ok(fixture_peers())
    }
}

#[async_trait]
impl ResourceProvider for MockApiService {
    async fn resources(&self, location: Option<GeoLocation>) -> Result<Vec<Resource>> {
        tokio::time::sleep(self.delays.resources).await;
        // The fixture list is the same wherever the user is.
        tracing::debug!(?location, "[MockApi] Resources requested");
        Ok(fixture_resources())
    }
}

#[async_trait]
impl AgentStatusProvider for MockApiService {
    async fn agent_statuses(&self) -> Result<Vec<AgentStatus>> {
        tokio::time::sleep(self.delays.agents).await;
        Ok(fixture_agents())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn fixture_peers() -> Vec<PeerProfile> {
    vec![
        PeerProfile {
            id: "1".to_string(),
            avatar: "👨‍💼".to_string(),
            description: "Someone who understands anxiety and work stress. Here to listen."
                .to_string(),
            match_percentage: 92,
            is_online: true,
            specialties: strings(&["anxiety", "work-stress", "depression"]),
        },
        PeerProfile {
            id: "2".to_string(),
            avatar: "👩‍🎓".to_string(),
            description: "College student supporting others through academic pressure and mental health."
                .to_string(),
            match_percentage: 87,
            is_online: true,
            specialties: strings(&["academic-stress", "social-anxiety", "self-esteem"]),
        },
        PeerProfile {
            id: "3".to_string(),
            avatar: "🧑‍⚕️".to_string(),
            description: "Healthcare worker who knows the importance of mental wellness."
                .to_string(),
            match_percentage: 85,
            is_online: false,
            specialties: strings(&["burnout", "trauma", "grief"]),
        },
    ]
}

fn fixture_resources() -> Vec<Resource> {
    vec![
        Resource {
            id: "1".to_string(),
            name: "Crisis Support Center".to_string(),
            kind: ResourceKind::CrisisCenter,
            address: "123 Main St, San Francisco, CA".to_string(),
            phone: "(555) 123-4567".to_string(),
            rating: 4.8,
            availability: Availability::Immediate,
            accepts_insurance: true,
            latitude: 37.7749,
            longitude: -122.4194,
            specialties: strings(&["crisis-intervention", "suicide-prevention"]),
        },
        Resource {
            id: "2".to_string(),
            name: "Dr. Sarah Johnson, LCSW".to_string(),
            kind: ResourceKind::Therapist,
            address: "456 Oak Ave, San Francisco, CA".to_string(),
            phone: "(555) 987-6543".to_string(),
            rating: 4.9,
            availability: Availability::WithinWeek,
            accepts_insurance: true,
            latitude: 37.7849,
            longitude: -122.4094,
            specialties: strings(&["anxiety", "depression", "trauma"]),
        },
        Resource {
            id: "3".to_string(),
            name: "Mindful Healing Support Group".to_string(),
            kind: ResourceKind::SupportGroup,
            address: "789 Pine St, San Francisco, CA".to_string(),
            phone: "(555) 456-7890".to_string(),
            rating: 4.7,
            availability: Availability::SameDay,
            accepts_insurance: false,
            latitude: 37.7649,
            longitude: -122.4294,
            specialties: strings(&["group-therapy", "mindfulness", "coping-skills"]),
        },
    ]
}

fn agent(
    id: &str,
    name: &str,
    state: AgentState,
    current_task: Option<&str>,
    response_time: f32,
    success_rate: f32,
) -> AgentStatus {
    AgentStatus {
        id: id.to_string(),
        name: name.to_string(),
        state,
        current_task: current_task.map(str::to_string),
        response_time,
        success_rate,
    }
}

fn fixture_agents() -> Vec<AgentStatus> {
    vec![
        agent(
            "1",
            "Crisis Assessment Agent",
            AgentState::Active,
            Some("Analyzing conversation patterns..."),
            0.8,
            94.2,
        ),
        agent(
            "2",
            "Resource Matching Agent",
            AgentState::Processing,
            Some("Finding nearby therapists..."),
            1.2,
            91.7,
        ),
        agent(
            "3",
            "Peer Connection Agent",
            AgentState::Active,
            Some("Matching with support peers..."),
            0.6,
            88.9,
        ),
        agent("4", "Emergency Escalation Agent", AgentState::Idle, None, 0.3, 99.1),
        agent(
            "5",
            "Progress Tracking Agent",
            AgentState::Active,
            Some("Updating mood analytics..."),
            1.0,
            92.5,
        ),
    ]
}
