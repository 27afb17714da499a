//! Agent telemetry and the health assessment derived from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Success rate (percent) below which an agent degrades system health.
pub const HEALTHY_SUCCESS_RATE: f32 = 90.0;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AgentState {
    Active,
    Processing,
    Idle,
    Error,
}

/// Telemetry for one backend agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentStatus {
    pub id: String,
    pub name: String,
    #[serde(rename = "status")]
    pub state: AgentState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_task: Option<String>,
    /// Seconds
    pub response_time: f32,
    /// Percent
    pub success_rate: f32,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SystemHealth {
    Healthy,
    Warning,
    Critical,
}

impl SystemHealth {
    /// `critical` if any agent is in error, `warning` if any success rate is
    /// below [`HEALTHY_SUCCESS_RATE`], otherwise `healthy`.
    pub fn assess(agents: &[AgentStatus]) -> Self {
        if agents.iter().any(|a| a.state == AgentState::Error) {
            SystemHealth::Critical
        } else if agents.iter().any(|a| a.success_rate < HEALTHY_SUCCESS_RATE) {
            SystemHealth::Warning
        } else {
            SystemHealth::Healthy
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SystemHealth::Healthy => "All Systems Operational",
            SystemHealth::Warning => "Performance Issues Detected",
            SystemHealth::Critical => "Critical System Errors",
        }
    }
}

/// One poll of the agent fleet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorReport {
    pub agents: Vec<AgentStatus>,
    pub health: SystemHealth,
    /// Set when the poll failed; `agents` then holds the last good list
    pub error: Option<String>,
    pub polled_at: DateTime<Utc>,
}

impl MonitorReport {
    pub fn from_agents(agents: Vec<AgentStatus>) -> Self {
        Self {
            health: SystemHealth::assess(&agents),
            agents,
            error: None,
            polled_at: Utc::now(),
        }
    }

    /// A failed poll is always reported as critical.
    pub fn failed(previous: Vec<AgentStatus>, error: impl Into<String>) -> Self {
        Self {
            agents: previous,
            health: SystemHealth::Critical,
            error: Some(error.into()),
            polled_at: Utc::now(),
        }
    }

    pub fn count(&self, state: AgentState) -> usize {
        self.agents.iter().filter(|a| a.state == state).count()
    }
}
