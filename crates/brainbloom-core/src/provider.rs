//! Read-only data provider traits.
//!
//! Each provider returns a fixed-shape list; the core never writes back.

use crate::directory::{GeoLocation, PeerProfile, Resource};
use crate::error::Result;
use crate::monitor::AgentStatus;
use async_trait::async_trait;

/// Supplies peer supporters for matching.
#[async_trait]
pub trait PeerProvider: Send + Sync {
    async fn peers(&self) -> Result<Vec<PeerProfile>>;
}

/// Supplies support resources near a location.
#[async_trait]
pub trait ResourceProvider: Send + Sync {
    /// # Arguments
    ///
    /// * `location` - Where to search; `None` lets the provider pick
    async fn resources(&self, location: Option<GeoLocation>) -> Result<Vec<Resource>>;
}

/// Supplies live agent telemetry.
#[async_trait]
pub trait AgentStatusProvider: Send + Sync {
    async fn agent_statuses(&self) -> Result<Vec<AgentStatus>>;
}
