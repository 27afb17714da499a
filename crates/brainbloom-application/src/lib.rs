//! Application layer for BrainBloom.
//!
//! This crate wires domain services to their infrastructure collaborators
//! and runs the background work front-ends share, such as agent polling.

pub mod agent_monitor;
pub mod app_context;

pub use agent_monitor::{AgentMonitor, MonitorHandle};
pub use app_context::{AppContext, Backend};
