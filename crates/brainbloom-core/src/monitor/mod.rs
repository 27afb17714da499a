//! Agent monitoring domain module.

mod model;

pub use model::{AgentState, AgentStatus, HEALTHY_SUCCESS_RATE, MonitorReport, SystemHealth};
