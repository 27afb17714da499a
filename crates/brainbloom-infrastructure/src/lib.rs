//! Infrastructure layer for BrainBloom.
//!
//! Everything here touches the outside world: the filesystem (paths,
//! configuration, stored identity) and the mock backend that stands in for
//! the reply, directory and telemetry services.

pub mod config_service;
pub mod identity_store;
pub mod mock_api;
pub mod paths;
pub mod storage;

pub use config_service::ConfigService;
pub use identity_store::FileIdentityStore;
pub use mock_api::{MockApiService, MockDelays};
pub use paths::{BloomPaths, HOME_ENV, PathError};
