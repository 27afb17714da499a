//! Unified path management for BrainBloom files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/brainbloom/        # Base directory (or $BRAINBLOOM_HOME)
//! ├── config.toml              # Application configuration
//! ├── identity.json            # Signed-in user and token
//! └── logs/                    # Application logs
//!     └── brainbloom.log.YYYY-MM-DD
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the base directory.
pub const HOME_ENV: &str = "BRAINBLOOM_HOME";

const APP_DIR_NAME: &str = "brainbloom";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for brainbloom_core::BloomError {
    fn from(err: PathError) -> Self {
        brainbloom_core::BloomError::config(err.to_string())
    }
}

/// Resolved locations of every file BrainBloom reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloomPaths {
    base_dir: PathBuf,
}

impl BloomPaths {
    /// Resolves the base directory.
    ///
    /// Precedence: explicit `base_dir`, then `$BRAINBLOOM_HOME`, then
    /// `<platform config dir>/brainbloom`.
    pub fn new(base_dir: Option<&Path>) -> Result<Self, PathError> {
        Self::resolve(base_dir, std::env::var_os(HOME_ENV), dirs::config_dir())
    }

    /// Applies the precedence to already-read inputs. An empty `env_home`
    /// counts as unset.
    fn resolve(
        explicit: Option<&Path>,
        env_home: Option<OsString>,
        platform_config_dir: Option<PathBuf>,
    ) -> Result<Self, PathError> {
        let base_dir = match (explicit, env_home) {
            (Some(dir), _) => dir.to_path_buf(),
            (None, Some(dir)) if !dir.is_empty() => PathBuf::from(dir),
            _ => platform_config_dir
                .ok_or(PathError::ConfigDirNotFound)?
                .join(APP_DIR_NAME),
        };
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path to config.toml
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.toml")
    }

    /// Path to identity.json
    ///
    /// # Security Note
    ///
    /// Holds the auth token; written with 600 permissions on Unix.
    pub fn identity_file(&self) -> PathBuf {
        self.base_dir.join("identity.json")
    }

    /// Directory for rolling log files
    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_base_dir_wins() {
        let paths = BloomPaths::new(Some(Path::new("/tmp/bloom-test"))).unwrap();
        assert_eq!(paths.base_dir(), Path::new("/tmp/bloom-test"));
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/bloom-test/config.toml"));
        assert_eq!(paths.identity_file(), PathBuf::from("/tmp/bloom-test/identity.json"));
        assert_eq!(paths.logs_dir(), PathBuf::from("/tmp/bloom-test/logs"));
    }

    #[test]
    fn test_explicit_dir_beats_env() {
        let paths = BloomPaths::resolve(
            Some(Path::new("/from/flag")),
            Some(OsString::from("/from/env")),
            Some(PathBuf::from("/platform")),
        )
        .unwrap();
        assert_eq!(paths.base_dir(), Path::new("/from/flag"));
    }

    #[test]
    fn test_env_home_beats_platform_dir() {
        let paths = BloomPaths::resolve(
            None,
            Some(OsString::from("/from/env")),
            Some(PathBuf::from("/platform")),
        )
        .unwrap();
        assert_eq!(paths.base_dir(), Path::new("/from/env"));
    }

    #[test]
    fn test_empty_env_home_falls_through_to_platform_dir() {
        let paths =
            BloomPaths::resolve(None, Some(OsString::new()), Some(PathBuf::from("/platform")))
                .unwrap();
        assert_eq!(paths.base_dir(), Path::new("/platform/brainbloom"));

        let unset = BloomPaths::resolve(None, None, Some(PathBuf::from("/platform"))).unwrap();
        assert_eq!(unset.base_dir(), Path::new("/platform/brainbloom"));
    }

    #[test]
    fn test_missing_platform_dir_is_an_error() {
        let err = BloomPaths::resolve(None, None, None).unwrap_err();
        assert!(matches!(err, PathError::ConfigDirNotFound));
    }
}
