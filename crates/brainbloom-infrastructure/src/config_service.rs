//! Configuration loading from `config.toml`.

use crate::paths::BloomPaths;
use crate::storage::{AtomicFile, FileFormat};
use brainbloom_core::Result;
use brainbloom_core::config::RootConfig;
use std::sync::{Arc, RwLock};

/// Loads [`RootConfig`] and caches it after the first read.
///
/// A missing file is created with default values so users have something to
/// edit.
#[derive(Clone)]
pub struct ConfigService {
    file: Arc<AtomicFile<RootConfig>>,
    cached: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    pub fn new(paths: &BloomPaths) -> Self {
        Self {
            file: Arc::new(AtomicFile::new(paths.config_file(), FileFormat::Toml)),
            cached: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the configuration, reading (or creating) the file on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, does not parse, or holds
    /// invalid values.
    pub fn load(&self) -> Result<RootConfig> {
        if let Some(cached) = self.cached.read().ok().and_then(|c| c.as_ref().cloned()) {
            return Ok(cached);
        }

        let config = match self.file.load()? {
            Some(config) => config,
            None => {
                let config = RootConfig::default();
                self.file.save(&config)?;
                tracing::info!(
                    path = %self.file.path().display(),
                    "[ConfigService] Created default config"
                );
                config
            }
        };
        config.validate()?;

        if let Ok(mut cached) = self.cached.write() {
            *cached = Some(config.clone());
        }
        Ok(config)
    }

    /// Validates and persists `config`, replacing the cached copy.
    pub fn save(&self, config: &RootConfig) -> Result<()> {
        config.validate()?;
        self.file.save(config)?;
        if let Ok(mut cached) = self.cached.write() {
            *cached = Some(config.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_created_with_defaults() {
        let dir = TempDir::new().unwrap();
        let paths = BloomPaths::new(Some(dir.path())).unwrap();
        let service = ConfigService::new(&paths);

        let config = service.load().unwrap();

        assert_eq!(config, RootConfig::default());
        assert!(paths.config_file().exists());
    }

    #[test]
    fn test_existing_config_is_read() {
        let dir = TempDir::new().unwrap();
        let paths = BloomPaths::new(Some(dir.path())).unwrap();
        std::fs::write(
            paths.config_file(),
            "log_level = \"debug\"\n[monitor]\npoll_interval_secs = 2\n",
        )
        .unwrap();

        let config = ConfigService::new(&paths).load().unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.monitor.poll_interval_secs, 2);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let dir = TempDir::new().unwrap();
        let paths = BloomPaths::new(Some(dir.path())).unwrap();
        std::fs::write(paths.config_file(), "[monitor]\npoll_interval_secs = 0\n").unwrap();

        let err = ConfigService::new(&paths).load().unwrap_err();
        assert!(err.to_string().contains("poll_interval_secs"));
    }

    #[test]
    fn test_save_then_load_uses_cache() {
        let dir = TempDir::new().unwrap();
        let paths = BloomPaths::new(Some(dir.path())).unwrap();
        let service = ConfigService::new(&paths);

        let mut config = RootConfig::default();
        config.chat.reply_timeout_secs = Some(15);
        service.save(&config).unwrap();

        assert_eq!(service.load().unwrap().chat.reply_timeout_secs, Some(15));
        assert_eq!(
            ConfigService::new(&paths).load().unwrap().chat.reply_timeout_secs,
            Some(15)
        );
    }
}
