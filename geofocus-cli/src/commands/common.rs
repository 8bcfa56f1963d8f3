//! Common types and utilities shared across CLI commands.

use std::path::Path;

use clap::Args;
use geofocus::config::{config_file_path, ConfigFile, ConfigFileError};
use geofocus::logging::{init_logging, ConsoleTarget, LoggingGuard, DEFAULT_FILTER};
use geofocus::provider::{AsyncReqwestClient, GeoDataProvider};
use geofocus::service::{CountryService, StalePolicy};

use crate::error::CliError;

/// Data source flags shared by commands that fetch the collection.
///
/// Each flag overrides the matching config file value when given.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Source URL, repeatable; replaces [sources] urls
    #[arg(long = "source", value_name = "URL")]
    pub sources: Vec<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Cache time-to-live in seconds
    #[arg(long, value_name = "SECS")]
    pub ttl: Option<u64>,

    /// Behaviour when all sources fail after the cache expired
    #[arg(long, value_name = "POLICY", value_parser = parse_stale_policy)]
    pub stale_policy: Option<StalePolicy>,
}

impl SourceArgs {
    /// Overlays the flags onto `config`.
    pub fn apply(&self, config: &mut ConfigFile) -> Result<(), CliError> {
        if !self.sources.is_empty() {
            config.sources.urls = self.sources.clone();
        }
        if let Some(timeout) = self.timeout {
            config.download.timeout = positive("download", "timeout", timeout)?;
        }
        if let Some(ttl) = self.ttl {
            config.cache.ttl_secs = positive("cache", "ttl_secs", ttl)?;
        }
        if let Some(policy) = self.stale_policy {
            config.cache.stale_policy = policy;
        }
        Ok(())
    }
}

fn parse_stale_policy(s: &str) -> Result<StalePolicy, String> {
    s.parse()
}

fn positive(section: &str, key: &str, value: u64) -> Result<u64, CliError> {
    if value == 0 {
        return Err(CliError::Config(ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: "must be a positive integer".to_string(),
        }));
    }
    Ok(value)
}

/// Loads the config file at `path`, or the default location.
pub fn load_config(path: Option<&Path>) -> Result<ConfigFile, CliError> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(config_file_path);
    Ok(ConfigFile::load_from(&path)?)
}

/// How a command uses the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// Long-running process; progress is logged to stdout.
    Service,
    /// stdout is the command's result, so only warnings are shown and
    /// they go to stderr.
    OneShot,
}

impl LogMode {
    pub fn default_filter(self) -> &'static str {
        match self {
            LogMode::Service => DEFAULT_FILTER,
            LogMode::OneShot => "warn",
        }
    }

    pub fn console(self) -> ConsoleTarget {
        match self {
            LogMode::Service => ConsoleTarget::Stdout,
            LogMode::OneShot => ConsoleTarget::Stderr,
        }
    }
}

/// Starts logging to the configured file and the console.
pub fn start_logging(config: &ConfigFile, mode: LogMode) -> Result<LoggingGuard, CliError> {
    init_logging(&config.logging.file, mode.default_filter(), mode.console())
        .map_err(CliError::LoggingInit)
}

/// Builds the lookup service described by `config`.
pub fn build_service(config: &ConfigFile) -> Result<CountryService<AsyncReqwestClient>, CliError> {
    let client =
        AsyncReqwestClient::with_timeout(config.download.timeout).map_err(CliError::HttpClient)?;
    let provider = GeoDataProvider::with_ttl(client, config.geo_sources(), config.ttl());

    Ok(CountryService::new(provider)
        .with_policy(config.cache.stale_policy)
        .with_estimator(config.estimator()))
}

/// Creates the multi-threaded runtime used by async commands.
pub fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new().map_err(CliError::Runtime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overrides() {
        let mut config = ConfigFile::default();
        let args = SourceArgs {
            sources: vec!["https://mirror.test/world.geojson".to_string()],
            timeout: Some(5),
            ttl: Some(60),
            stale_policy: Some(StalePolicy::Fail),
        };

        args.apply(&mut config).unwrap();

        assert_eq!(config.sources.urls, vec!["https://mirror.test/world.geojson"]);
        assert_eq!(config.download.timeout, 5);
        assert_eq!(config.cache.ttl_secs, 60);
        assert_eq!(config.cache.stale_policy, StalePolicy::Fail);
    }

    #[test]
    fn test_no_flags_keep_file_values() {
        let mut config = ConfigFile::default();
        SourceArgs::default().apply(&mut config).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = ConfigFile::default();
        let args = SourceArgs {
            timeout: Some(0),
            ..SourceArgs::default()
        };
        assert!(matches!(args.apply(&mut config), Err(CliError::Config(_))));
    }

    #[test]
    fn test_load_config_missing_file_gives_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = load_config(Some(&temp.path().join("none.ini"))).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_one_shot_logs_keep_stdout_clean() {
        assert_eq!(LogMode::OneShot.console(), ConsoleTarget::Stderr);
        assert_eq!(LogMode::OneShot.default_filter(), "warn");
        assert_eq!(LogMode::Service.console(), ConsoleTarget::Stdout);
        assert_eq!(LogMode::Service.default_filter(), DEFAULT_FILTER);
    }

    #[test]
    fn test_build_service_uses_config() {
        let mut config = ConfigFile::default();
        config.cache.stale_policy = StalePolicy::Fail;
        config.cache.ttl_secs = 90;

        let service = build_service(&config).unwrap();
        assert_eq!(service.policy(), StalePolicy::Fail);
        assert_eq!(service.provider().ttl().as_secs(), 90);
        assert_eq!(service.provider().sources().len(), 2);
    }
}
