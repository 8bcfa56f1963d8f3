//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::centroid::CentroidEstimator;
use crate::focus::{FocusConfig, GlobeControls};
use crate::provider::GeoSource;
use crate::service::StalePolicy;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub sources: SourcesSettings,
    pub cache: CacheSettings,
    pub download: DownloadSettings,
    pub server: ServerSettings,
    pub focus: FocusSettings,
    pub logging: LoggingSettings,
}

/// Remote GeoJSON sources.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcesSettings {
    /// Source URLs in priority order.
    pub urls: Vec<String>,
}

/// Feature collection cache.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheSettings {
    /// Seconds a fetched collection stays fresh.
    pub ttl_secs: u64,
    /// Behaviour when every source fails after the entry expired.
    pub stale_policy: StalePolicy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DownloadSettings {
    /// Timeout in seconds for each source fetch.
    pub timeout: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub bind: SocketAddr,
}

/// Camera focus behaviour.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusSettings {
    pub altitude: f64,
    pub duration_ms: u64,
    /// Ring positions averaged for the focus point.
    pub max_points: usize,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f64,
    pub enable_zoom: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub file: PathBuf,
}

impl ConfigFile {
    /// Sources in priority order.
    ///
    /// URLs matching a built-in source keep its name; others are named
    /// after their file name.
    pub fn geo_sources(&self) -> Vec<GeoSource> {
        let builtin = GeoSource::defaults();
        self.sources
            .urls
            .iter()
            .map(|url| {
                builtin
                    .iter()
                    .find(|s| &s.url == url)
                    .cloned()
                    .unwrap_or_else(|| GeoSource::from_url(url.as_str()))
            })
            .collect()
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_secs)
    }

    pub fn focus_config(&self) -> FocusConfig {
        FocusConfig {
            altitude: self.focus.altitude,
            transition: Duration::from_millis(self.focus.duration_ms),
            controls: GlobeControls {
                auto_rotate: self.focus.auto_rotate,
                auto_rotate_speed: self.focus.auto_rotate_speed,
                enable_zoom: self.focus.enable_zoom,
            },
        }
    }

    pub fn estimator(&self) -> CentroidEstimator {
        CentroidEstimator::new(self.focus.max_points)
    }
}
