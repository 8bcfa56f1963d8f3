//! Default values for all configuration settings.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use super::file::config_directory;
use super::settings::*;
use crate::cache::DEFAULT_TTL;
use crate::centroid::DEFAULT_MAX_POINTS;
use crate::focus::{GlobeControls, DEFAULT_FOCUS_ALTITUDE, DEFAULT_FOCUS_TRANSITION};
use crate::provider::{GeoSource, DEFAULT_TIMEOUT_SECS};
use crate::service::StalePolicy;

/// Default cache time-to-live in seconds (10 hours).
pub const DEFAULT_TTL_SECS: u64 = DEFAULT_TTL.as_secs();

/// Default source fetch timeout in seconds.
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = DEFAULT_TIMEOUT_SECS;

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Default server bind address (loopback only).
pub const DEFAULT_SERVER_BIND: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_SERVER_PORT);

/// Default focus animation time in milliseconds.
pub const DEFAULT_FOCUS_DURATION_MS: u64 = DEFAULT_FOCUS_TRANSITION.as_millis() as u64;

/// Default log file name inside the config directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "geofocus.log";

/// Default log file path (~/.geofocus/geofocus.log).
pub fn default_log_file() -> PathBuf {
    config_directory().join(DEFAULT_LOG_FILE_NAME)
}

impl Default for ConfigFile {
    fn default() -> Self {
        let controls = GlobeControls::default();
        Self {
            sources: SourcesSettings {
                urls: GeoSource::defaults().into_iter().map(|s| s.url).collect(),
            },
            cache: CacheSettings {
                ttl_secs: DEFAULT_TTL_SECS,
                stale_policy: StalePolicy::default(),
            },
            download: DownloadSettings {
                timeout: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
            },
            server: ServerSettings {
                bind: DEFAULT_SERVER_BIND,
            },
            focus: FocusSettings {
                altitude: DEFAULT_FOCUS_ALTITUDE,
                duration_ms: DEFAULT_FOCUS_DURATION_MS,
                max_points: DEFAULT_MAX_POINTS,
                auto_rotate: controls.auto_rotate,
                auto_rotate_speed: controls.auto_rotate_speed,
                enable_zoom: controls.enable_zoom,
            },
            logging: LoggingSettings {
                file: default_log_file(),
            },
        }
    }
}
