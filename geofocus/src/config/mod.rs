//! User configuration.
//!
//! GeoFocus reads `~/.geofocus/config.ini`. A missing file means defaults;
//! command-line flags override whatever the file says.
//!
//! # Example
//!
//! ```
//! use geofocus::config::ConfigFile;
//!
//! let config = ConfigFile::default();
//! assert_eq!(config.geo_sources()[0].name, "geo-countries");
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{
    default_log_file, DEFAULT_DOWNLOAD_TIMEOUT_SECS, DEFAULT_FOCUS_DURATION_MS,
    DEFAULT_LOG_FILE_NAME, DEFAULT_SERVER_BIND, DEFAULT_SERVER_PORT, DEFAULT_TTL_SECS,
};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    CacheSettings, ConfigFile, DownloadSettings, FocusSettings, LoggingSettings, ServerSettings,
    SourcesSettings,
};
