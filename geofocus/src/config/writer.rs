//! INI serialization logic for converting `ConfigFile` → INI string.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[sources]
; GeoJSON feature collection URLs, comma separated, tried in order.
; A source that errors, times out, or returns a body without a
; "features" or "objects" array is skipped in favour of the next.
urls = {}

[cache]
; Seconds a fetched collection is served without refetching (default: 36000)
ttl_secs = {}
; What to do when every source fails after the cached copy expired:
;   serve_stale - keep serving the expired copy and log a warning
;   fail        - report the data as unavailable
stale_policy = {}

[download]
; Timeout in seconds for each source request (default: 30)
timeout = {}

[server]
; Address for 'geofocus serve' (default: 127.0.0.1:3000)
bind = {}

[focus]
; Camera altitude when focusing a country (default: 1.6)
altitude = {}
; Camera animation time in milliseconds (default: 1000)
duration_ms = {}
; Outer ring positions averaged for the focus point (default: 200)
max_points = {}
; Spin the globe while idle, and how fast (defaults: true, 0.6)
auto_rotate = {}
auto_rotate_speed = {}
; Allow zooming the globe (default: true)
enable_zoom = {}

[logging]
; Log file path (default: ~/.geofocus/geofocus.log)
file = {}
"#,
        config.sources.urls.join(", "),
        config.cache.ttl_secs,
        config.cache.stale_policy,
        config.download.timeout,
        config.server.bind,
        config.focus.altitude,
        config.focus.duration_ms,
        config.focus.max_points,
        config.focus.auto_rotate,
        config.focus.auto_rotate_speed,
        config.focus.enable_zoom,
        path_to_string(&config.logging.file),
    )
}

/// Convert path to string, collapsing home dir to ~.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;

    #[test]
    fn test_default_output_has_every_section() {
        let content = to_config_string(&ConfigFile::default());
        for section in [
            "[sources]",
            "[cache]",
            "[download]",
            "[server]",
            "[focus]",
            "[logging]",
        ] {
            assert!(content.contains(section), "missing {}", section);
        }
        assert!(content.contains("stale_policy = serve_stale"));
        assert!(content.contains(&format!("ttl_secs = {}", DEFAULT_TTL_SECS)));
    }

    #[test]
    fn test_log_file_collapses_home() {
        let content = to_config_string(&ConfigFile::default());
        if dirs::home_dir().is_some() {
            assert!(content.contains("file = ~/.geofocus/geofocus.log"));
        }
    }

    #[test]
    fn test_altitude_keeps_fraction() {
        let content = to_config_string(&ConfigFile::default());
        assert!(content.contains("altitude = 1.6"));
    }
}
