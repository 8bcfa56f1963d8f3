//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use std::path::PathBuf;

use ini::Ini;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [sources] section
    if let Some(section) = ini.section(Some("sources")) {
        if let Some(v) = section.get("urls") {
            let urls: Vec<String> = v
                .split(',')
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(str::to_string)
                .collect();
            if urls.is_empty() {
                return Err(ConfigFileError::invalid(
                    "sources",
                    "urls",
                    v,
                    "must list at least one URL",
                ));
            }
            if let Some(bad) = urls
                .iter()
                .find(|u| !(u.starts_with("http://") || u.starts_with("https://")))
            {
                return Err(ConfigFileError::invalid(
                    "sources",
                    "urls",
                    bad,
                    "must be an http or https URL",
                ));
            }
            config.sources.urls = urls;
        }
    }

    // [cache] section
    if let Some(section) = ini.section(Some("cache")) {
        if let Some(v) = section.get("ttl_secs") {
            config.cache.ttl_secs = parse_positive(v, "cache", "ttl_secs", "seconds")?;
        }
        if let Some(v) = section.get("stale_policy") {
            config.cache.stale_policy = v.parse().map_err(|_| {
                ConfigFileError::invalid(
                    "cache",
                    "stale_policy",
                    v,
                    "must be 'serve_stale' or 'fail'",
                )
            })?;
        }
    }

    // [download] section
    if let Some(section) = ini.section(Some("download")) {
        if let Some(v) = section.get("timeout") {
            config.download.timeout = parse_positive(v, "download", "timeout", "seconds")?;
        }
    }

    // [server] section
    if let Some(section) = ini.section(Some("server")) {
        if let Some(v) = section.get("bind") {
            config.server.bind = v.trim().parse().map_err(|_| {
                ConfigFileError::invalid(
                    "server",
                    "bind",
                    v,
                    "expected an address like '127.0.0.1:3000'",
                )
            })?;
        }
    }

    // [focus] section
    if let Some(section) = ini.section(Some("focus")) {
        if let Some(v) = section.get("altitude") {
            let altitude: f64 = v.trim().parse().map_err(|_| {
                ConfigFileError::invalid("focus", "altitude", v, "must be a positive number")
            })?;
            if !(altitude.is_finite() && altitude > 0.0) {
                return Err(ConfigFileError::invalid(
                    "focus",
                    "altitude",
                    v,
                    "must be a positive number",
                ));
            }
            config.focus.altitude = altitude;
        }
        if let Some(v) = section.get("duration_ms") {
            config.focus.duration_ms = v.trim().parse().map_err(|_| {
                ConfigFileError::invalid(
                    "focus",
                    "duration_ms",
                    v,
                    "must be a non-negative integer (milliseconds)",
                )
            })?;
        }
        if let Some(v) = section.get("max_points") {
            config.focus.max_points = parse_positive(v, "focus", "max_points", "points")? as usize;
        }
        if let Some(v) = section.get("auto_rotate") {
            config.focus.auto_rotate = parse_bool(v);
        }
        if let Some(v) = section.get("auto_rotate_speed") {
            config.focus.auto_rotate_speed = match v.trim().parse::<f64>() {
                Ok(speed) if speed.is_finite() && speed >= 0.0 => speed,
                _ => {
                    return Err(ConfigFileError::invalid(
                        "focus",
                        "auto_rotate_speed",
                        v,
                        "must be a non-negative number",
                    ))
                }
            };
        }
        if let Some(v) = section.get("enable_zoom") {
            config.focus.enable_zoom = parse_bool(v);
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

fn parse_positive(v: &str, section: &str, key: &str, unit: &str) -> Result<u64, ConfigFileError> {
    let reason = format!("must be a positive integer ({})", unit);
    match v.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigFileError::invalid(section, key, v, &reason)),
    }
}

/// Lenient boolean: `true`, `1`, `yes` and `on` in any case; anything else is false.
pub(super) fn parse_bool(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    v == "true" || v == "1" || v == "yes" || v == "on"
}

/// Expand a leading `~/` to the home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
