//! Stale-data policy.

use std::fmt;
use std::str::FromStr;

/// What to do with an expired cache entry when every source fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StalePolicy {
    /// Report the data as unavailable.
    Fail,
    /// Serve the expired entry and log a warning.
    #[default]
    ServeStale,
}

impl StalePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            StalePolicy::Fail => "fail",
            StalePolicy::ServeStale => "serve_stale",
        }
    }
}

impl fmt::Display for StalePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StalePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "fail" => Ok(StalePolicy::Fail),
            "serve_stale" | "stale" => Ok(StalePolicy::ServeStale),
            other => Err(format!(
                "unknown stale policy '{}' (expected fail or serve_stale)",
                other
            )),
        }
    }
}
