//! Provider error types.

use thiserror::Error;

/// Failure of a single source fetch.
///
/// A `SourceError` is always recovered locally by moving on to the next
/// configured source. It only reaches callers wrapped in
/// [`DataUnavailable`] once every source has failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    /// Transport failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The source answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The body could not be parsed as JSON.
    #[error("Invalid JSON from {url}: {reason}")]
    InvalidJson { url: String, reason: String },

    /// The body parsed but has neither a `features` nor an `objects` array.
    #[error("Payload from {url} has no `features` or `objects` array")]
    MissingCollection { url: String },
}

/// No feature collection could be produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataUnavailable {
    /// Every configured source failed; `last` is the final failure seen.
    #[error("All {attempts} geo data sources failed, last error: {last}")]
    AllSourcesFailed { attempts: usize, last: SourceError },

    /// The provider was built with an empty source list.
    #[error("No geo data sources configured")]
    NoSources,

    /// The background refresh task panicked or was aborted.
    #[error("Refresh task did not complete: {0}")]
    RefreshAborted(String),
}
