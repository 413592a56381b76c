//! Core types for fetch-sweep

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single resource identifier to fetch
///
/// The wrapped string is taken as-is: no validation, no normalization.
/// A malformed identifier still produces exactly one result — the fetch
/// task converts the transport error into a failed outcome.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FetchRequest(String);

impl FetchRequest {
    /// Create a new FetchRequest
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// The resource identifier as given
    pub fn url(&self) -> &str {
        &self.0
    }
}

impl From<String> for FetchRequest {
    fn from(url: String) -> Self {
        Self(url)
    }
}

impl From<&str> for FetchRequest {
    fn from(url: &str) -> Self {
        Self(url.to_string())
    }
}

impl std::fmt::Display for FetchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of one fetch
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FetchOutcome {
    /// The body was fully drained
    Success {
        /// Number of body bytes drained (content is not retained)
        bytes: u64,
    },
    /// The fetch failed at connect time or mid-stream
    Failed {
        /// Descriptive failure text; this is the exact report line
        message: String,
    },
}

/// The result of one fetch task
///
/// Exactly one `FetchResult` exists per [`FetchRequest`]. Ownership moves
/// from the fetch task to the collector over the result channel; nothing
/// is shared.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResult {
    url: String,
    elapsed: Duration,
    outcome: FetchOutcome,
}

impl FetchResult {
    /// Build a successful result
    pub fn success(request: &FetchRequest, elapsed: Duration, bytes: u64) -> Self {
        Self {
            url: request.url().to_string(),
            elapsed,
            outcome: FetchOutcome::Success { bytes },
        }
    }

    /// Build a failed result
    ///
    /// The message must be self-describing: failure report lines are the
    /// message verbatim, with no separate URL column.
    pub fn failed(request: &FetchRequest, elapsed: Duration, message: impl Into<String>) -> Self {
        Self {
            url: request.url().to_string(),
            elapsed,
            outcome: FetchOutcome::Failed {
                message: message.into(),
            },
        }
    }

    /// The originating resource identifier
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Wall-clock time for this single fetch, start to drain completion
    /// (or to the failure point)
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// The outcome of the fetch
    pub fn outcome(&self) -> &FetchOutcome {
        &self.outcome
    }

    /// Whether the body was fully drained
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, FetchOutcome::Success { .. })
    }
}

/// Aggregated output of one sweep
///
/// Results appear in arrival (completion) order, which is non-deterministic
/// across runs. The batch elapsed time spans from dispatch start to the
/// collector's last receive, so it is always at least the slowest single
/// fetch. Constructed once per sweep and consumed by the reporter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    results: Vec<FetchResult>,
    elapsed: Duration,
}

impl BatchReport {
    /// Assemble a report from collected results and the batch elapsed time
    pub fn new(results: Vec<FetchResult>, elapsed: Duration) -> Self {
        Self { results, elapsed }
    }

    /// Collected results in arrival order
    pub fn results(&self) -> &[FetchResult] {
        &self.results
    }

    /// Wall-clock time for the whole batch
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of collected results
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the sweep had no inputs
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Event emitted during a sweep
///
/// Consumers subscribe via [`FetchSweeper::subscribe`](crate::FetchSweeper::subscribe);
/// events are broadcast, so multiple subscribers each see the full stream.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A fetch task has started its request
    Started {
        /// The resource identifier being fetched
        url: String,
    },

    /// A fetch completed and its body was fully drained
    Fetched {
        /// The resource identifier that was fetched
        url: String,
        /// Number of body bytes drained
        bytes: u64,
        /// Per-fetch elapsed time in seconds
        elapsed_secs: f64,
    },

    /// A fetch failed at connect time or mid-stream
    FetchFailed {
        /// Descriptive failure text (names the URL)
        message: String,
        /// Elapsed time up to the failure point, in seconds
        elapsed_secs: f64,
    },

    /// All results for the batch have been collected
    SweepComplete {
        /// Number of results collected
        count: usize,
        /// Whole-batch elapsed time in seconds
        elapsed_secs: f64,
    },
}
