//! Configuration types for fetch-sweep

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fetch behavior configuration (concurrency, client identity)
///
/// Groups settings related to how the sweep issues its requests.
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Maximum number of fetches in flight at once (None = unbounded)
    ///
    /// The default reproduces the classic unbounded fan-out: every input
    /// URL gets its own task immediately, and the runtime multiplexes
    /// them all. That is cheap for tens of URLs but can exhaust sockets
    /// and file descriptors for very large input lists — set a bound for
    /// production-scale sweeps. `Some(0)` is rejected by
    /// [`Config::validate`].
    #[serde(default)]
    pub max_concurrent: Option<usize>,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_concurrent: None,
            user_agent: default_user_agent(),
        }
    }
}

/// Report output configuration
///
/// Groups settings for the rendered report and the durable summary
/// record. Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Path of the durable summary record (default: "fetch_output.txt")
    ///
    /// Only the batch summary line is written here, truncating any prior
    /// content. The write is best-effort in the combined reporting path:
    /// a failure is logged, not propagated, because the report has
    /// already reached the primary output stream.
    #[serde(default = "default_summary_path")]
    pub summary_path: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            summary_path: default_summary_path(),
        }
    }
}

/// Main configuration for [`FetchSweeper`](crate::FetchSweeper)
///
/// Fields are organized into logical sub-configs:
/// - [`fetch`](FetchConfig) — concurrency bound, client identity
/// - [`report`](ReportConfig) — durable summary record
///
/// All sub-config fields are flattened for serialization, so the
/// JSON/TOML format stays flat (no nesting).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Fetch behavior settings (concurrency, client identity)
    #[serde(flatten)]
    pub fetch: FetchConfig,

    /// Report output settings (durable summary record)
    #[serde(flatten)]
    pub report: ReportConfig,
}

// Convenience accessors — allow call sites to use `config.max_concurrent()`
// etc. without reaching through the sub-config structs.
impl Config {
    /// Maximum number of fetches in flight at once (None = unbounded)
    pub fn max_concurrent(&self) -> Option<usize> {
        self.fetch.max_concurrent
    }

    /// Path of the durable summary record
    pub fn summary_path(&self) -> &PathBuf {
        &self.report.summary_path
    }

    /// Validate the configuration
    ///
    /// Returns an [`Error::Config`] naming the offending key when a
    /// setting is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.max_concurrent == Some(0) {
            return Err(Error::Config {
                message: "max_concurrent must be at least 1 when set".to_string(),
                key: Some("max_concurrent".to_string()),
            });
        }
        if self.report.summary_path.as_os_str().is_empty() {
            return Err(Error::Config {
                message: "summary_path must not be empty".to_string(),
                key: Some("summary_path".to_string()),
            });
        }
        Ok(())
    }
}

fn default_user_agent() -> String {
    concat!("fetch-sweep/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_summary_path() -> PathBuf {
    PathBuf::from("fetch_output.txt")
}
