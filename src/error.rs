//! Error types for fetch-sweep
//!
//! This module provides error handling for the library, including:
//! - The top-level [`Error`] type used by fallible library operations
//! - The [`FetchError`] sub-enum for per-fetch transport failures
//! - A [`Result`] alias used throughout the crate
//!
//! Per-fetch failures are a special case: they are never propagated as
//! `Err` across task boundaries. A fetch task renders its `FetchError`
//! into the `message` of a failed outcome, so one bad URL can never abort
//! its siblings or the surrounding sweep.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for fetch-sweep operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for fetch-sweep
///
/// This is the primary error type used by the library's fallible entry
/// points (construction, configuration validation, report writing).
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "max_concurrent")
        key: Option<String>,
    },

    /// HTTP client construction or transport error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Per-fetch failure, as carried inside a failed outcome's message
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// I/O error writing the report to the primary output stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Durable summary write failed
    ///
    /// The combined reporting path logs and swallows this variant, since
    /// the report has already reached the primary stream by the time the
    /// summary is persisted. Callers invoking the persistence step
    /// directly receive it as an ordinary error.
    #[error("failed to persist summary to {path}: {source}")]
    Persistence {
        /// The summary file path that could not be written
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },
}

/// Per-fetch transport failures
///
/// The `Display` output of each variant is exactly the text that appears
/// as a failed result's report line, so the two variants define the only
/// failure line shapes the reporter can emit.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be established or returned a transport error.
    ///
    /// Displays as the raw underlying error text, which names the URL.
    #[error("{0}")]
    Connect(#[source] reqwest::Error),

    /// The request succeeded but the response body could not be fully drained
    #[error("while reading {url}: {source}")]
    BodyRead {
        /// The URL whose body failed mid-stream
        url: String,
        /// The underlying transport error
        source: reqwest::Error,
    },
}
