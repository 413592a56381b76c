//! # fetch-sweep
//!
//! Concurrent fan-out/fan-in URL fetch aggregation library.
//!
//! Given a list of URLs, fetch-sweep retrieves each one concurrently,
//! measures per-fetch latency and payload size, isolates per-fetch
//! failures so one bad URL cannot abort the others, and produces an
//! aggregated completion-order report plus a durable summary record.
//!
//! ## Design Philosophy
//!
//! fetch-sweep is designed to be:
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Failure-isolating** - Every input yields exactly one result line,
//!   success or failure; there are no silent drops and no batch-level
//!   failure state
//! - **Event-driven** - Consumers subscribe to events, no polling required
//! - **Unbounded by default** - Every URL gets its own task immediately,
//!   with an optional concurrency bound as a capacity knob
//!
//! ## Quick Start
//!
//! ```no_run
//! use fetch_sweep::{Config, FetchSweeper, Reporter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sweeper = FetchSweeper::new(Config::default())?;
//!
//!     // Subscribe to events
//!     let mut events = sweeper.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     let report = sweeper
//!         .sweep(["https://golang.org", "https://gopl.io"])
//!         .await;
//!
//!     // Print the report and persist the summary record
//!     let reporter = Reporter::new(sweeper.config());
//!     reporter.write_and_persist(&report, &mut std::io::stdout())?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Report rendering and durable summary persistence
pub mod report;
/// Core sweep engine (dispatch, fetch tasks, result collection)
pub mod sweeper;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use config::{Config, FetchConfig, ReportConfig};
pub use error::{Error, FetchError, Result};
pub use report::{Reporter, format_result, format_summary};
pub use sweeper::FetchSweeper;
pub use types::{BatchReport, Event, FetchOutcome, FetchRequest, FetchResult};
