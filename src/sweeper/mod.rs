//! Core sweep engine — concurrent fan-out of fetch tasks and fan-in of
//! their results.
//!
//! The engine is organized by phase:
//! - `task` - Single-fetch execution (one request, one result)
//! - dispatch - One spawned task per input URL, optional concurrency gate
//! - collect - Exactly-N drain of the shared result channel
//!
//! Rendering and persistence live in [`crate::report`]; the engine only
//! produces the [`BatchReport`].

mod task;


use crate::config::Config;
use crate::error::Result;
use crate::types::{BatchReport, Event, FetchOutcome, FetchRequest, FetchResult};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{broadcast, mpsc};

/// Buffer size of the event broadcast channel
///
/// Allows multiple subscribers to receive all events independently; a
/// subscriber that falls more than this far behind sees a lag error.
const EVENT_CHANNEL_CAPACITY: usize = 1000;

/// Concurrent fetch aggregator (cloneable - all fields are cheaply shared)
///
/// Fans out one task per input URL, measures per-fetch latency and payload
/// size, and fans the results back in over a shared channel. Per-fetch
/// failures are isolated: a bad URL becomes a failed result, never an
/// error that aborts its siblings.
#[derive(Clone)]
pub struct FetchSweeper {
    /// Shared HTTP client (internally pooled, safe to clone across tasks)
    client: reqwest::Client,
    /// Event broadcast channel sender (multiple subscribers supported)
    event_tx: broadcast::Sender<Event>,
    /// Configuration (wrapped in Arc for sharing across tasks)
    config: Arc<Config>,
}

impl FetchSweeper {
    /// Create a new FetchSweeper instance
    ///
    /// Validates the configuration, builds the shared HTTP client, and
    /// sets up the event broadcast channel.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .user_agent(config.fetch.user_agent.as_str())
            .build()?;

        let (event_tx, _rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok(Self {
            client,
            event_tx,
            config: Arc::new(config),
        })
    }

    /// The configuration this sweeper was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Subscribe to sweep events
    ///
    /// Each subscriber receives the full event stream independently.
    /// Subscribe before calling [`sweep`](Self::sweep) to observe a
    /// batch from its first [`Event::Started`].
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Fetch every input concurrently and aggregate the results
    ///
    /// Spawns one task per input URL (gated by
    /// [`max_concurrent`](crate::config::FetchConfig::max_concurrent) when
    /// set), then blocks until all of them have reported. Results arrive
    /// in completion order, which is non-deterministic across runs; the
    /// batch elapsed time spans from dispatch to the last arrival.
    ///
    /// There is no cancellation or timeout: a fetch that hangs keeps its
    /// sweep waiting indefinitely. Failures never do — a task that cannot
    /// connect or drain its body reports a failed result and terminates.
    pub async fn sweep<I>(&self, requests: I) -> BatchReport
    where
        I: IntoIterator,
        I::Item: Into<FetchRequest>,
    {
        let requests: Vec<FetchRequest> = requests.into_iter().map(Into::into).collect();
        let total = requests.len();
        let start = Instant::now();

        // Many senders, one receiver; capacity `total` means a send can
        // never block, since each task sends exactly once.
        let (result_tx, mut result_rx) = mpsc::channel::<FetchResult>(total.max(1));
        let gate = self
            .config
            .fetch
            .max_concurrent
            .map(|permits| Arc::new(tokio::sync::Semaphore::new(permits)));

        tracing::debug!(total, bounded = gate.is_some(), "dispatching fetch tasks");

        for request in requests {
            let client = self.client.clone();
            let result_tx = result_tx.clone();
            let event_tx = self.event_tx.clone();
            let gate = gate.clone();

            tokio::spawn(async move {
                // Hold the permit for the task's whole fetch; the timer
                // starts after acquisition so queue wait is not billed
                // to the fetch.
                let _permit = match gate {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };

                let _ = event_tx.send(Event::Started {
                    url: request.url().to_string(),
                });

                let result = task::fetch_one(&client, &request).await;

                match result.outcome() {
                    FetchOutcome::Success { bytes } => {
                        tracing::debug!(url = %result.url(), bytes, "fetch complete");
                        let _ = event_tx.send(Event::Fetched {
                            url: result.url().to_string(),
                            bytes: *bytes,
                            elapsed_secs: result.elapsed().as_secs_f64(),
                        });
                    }
                    FetchOutcome::Failed { message } => {
                        tracing::warn!(message = %message, "fetch failed");
                        let _ = event_tx.send(Event::FetchFailed {
                            message: message.clone(),
                            elapsed_secs: result.elapsed().as_secs_f64(),
                        });
                    }
                }

                let _ = result_tx.send(result).await;
            });
        }
        drop(result_tx);

        // Fan-in barrier: exactly `total` receives, in completion order.
        // Every task sends exactly one result, so the early-close arm only
        // fires if a task is externally aborted; a short report beats a
        // hung collector in that case.
        tracing::debug!(total, "collecting results");
        let mut results = Vec::with_capacity(total);
        while results.len() < total {
            match result_rx.recv().await {
                Some(result) => results.push(result),
                None => break,
            }
        }

        let elapsed = start.elapsed();
        let _ = self.event_tx.send(Event::SweepComplete {
            count: results.len(),
            elapsed_secs: elapsed.as_secs_f64(),
        });
        tracing::debug!(
            count = results.len(),
            elapsed_secs = elapsed.as_secs_f64(),
            "sweep complete"
        );

        BatchReport::new(results, elapsed)
    }
}
