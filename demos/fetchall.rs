//! Concurrent fetch demo
//!
//! This demo exercises the core functionality of fetch-sweep:
//! - Creating a sweeper instance
//! - Subscribing to events
//! - Sweeping the URLs given on the command line
//! - Printing the report and persisting the summary record
//!
//! Run with:
//!
//! ```bash
//! cargo run --example fetchall -- https://golang.org https://gopl.io
//! ```

use fetch_sweep::{Config, Event, FetchSweeper, Reporter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    let urls: Vec<String> = std::env::args().skip(1).collect();

    let sweeper = FetchSweeper::new(Config::default())?;

    // Subscribe to events
    let mut events = sweeper.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                Event::Started { url } => {
                    eprintln!("→ fetching {}", url);
                }
                Event::Fetched {
                    url,
                    bytes,
                    elapsed_secs,
                } => {
                    eprintln!("✓ {} ({} bytes in {:.2}s)", url, bytes, elapsed_secs);
                }
                Event::FetchFailed { message, .. } => {
                    eprintln!("✗ {}", message);
                }
                Event::SweepComplete { count, .. } => {
                    eprintln!("done: {} results collected", count);
                }
            }
        }
    });

    let report = sweeper.sweep(urls).await;

    // Print the report and persist the summary to fetch_output.txt
    let reporter = Reporter::new(sweeper.config());
    reporter.write_and_persist(&report, &mut std::io::stdout())?;

    Ok(())
}
