//! Single-fetch execution — one request in, one result out.

use crate::error::FetchError;
use crate::types::{FetchRequest, FetchResult};
use std::time::Instant;

/// Fetch one resource and produce its result
///
/// Issues a GET for the identifier, drains the whole response body while
/// counting its bytes (content is discarded), and measures wall-clock
/// time from request start to drain completion. Any failure — malformed
/// identifier, connect error, mid-stream read error — is converted into
/// a failed result carrying the elapsed time up to the failure point.
/// This function never returns `Err` and never panics on bad input.
pub(crate) async fn fetch_one(client: &reqwest::Client, request: &FetchRequest) -> FetchResult {
    let start = Instant::now();

    let response = match client.get(request.url()).send().await {
        Ok(response) => response,
        Err(source) => {
            // Raw error text; reqwest's message names the URL
            let error = FetchError::Connect(source);
            return FetchResult::failed(request, start.elapsed(), error.to_string());
        }
    };

    match drain_body(response).await {
        Ok(bytes) => FetchResult::success(request, start.elapsed(), bytes),
        Err(source) => {
            let error = FetchError::BodyRead {
                url: request.url().to_string(),
                source,
            };
            FetchResult::failed(request, start.elapsed(), error.to_string())
        }
    }
}

/// Drain the response body, returning its total byte count
///
/// Chunks are counted and dropped immediately; the body is never
/// accumulated in memory.
async fn drain_body(mut response: reqwest::Response) -> std::result::Result<u64, reqwest::Error> {
    let mut bytes: u64 = 0;
    while let Some(chunk) = response.chunk().await? {
        bytes += chunk.len() as u64;
    }
    Ok(bytes)
}
