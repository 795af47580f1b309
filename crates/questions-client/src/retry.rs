//! Transport retry for Questions API calls.
//!
//! A request is retried with exponential backoff (200ms, 400ms, 800ms) when
//! it never produced a response. Connection failures are always retried.
//! Timeouts are retried only for idempotent requests, since a timed-out
//! `POST` may already have created a question. Any HTTP response, whatever
//! its status, is returned to the caller unchanged.

use std::future::Future;
use std::time::Duration;

const MAX_RETRIES: u32 = 3;
const BASE_DELAY_MS: u64 = 200;

/// Whether repeating a request can change server state twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Idempotency {
    /// `GET`, `PUT`, `DELETE`.
    Idempotent,
    /// `POST`.
    NonIdempotent,
}

impl Idempotency {
    fn should_retry(self, err: &reqwest::Error) -> bool {
        err.is_connect() || (self == Self::Idempotent && err.is_timeout())
    }
}

fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(BASE_DELAY_MS << attempt)
}

/// Send a request built by `send`, retrying transport failures allowed by
/// `idempotency`. `send` is called at most `MAX_RETRIES + 1` times.
pub(crate) async fn retry_send<F, Fut>(
    idempotency: Idempotency,
    send: F,
) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let mut attempt = 0;
    loop {
        match send().await {
            Err(e) if attempt < MAX_RETRIES && idempotency.should_retry(&e) => {
                let delay = backoff(attempt);
                attempt += 1;
                tracing::warn!(
                    attempt,
                    max_retries = MAX_RETRIES,
                    ?idempotency,
                    "Questions API unreachable, retrying in {delay:?}: {e}"
                );
                tokio::time::sleep(delay).await;
            }
            other => return other,
        }
    }
}
