//! Shared HTTP plumbing for network producers
//!
//! One `reqwest` client per producer with explicit timeouts and the configured
//! User-Agent, plus a `governor` limiter for services with a request policy.

use super::ProducerError;
use governor::{Quota, RateLimiter};
use reqwest::{Client, Response};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Total request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Connection establishment timeout
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Largest page body read by producers that inspect page content
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Direct (un-keyed) token bucket limiter
pub type DirectRateLimiter = RateLimiter<
    governor::state::direct::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Build an HTTP client with the standard timeouts
pub fn build_client(user_agent: &str) -> Result<Client, ProducerError> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .map_err(ProducerError::Http)
}

/// Limiter allowing `per_second` requests each second (at least one)
pub fn per_second_limiter(per_second: u32) -> Arc<DirectRateLimiter> {
    let quota = Quota::per_second(NonZeroU32::new(per_second).unwrap_or(NonZeroU32::MIN));
    Arc::new(RateLimiter::direct(quota))
}

/// Reject non-2xx responses with the service name in the message
pub fn ensure_success(service: &str, response: Response) -> Result<Response, ProducerError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ProducerError::UnexpectedResponse(format!(
            "{} returned error status: {}",
            service, status
        )))
    }
}

/// Read a response body as text, keeping at most [`MAX_BODY_BYTES`]
pub async fn read_text_limited(mut response: Response) -> Result<String, ProducerError> {
    let mut body: Vec<u8> = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let room = MAX_BODY_BYTES.saturating_sub(body.len());
        body.extend_from_slice(&chunk[..chunk.len().min(room)]);
        if body.len() >= MAX_BODY_BYTES {
            break;
        }
    }
    Ok(String::from_utf8_lossy(&body).into_owned())
}
