//! Resilient HTTP fetch module
//!
//! Wraps outbound GETs to the catalog service with:
//!
//! - **Per-attempt timeout**: the in-flight request is aborted when the
//!   deadline fires
//! - **Bounded retries**: a fixed total-attempt budget, never exceeded
//! - **Linear backoff**: the delay before attempt `i` is `base_delay * i`
//! - **Selective retry**: only 429/503, timeouts, and connection-level
//!   failures are retried; every other non-2xx status fails immediately

mod client;
mod rate_limit;

pub use client::{backoff_delay, HttpClient, HttpClientConfig, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
