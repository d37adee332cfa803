//! Retry module
//!
//! Fixed-delay retry around a single page fetch.
//!
//! # Overview
//!
//! A [`RetryPolicy`] runs an operation up to `max_retries` times. Errors
//! classified as transient by [`crate::Error::is_retryable`] are retried
//! after `retry_delay`; anything else fails on the spot. When the budget
//! runs out the last error is wrapped in [`crate::Error::RequestExhausted`]
//! together with the endpoint and page that failed.

mod policy;

pub use policy::{RetryPolicy, RetryState};
