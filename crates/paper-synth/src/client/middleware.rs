//! Shared HTTP client construction (connection pooling, retry middleware).

use std::time::Duration;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::config::api;

/// Build a pooled client with optional transient-failure retries.
///
/// With `max_retries == 0` the retry middleware is not installed at all.
///
/// # Errors
///
/// Returns error if the TLS backend or connection pool cannot be initialized.
pub fn build_client(
    timeout: Duration,
    connect_timeout: Duration,
    max_retries: u32,
) -> reqwest::Result<ClientWithMiddleware> {
    let client = Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .pool_max_idle_per_host(api::MAX_KEEPALIVE)
        .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
        .gzip(true)
        .build()?;

    let mut builder = ClientBuilder::new(client);
    if max_retries > 0 {
        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_secs(1), Duration::from_secs(30))
            .build_with_max_retries(max_retries);
        builder = builder.with(RetryTransientMiddleware::new_with_policy(retry_policy));
    }

    Ok(builder.build())
}
