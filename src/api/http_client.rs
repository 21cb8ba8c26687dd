use reqwest::Client;
use std::time::Duration;

/// Client for the analysis service.
///
/// Only connecting is bounded; a scrape may legitimately take tens of
/// seconds and the core waits for whatever the service answers.
pub fn build_service_client(connect_timeout: Duration) -> Client {
    Client::builder()
        .connect_timeout(connect_timeout)
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .unwrap_or_else(|_| Client::new())
}
