use std::{sync::OnceLock, time::Duration};

use reqwest::Client;

/// Shared HTTP client so concurrent inbound requests reuse one connection pool
pub fn http_client() -> Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();

    CLIENT
        .get_or_init(|| {
            Client::builder()
                .timeout(Duration::from_secs(30))
                .pool_idle_timeout(Some(Duration::from_secs(30)))
                .tcp_nodelay(true)
                .tcp_keepalive(Some(Duration::from_secs(60)))
                .build()
                .expect("failed to build default HTTP client")
        })
        .clone()
}
