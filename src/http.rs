//! HTTP client utilities
//!
//! Provides a reqwest::Client configured with a timeout and the identifying
//! user agent Reddit asks API consumers to send. System proxy environment
//! variables (HTTP_PROXY / HTTPS_PROXY / NO_PROXY) are honored by reqwest's
//! default proxy handling.

use reqwest::Client;
use std::time::Duration;

pub const USER_AGENT: &str = concat!("reddit-mcp/", env!("CARGO_PKG_VERSION"));

/// Build a reqwest Client with the given timeout
pub fn client_with_timeout(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to create HTTP client")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_identifies_crate() {
        assert!(USER_AGENT.starts_with("reddit-mcp/"));
    }

    #[test]
    fn test_client_builds() {
        let _client = client_with_timeout(Duration::from_secs(5));
    }
}
