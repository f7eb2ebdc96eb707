// Shared transport settings for the vendor clients.
//
// Both clients build their blocking reqwest client through here so timeout,
// TLS and user agent handling stay in one place.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::HeaderMap;

/// Transport settings shared by all vendor clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    /// Accept self-signed or otherwise invalid certificates.
    pub accept_invalid_certs: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }
}

impl TransportConfig {
    /// Build a blocking client that sends `headers` on every request.
    pub fn build_client(&self, headers: HeaderMap) -> Result<Client, reqwest::Error> {
        Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("fwaudit/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .default_headers(headers)
            .build()
    }
}
