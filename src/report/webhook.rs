//! Webhook delivery of the result list.

use crate::error::ReportResult;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use std::time::Duration;

/// Upper bound on a single delivery.
pub const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts result artifacts to a configured URL.
pub struct WebhookClient {
    url: String,
    client: reqwest::Client,
}

impl WebhookClient {
    /// Create a client with the default delivery timeout.
    pub fn new(url: impl Into<String>) -> ReportResult<Self> {
        Self::with_timeout(url, WEBHOOK_TIMEOUT)
    }

    /// Create a client with a custom delivery timeout.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> ReportResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST a JSON body and return the response status.
    ///
    /// Any HTTP status counts as delivered; only transport failures are errors.
    pub async fn deliver(&self, json: &str) -> Result<StatusCode, reqwest::Error> {
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(json.to_owned())
            .send()
            .await?;

        Ok(response.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = WebhookClient::new("https://hooks.example.com/sql").unwrap();
        assert_eq!(client.url(), "https://hooks.example.com/sql");
    }

    #[tokio::test]
    async fn test_delivery_to_closed_port_fails() {
        let client =
            WebhookClient::with_timeout("http://127.0.0.1:1/hook", Duration::from_secs(2)).unwrap();
        assert!(client.deliver("[]").await.is_err());
    }
}
