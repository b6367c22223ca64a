//! Outbound chat webhook.

use std::time::Duration;

use leak_core::text::truncate_on_char_boundary;
use serde::Serialize;

use crate::error::NotifyError;

/// Upper bound on the response body echoed into an error message.
const MAX_ERROR_BODY: usize = 256;

#[derive(Serialize)]
struct WebhookBody<'a> {
    text: &'a str,
}

/// Posts `{"text": ...}` payloads to a single webhook URL.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http: reqwest::Client,
    url: String,
}

impl WebhookClient {
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("reqwest client should build"),
            url: url.into(),
        }
    }

    /// Deliver one message. Any 2xx status counts as delivered.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] on transport failure or timeout, and
    /// [`NotifyError::Rejected`] for a non-success status.
    pub async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let resp = self
            .http
            .post(&self.url)
            .json(&WebhookBody { text })
            .send()
            .await?;
        if resp.status().is_success() {
            return Ok(());
        }
        let status = resp.status().as_u16();
        let mut message = resp.text().await.unwrap_or_default();
        truncate_on_char_boundary(&mut message, MAX_ERROR_BODY);
        Err(NotifyError::Rejected { status, message })
    }
}
