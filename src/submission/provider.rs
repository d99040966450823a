//! Outbound provider client

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::error::{Error, Result};

/// Environment variable holding the provider API credential
pub const PROVIDER_KEY_ENV: &str = "VITRINE_PROVIDER_KEY";

const TIMEOUT_SECONDS: u64 = 10;

/// One transactional message to be delivered by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// External email / audience provider.
///
/// Injected into the submission handlers so tests can substitute a fake.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Deliver one transactional message
    async fn send_email(&self, email: &OutboundEmail) -> Result<()>;

    /// Add an address to an audience
    async fn add_contact(&self, audience_id: &str, email: &str) -> Result<()>;
}

/// HTTPS client for the real provider API
pub struct HttpProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpProvider {
    pub fn new(base_url: &str, api_key: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECONDS))
            .build()
            .map_err(|e| Error::Provider(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    async fn post_json(&self, url: String, body: serde_json::Value) -> Result<()> {
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Provider(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Provider(format!("{url} returned {status}")));
        }

        Ok(())
    }
}

#[async_trait]
impl Provider for HttpProvider {
    async fn send_email(&self, email: &OutboundEmail) -> Result<()> {
        self.post_json(
            format!("{}/emails", self.base_url),
            json!({
                "from": email.from,
                "to": [email.to],
                "subject": email.subject,
                "text": email.text,
            }),
        )
        .await
    }

    async fn add_contact(&self, audience_id: &str, email: &str) -> Result<()> {
        self.post_json(
            format!("{}/audiences/{}/contacts", self.base_url, audience_id),
            json!({ "email": email }),
        )
        .await
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::sync::Mutex;

    use super::*;

    /// Records outbound traffic instead of sending it; can be told to fail
    #[derive(Default)]
    pub struct RecordingProvider {
        pub sent: Mutex<Vec<OutboundEmail>>,
        pub contacts: Mutex<Vec<(String, String)>>,
        pub fail: bool,
    }

    impl RecordingProvider {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl Provider for RecordingProvider {
        async fn send_email(&self, email: &OutboundEmail) -> Result<()> {
            if self.fail {
                return Err(Error::Provider("simulated outage".to_string()));
            }
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }

        async fn add_contact(&self, audience_id: &str, email: &str) -> Result<()> {
            if self.fail {
                return Err(Error::Provider("simulated outage".to_string()));
            }
            self.contacts
                .lock()
                .unwrap()
                .push((audience_id.to_string(), email.to_string()));
            Ok(())
        }
    }
}
