use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use reqwest::Client;
use serde::Deserialize;

use crate::application::services::provider::{ProviderClient, ProviderReceipt};
use crate::domain::models::{Message, ProviderKind};

use super::smtp::build_mime;

#[derive(Debug, Clone)]
pub struct GmailRelayConfig {
    pub access_token: String,
    pub timeout_secs: u64,
}

/// Email delivery through the Gmail API send endpoint, used when a company
/// relays mail through its own Gmail account instead of raw SMTP.
pub struct GmailRelayProvider {
    http: Client,
    access_token: String,
    base_url: String,
}

impl GmailRelayProvider {
    pub fn new(config: &GmailRelayConfig) -> Arc<dyn ProviderClient> {
        Arc::new(Self {
            http: Client::builder()
                .user_agent("unicomm/gmail-relay")
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .expect("failed to build gmail relay client"),
            access_token: config.access_token.clone(),
            base_url: "https://gmail.googleapis.com".to_string(),
        }) as Arc<dyn ProviderClient>
    }
}

#[async_trait]
impl ProviderClient for GmailRelayProvider {
    fn provider(&self) -> ProviderKind {
        ProviderKind::GmailRelay
    }

    async fn send(&self, message: &Message) -> anyhow::Result<ProviderReceipt> {
        let mime = build_mime(message)?;
        let raw = URL_SAFE_NO_PAD.encode(mime.formatted());

        let url = format!("{}/gmail/v1/users/me/messages/send", self.base_url);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({ "raw": raw }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let payload: GmailErrorResponse = response.json().await.unwrap_or_default();
            anyhow::bail!(
                "gmail api returned {}: {}",
                status,
                payload
                    .error
                    .map(|e| e.message)
                    .unwrap_or_else(|| "unknown error".to_string())
            );
        }

        let payload: GmailSendResponse = response.json().await?;
        Ok(ProviderReceipt {
            provider_message_id: Some(payload.id),
        })
    }
}

#[derive(Debug, Deserialize)]
struct GmailSendResponse {
    id: String,
}

#[derive(Debug, Default, Deserialize)]
struct GmailErrorResponse {
    error: Option<GmailErrorBody>,
}

#[derive(Debug, Deserialize)]
struct GmailErrorBody {
    message: String,
}
