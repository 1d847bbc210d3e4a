use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::services::provider::{ProviderClient, ProviderReceipt};
use crate::domain::models::{Message, ProviderKind};

#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub timeout_secs: u64,
}

/// SMS delivery through the Twilio Messages API.
pub struct TwilioProvider {
    http: Client,
    account_sid: String,
    auth_token: String,
    base_url: String,
}

impl TwilioProvider {
    pub fn new(config: &TwilioConfig) -> Arc<dyn ProviderClient> {
        Arc::new(Self {
            http: Client::builder()
                .user_agent("unicomm/twilio")
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .expect("failed to build twilio client"),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            base_url: "https://api.twilio.com".to_string(),
        }) as Arc<dyn ProviderClient>
    }
}

#[async_trait]
impl ProviderClient for TwilioProvider {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Twilio
    }

    async fn send(&self, message: &Message) -> anyhow::Result<ProviderReceipt> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        );

        let response = self
            .http
            .post(url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[
                ("To", message.to_address.as_str()),
                ("From", message.from_address.as_str()),
                ("Body", message.body.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let payload: TwilioErrorResponse = response.json().await.unwrap_or_default();
            anyhow::bail!(
                "twilio returned {} (code {}): {}",
                status,
                payload.code.unwrap_or(0),
                payload
                    .message
                    .unwrap_or_else(|| "unknown error".to_string())
            );
        }

        let payload: TwilioMessageResponse = response.json().await?;
        Ok(ProviderReceipt {
            provider_message_id: Some(payload.sid),
        })
    }
}

#[derive(Debug, Deserialize)]
struct TwilioMessageResponse {
    sid: String,
}

#[derive(Debug, Default, Deserialize)]
struct TwilioErrorResponse {
    code: Option<u32>,
    message: Option<String>,
}
