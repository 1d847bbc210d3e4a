use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::application::services::provider::{ProviderClient, ProviderReceipt};
use crate::domain::models::{Message, ProviderKind};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone)]
pub struct SesConfig {
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub timeout_secs: u64,
}

/// Email delivery through the SES v2 REST API with SigV4 request signing.
pub struct SesProvider {
    http: Client,
    config: SesConfig,
    endpoint: String,
}

impl SesProvider {
    pub fn new(config: &SesConfig) -> Arc<dyn ProviderClient> {
        Arc::new(Self {
            http: Client::builder()
                .user_agent("unicomm/ses")
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .expect("failed to build ses client"),
            endpoint: format!("https://email.{}.amazonaws.com", config.region),
            config: config.clone(),
        }) as Arc<dyn ProviderClient>
    }

    fn host(&self) -> String {
        format!("email.{}.amazonaws.com", self.config.region)
    }
}

const SEND_PATH: &str = "/v2/email/outbound-emails";

#[async_trait]
impl ProviderClient for SesProvider {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Ses
    }

    async fn send(&self, message: &Message) -> anyhow::Result<ProviderReceipt> {
        let body = serde_json::json!({
            "FromEmailAddress": message.from_address,
            "Destination": { "ToAddresses": [message.to_address] },
            "Content": {
                "Simple": {
                    "Subject": { "Data": message.subject.as_deref().unwrap_or("(no subject)") },
                    "Body": { "Text": { "Data": message.body } },
                }
            }
        })
        .to_string();

        let now = Utc::now();
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let date_stamp = now.format("%Y%m%d").to_string();
        let authorization = sign_request(
            &self.config.access_key_id,
            &self.config.secret_access_key,
            &self.config.region,
            &self.host(),
            SEND_PATH,
            &amz_date,
            &date_stamp,
            &body,
        );

        let response = self
            .http
            .post(format!("{}{}", self.endpoint, SEND_PATH))
            .header("content-type", "application/json")
            .header("x-amz-date", amz_date)
            .header("authorization", authorization)
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let payload: SesErrorResponse = response.json().await.unwrap_or_default();
            anyhow::bail!(
                "ses returned {}: {}",
                status,
                payload
                    .message
                    .unwrap_or_else(|| "unknown error".to_string())
            );
        }

        let payload: SesSendResponse = response.json().await?;
        Ok(ProviderReceipt {
            provider_message_id: payload.message_id,
        })
    }
}

/// SigV4 signature for a SES v2 JSON POST. Signed headers are fixed to
/// content-type, host and x-amz-date.
#[allow(clippy::too_many_arguments)]
fn sign_request(
    access_key_id: &str,
    secret_access_key: &str,
    region: &str,
    host: &str,
    path: &str,
    amz_date: &str,
    date_stamp: &str,
    body: &str,
) -> String {
    let payload_hash = hex(&Sha256::digest(body.as_bytes()));
    let canonical_headers = format!(
        "content-type:application/json\nhost:{host}\nx-amz-date:{amz_date}\n"
    );
    let signed_headers = "content-type;host;x-amz-date";
    let canonical_request = format!(
        "POST\n{path}\n\n{canonical_headers}\n{signed_headers}\n{payload_hash}"
    );

    let scope = format!("{date_stamp}/{region}/ses/aws4_request");
    let string_to_sign = format!(
        "AWS4-HMAC-SHA256\n{amz_date}\n{scope}\n{}",
        hex(&Sha256::digest(canonical_request.as_bytes()))
    );

    let key = signing_key(secret_access_key, date_stamp, region, "ses");
    let signature = hex(&hmac(&key, string_to_sign.as_bytes()));

    format!(
        "AWS4-HMAC-SHA256 Credential={access_key_id}/{scope}, \
         SignedHeaders={signed_headers}, Signature={signature}"
    )
}

fn signing_key(secret: &str, date_stamp: &str, region: &str, service: &str) -> Vec<u8> {
    let k_date = hmac(format!("AWS4{secret}").as_bytes(), date_stamp.as_bytes());
    let k_region = hmac(&k_date, region.as_bytes());
    let k_service = hmac(&k_region, service.as_bytes());
    hmac(&k_service, b"aws4_request")
}

fn hmac(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("hmac accepts any key length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[derive(Debug, Deserialize)]
struct SesSendResponse {
    #[serde(rename = "MessageId")]
    message_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SesErrorResponse {
    #[serde(rename = "message")]
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_encodes_lowercase() {
        assert_eq!(hex(&[0x00, 0xab, 0xff]), "00abff");
    }

    // Signing-key derivation example from the AWS SigV4 documentation.
    #[test]
    fn derives_documented_signing_key() {
        let key = signing_key(
            "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            "20120215",
            "us-east-1",
            "iam",
        );
        assert_eq!(
            hex(&key),
            "f4780e2d9f65fa895f9c67b32ce1baf0b0d8a43505a000a1a9e090d414db404d"
        );
    }

    #[test]
    fn authorization_header_shape() {
        let auth = sign_request(
            "AKIDEXAMPLE",
            "secret",
            "us-east-1",
            "email.us-east-1.amazonaws.com",
            SEND_PATH,
            "20260101T000000Z",
            "20260101",
            "{}",
        );
        assert!(auth.starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20260101/"));
        assert!(auth.contains("SignedHeaders=content-type;host;x-amz-date"));
        assert!(auth.contains("Signature="));
    }
}
