use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message as MimeMessage, Tokio1Executor};

use crate::application::services::provider::{ProviderClient, ProviderReceipt};
use crate::domain::models::{Message, ProviderKind};

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

/// Direct SMTP delivery through a relay host.
pub struct SmtpProvider {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpProvider {
    pub fn new(config: &SmtpConfig) -> anyhow::Result<Arc<dyn ProviderClient>> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(credentials)
            .build();
        Ok(Arc::new(Self { mailer }) as Arc<dyn ProviderClient>)
    }
}

pub(crate) fn build_mime(message: &Message) -> anyhow::Result<MimeMessage> {
    let from: Mailbox = message
        .from_address
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid from address: {e}"))?;
    let to: Mailbox = message
        .to_address
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid to address: {e}"))?;

    let email = MimeMessage::builder()
        .from(from)
        .to(to)
        .subject(message.subject.as_deref().unwrap_or("(no subject)"))
        .header(ContentType::TEXT_PLAIN)
        .body(message.body.clone())?;
    Ok(email)
}

#[async_trait]
impl ProviderClient for SmtpProvider {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Smtp
    }

    async fn send(&self, message: &Message) -> anyhow::Result<ProviderReceipt> {
        let email = build_mime(message)?;
        self.mailer.send(email).await?;
        Ok(ProviderReceipt::default())
    }
}
