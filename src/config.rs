use std::env::var;

use dotenvy::dotenv;

use crate::domain::models::{Channel, ProviderKind};
use crate::infrastructure::providers::{GmailRelayConfig, SesConfig, SmtpConfig, TwilioConfig};
use crate::infrastructure::queue::jetstream::JetstreamConfig;

pub struct Config {
    pub port: u16,
    pub host: String,
    pub scheme: String,
    pub database_url: String,
    pub jetstream: JetstreamConfig,
    pub default_email_provider: ProviderKind,
    pub smtp: Option<SmtpConfig>,
    pub gmail: Option<GmailRelayConfig>,
    pub ses: Option<SesConfig>,
    pub twilio: Option<TwilioConfig>,
    pub provider_timeout_secs: u64,
    pub sweep_interval_secs: u64,
    pub thread_window_days: i64,
}

impl Config {
    pub fn try_parse() -> Result<Config, String> {
        let _ = dotenv();

        let provider_timeout_secs = parse_or("PROVIDER_TIMEOUT_SECONDS", 30)?;

        let default_email_provider = match optional("DEFAULT_EMAIL_PROVIDER") {
            None => ProviderKind::Smtp,
            Some(name) => {
                let kind = ProviderKind::from_str(&name)
                    .ok_or_else(|| format!("unknown DEFAULT_EMAIL_PROVIDER {name}"))?;
                if kind.channel() != Channel::Email {
                    return Err(format!(
                        "DEFAULT_EMAIL_PROVIDER {name} is not an email provider"
                    ));
                }
                kind
            }
        };

        let smtp = optional("SMTP_HOST").map(|host| -> Result<SmtpConfig, String> {
            Ok(SmtpConfig {
                host,
                port: parse_or("SMTP_PORT", 587)?,
                username: required("SMTP_USERNAME")?,
                password: required("SMTP_PASSWORD")?,
            })
        });
        let smtp = smtp.transpose()?;

        let gmail = optional("GMAIL_ACCESS_TOKEN").map(|access_token| GmailRelayConfig {
            access_token,
            timeout_secs: provider_timeout_secs,
        });

        let ses = optional("SES_REGION").map(|region| -> Result<SesConfig, String> {
            Ok(SesConfig {
                region,
                access_key_id: required("AWS_ACCESS_KEY_ID")?,
                secret_access_key: required("AWS_SECRET_ACCESS_KEY")?,
                timeout_secs: provider_timeout_secs,
            })
        });
        let ses = ses.transpose()?;

        let twilio = optional("TWILIO_ACCOUNT_SID").map(|sid| -> Result<TwilioConfig, String> {
            Ok(TwilioConfig {
                account_sid: sid,
                auth_token: required("TWILIO_AUTH_TOKEN")?,
                timeout_secs: provider_timeout_secs,
            })
        });
        let twilio = twilio.transpose()?;

        Ok(Config {
            port: parse_or("PORT", 8080)?,
            host: optional("HOST").unwrap_or_else(|| "localhost".to_string()),
            scheme: optional("SCHEME").unwrap_or_else(|| "http".to_string()),
            database_url: required("DATABASE_URL")?,
            jetstream: JetstreamConfig {
                url: required("NATS_URL")?,
                stream: optional("NATS_STREAM").unwrap_or_else(|| "unicomm-dispatch".to_string()),
                subject: optional("NATS_SUBJECT")
                    .unwrap_or_else(|| "unicomm.dispatch".to_string()),
                durable: optional("NATS_DURABLE").unwrap_or_else(|| "unicomm-worker".to_string()),
                pull_batch: parse_or("NATS_PULL_BATCH", 16)?,
                ack_wait_seconds: parse_or("NATS_ACK_WAIT_SECONDS", 30)?,
                max_deliver: parse_or("NATS_MAX_DELIVER", 5)?,
            },
            default_email_provider,
            smtp,
            gmail,
            ses,
            twilio,
            provider_timeout_secs,
            sweep_interval_secs: parse_or("SWEEP_INTERVAL_SECONDS", 60)?,
            thread_window_days: parse_or("THREAD_WINDOW_DAYS", 30)?,
        })
    }
}

fn required(name: &str) -> Result<String, String> {
    var(name).map_err(|_| format!("missing required env param {name}"))
}

fn optional(name: &str) -> Option<String> {
    var(name).ok().filter(|v| !v.is_empty())
}

fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T, String> {
    match optional(name) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| format!("failed to parse env param {name}")),
    }
}
