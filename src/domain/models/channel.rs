use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    Sms,
    Portal,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Sms => "sms",
            Channel::Portal => "portal",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "email" => Some(Channel::Email),
            "sms" => Some(Channel::Sms),
            "portal" => Some(Channel::Portal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Smtp,
    GmailRelay,
    Ses,
    Twilio,
    Portal,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Smtp => "smtp",
            ProviderKind::GmailRelay => "gmail_relay",
            ProviderKind::Ses => "ses",
            ProviderKind::Twilio => "twilio",
            ProviderKind::Portal => "portal",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "smtp" => Some(ProviderKind::Smtp),
            "gmail_relay" => Some(ProviderKind::GmailRelay),
            "ses" => Some(ProviderKind::Ses),
            "twilio" => Some(ProviderKind::Twilio),
            "portal" => Some(ProviderKind::Portal),
            _ => None,
        }
    }

    pub fn channel(&self) -> Channel {
        match self {
            ProviderKind::Smtp | ProviderKind::GmailRelay | ProviderKind::Ses => Channel::Email,
            ProviderKind::Twilio => Channel::Sms,
            ProviderKind::Portal => Channel::Portal,
        }
    }
}

/// Purpose classification used for opt-out granularity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Marketing,
    Transactional,
    Quotes,
    Documents,
    Billing,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Marketing => "marketing",
            Category::Transactional => "transactional",
            Category::Quotes => "quotes",
            Category::Documents => "documents",
            Category::Billing => "billing",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "marketing" => Some(Category::Marketing),
            "transactional" => Some(Category::Transactional),
            "quotes" => Some(Category::Quotes),
            "documents" => Some(Category::Documents),
            "billing" => Some(Category::Billing),
            _ => None,
        }
    }

    pub fn is_transactional(&self) -> bool {
        matches!(self, Category::Transactional)
    }
}
