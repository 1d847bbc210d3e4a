use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::message::MessageStatus;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryEventKind {
    Sent,
    Delivered,
    Opened,
    Clicked,
    Bounced,
    Failed,
    Unsubscribed,
}

impl DeliveryEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryEventKind::Sent => "sent",
            DeliveryEventKind::Delivered => "delivered",
            DeliveryEventKind::Opened => "opened",
            DeliveryEventKind::Clicked => "clicked",
            DeliveryEventKind::Bounced => "bounced",
            DeliveryEventKind::Failed => "failed",
            DeliveryEventKind::Unsubscribed => "unsubscribed",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "sent" => Some(DeliveryEventKind::Sent),
            "delivered" => Some(DeliveryEventKind::Delivered),
            "opened" => Some(DeliveryEventKind::Opened),
            "clicked" => Some(DeliveryEventKind::Clicked),
            "bounced" => Some(DeliveryEventKind::Bounced),
            "failed" => Some(DeliveryEventKind::Failed),
            "unsubscribed" => Some(DeliveryEventKind::Unsubscribed),
            _ => None,
        }
    }

    /// The message status this event implies, if any. Engagement events
    /// (opened, clicked, unsubscribed) are recorded without a status change.
    pub fn derived_status(&self, detail: Option<&str>) -> Option<MessageStatus> {
        let reason = || detail.unwrap_or(self.as_str()).to_string();
        match self {
            DeliveryEventKind::Sent => Some(MessageStatus::Sent),
            DeliveryEventKind::Delivered => Some(MessageStatus::Delivered),
            DeliveryEventKind::Bounced => Some(MessageStatus::Bounced { reason: reason() }),
            DeliveryEventKind::Failed => Some(MessageStatus::Failed { reason: reason() }),
            DeliveryEventKind::Opened
            | DeliveryEventKind::Clicked
            | DeliveryEventKind::Unsubscribed => None,
        }
    }
}

/// Immutable timestamped record attached to a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryEvent {
    pub id: Uuid,
    pub message_id: Uuid,
    pub kind: DeliveryEventKind,
    pub detail: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl DeliveryEvent {
    pub fn new(message_id: Uuid, kind: DeliveryEventKind, detail: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            message_id,
            kind,
            detail,
            occurred_at: Utc::now(),
        }
    }
}
