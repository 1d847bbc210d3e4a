use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::channel::{Category, Channel, ProviderKind};
use super::recipient::RecipientRef;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Outbound,
    Inbound,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum MessageStatus {
    Pending,
    Scheduled,
    Sent,
    Delivered,
    Failed { reason: String },
    Bounced { reason: String },
    Cancelled,
}

impl MessageStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            MessageStatus::Delivered
                | MessageStatus::Failed { .. }
                | MessageStatus::Bounced { .. }
                | MessageStatus::Cancelled
        )
    }

    /// Whether `next` is a legal forward transition from `self`.
    ///
    /// Statuses only move forward: a record is never reverted; an explicit
    /// retry creates a new record instead.
    pub fn can_transition(&self, next: &MessageStatus) -> bool {
        use MessageStatus::*;
        match (self, next) {
            (Pending, Scheduled) | (Pending, Sent) | (Pending, Failed { .. }) => true,
            // Scheduled -> Pending happens when the sweep re-enqueues an
            // overdue job; the message has not been handed to a provider yet.
            (Scheduled, Pending)
            | (Scheduled, Sent)
            | (Scheduled, Failed { .. })
            | (Scheduled, Cancelled) => true,
            (Sent, Delivered) | (Sent, Bounced { .. }) | (Sent, Failed { .. }) => true,
            _ => false,
        }
    }
}

/// One outbound or inbound communication, persisted and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub recipient: RecipientRef,
    pub direction: Direction,
    pub channel: Channel,
    pub provider: ProviderKind,
    pub category: Option<Category>,
    pub status: MessageStatus,
    pub subject: Option<String>,
    pub body: String,
    pub from_address: String,
    pub to_address: String,
    pub thread_id: Uuid,
    pub metadata: serde_json::Value,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Message {
    pub fn last_error(&self) -> Option<&str> {
        match &self.status {
            MessageStatus::Failed { reason } | MessageStatus::Bounced { reason } => {
                Some(reason.as_str())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MessageStatus::*;

    fn failed() -> super::MessageStatus {
        Failed { reason: "x".into() }
    }

    fn bounced() -> super::MessageStatus {
        Bounced { reason: "x".into() }
    }

    #[test]
    fn forward_transitions_are_allowed() {
        assert!(Pending.can_transition(&Sent));
        assert!(Pending.can_transition(&Scheduled));
        assert!(Pending.can_transition(&failed()));
        assert!(Scheduled.can_transition(&Sent));
        assert!(Scheduled.can_transition(&Cancelled));
        assert!(Scheduled.can_transition(&Pending));
        assert!(Sent.can_transition(&Delivered));
        assert!(Sent.can_transition(&bounced()));
        assert!(Sent.can_transition(&failed()));
    }

    #[test]
    fn backward_transitions_are_rejected() {
        assert!(!Sent.can_transition(&Pending));
        assert!(!Delivered.can_transition(&Sent));
        assert!(!Delivered.can_transition(&Pending));
        assert!(!failed().can_transition(&Sent));
        assert!(!bounced().can_transition(&Delivered));
        assert!(!Cancelled.can_transition(&Pending));
    }

    #[test]
    fn delivery_requires_a_send_first() {
        assert!(!Pending.can_transition(&Delivered));
        assert!(!Scheduled.can_transition(&Delivered));
        assert!(!Pending.can_transition(&bounced()));
    }

    #[test]
    fn terminal_statuses() {
        assert!(Delivered.is_terminal());
        assert!(failed().is_terminal());
        assert!(bounced().is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(!Pending.is_terminal());
        assert!(!Scheduled.is_terminal());
        assert!(!Sent.is_terminal());
    }
}
