use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::channel::Channel;
use super::recipient::RecipientRef;

/// Conversation grouping for messages sharing a recipient and channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    pub id: Uuid,
    pub recipient: RecipientRef,
    pub channel: Channel,
    pub subject: Option<String>,
    pub last_message_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Thread {
    pub fn new(
        recipient: RecipientRef,
        channel: Channel,
        subject: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient,
            channel,
            subject,
            last_message_at: now,
            created_at: now,
        }
    }

    /// A thread stays active while its last activity is within the window.
    pub fn is_active(&self, now: DateTime<Utc>, window: Duration) -> bool {
        now - self.last_message_at <= window
    }
}
