use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::models::{
    Category, Channel, DeliveryEvent, Message, MessageStatus, Preference, PreferenceAudit,
    RecipientRef, Thread,
};

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn insert(&self, message: Message) -> anyhow::Result<Message>;

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Message>>;

    async fn update_status(&self, id: Uuid, status: MessageStatus) -> anyhow::Result<()>;

    /// Updates status and the scheduled-at marker together; used by the
    /// scheduler so the two never drift apart.
    async fn set_schedule(
        &self,
        id: Uuid,
        status: MessageStatus,
        scheduled_at: Option<DateTime<Utc>>,
    ) -> anyhow::Result<()>;

    async fn list_by_recipient(
        &self,
        recipient: RecipientRef,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<(Vec<Message>, bool)>;

    async fn list_by_thread(&self, thread_id: Uuid) -> anyhow::Result<Vec<Message>>;

    /// Scheduled messages whose due time is at or before `cutoff`.
    async fn list_scheduled_due(&self, cutoff: DateTime<Utc>) -> anyhow::Result<Vec<Message>>;

    async fn count(&self) -> anyhow::Result<u64>;
}

#[async_trait]
pub trait ThreadRepository: Send + Sync {
    async fn insert(&self, thread: Thread) -> anyhow::Result<Thread>;

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Thread>>;

    /// Most recently active thread for the recipient on the channel.
    async fn find_latest(
        &self,
        recipient: RecipientRef,
        channel: Channel,
    ) -> anyhow::Result<Option<Thread>>;

    async fn touch(&self, id: Uuid, at: DateTime<Utc>) -> anyhow::Result<()>;

    async fn list_by_recipient(&self, recipient: RecipientRef) -> anyhow::Result<Vec<Thread>>;
}

#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    async fn find(
        &self,
        recipient: RecipientRef,
        channel: Channel,
        category: Category,
    ) -> anyhow::Result<Option<Preference>>;

    async fn upsert(&self, preference: Preference) -> anyhow::Result<Preference>;

    async fn log_change(&self, audit: PreferenceAudit) -> anyhow::Result<()>;

    async fn audit_history(
        &self,
        recipient: RecipientRef,
        channel: Channel,
        category: Category,
    ) -> anyhow::Result<Vec<PreferenceAudit>>;

    async fn list_by_recipient(
        &self,
        recipient: RecipientRef,
    ) -> anyhow::Result<Vec<Preference>>;
}

#[async_trait]
pub trait DeliveryEventRepository: Send + Sync {
    async fn append(&self, event: DeliveryEvent) -> anyhow::Result<()>;

    async fn list_by_message(&self, message_id: Uuid) -> anyhow::Result<Vec<DeliveryEvent>>;
}
