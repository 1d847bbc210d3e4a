use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::models::{
    Category, Channel, DeliveryEvent, Message, MessageStatus, Preference, PreferenceAudit,
    RecipientRef, Thread,
};
use crate::domain::repositories::{
    DeliveryEventRepository, MessageRepository, PreferenceRepository, ThreadRepository,
};

#[derive(Default)]
pub struct InMemoryMessageRepository {
    messages: Arc<RwLock<HashMap<Uuid, Message>>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn insert(&self, message: Message) -> anyhow::Result<Message> {
        let mut messages = self.messages.write().await;
        messages.insert(message.id, message.clone());
        Ok(message)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Message>> {
        let messages = self.messages.read().await;
        Ok(messages.get(&id).cloned())
    }

    async fn update_status(&self, id: Uuid, status: MessageStatus) -> anyhow::Result<()> {
        let mut messages = self.messages.write().await;
        if let Some(message) = messages.get_mut(&id) {
            message.status = status;
            message.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn set_schedule(
        &self,
        id: Uuid,
        status: MessageStatus,
        scheduled_at: Option<DateTime<Utc>>,
    ) -> anyhow::Result<()> {
        let mut messages = self.messages.write().await;
        if let Some(message) = messages.get_mut(&id) {
            message.status = status;
            message.scheduled_at = scheduled_at;
            message.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn list_by_recipient(
        &self,
        recipient: RecipientRef,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<(Vec<Message>, bool)> {
        let limit = limit.unwrap_or(50).min(200) as usize;
        let offset = offset.unwrap_or(0) as usize;

        let messages = self.messages.read().await;
        let mut matching: Vec<Message> = messages
            .values()
            .filter(|m| m.recipient == recipient)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let page: Vec<Message> = matching.into_iter().skip(offset).take(limit + 1).collect();
        let has_more = page.len() > limit;
        Ok((page.into_iter().take(limit).collect(), has_more))
    }

    async fn list_by_thread(&self, thread_id: Uuid) -> anyhow::Result<Vec<Message>> {
        let messages = self.messages.read().await;
        let mut matching: Vec<Message> = messages
            .values()
            .filter(|m| m.thread_id == thread_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(matching)
    }

    async fn list_scheduled_due(&self, cutoff: DateTime<Utc>) -> anyhow::Result<Vec<Message>> {
        let messages = self.messages.read().await;
        Ok(messages
            .values()
            .filter(|m| {
                m.status == MessageStatus::Scheduled
                    && m.scheduled_at.is_some_and(|at| at <= cutoff)
            })
            .cloned()
            .collect())
    }

    async fn count(&self) -> anyhow::Result<u64> {
        let messages = self.messages.read().await;
        Ok(messages.len() as u64)
    }
}

#[derive(Default)]
pub struct InMemoryThreadRepository {
    threads: Arc<RwLock<HashMap<Uuid, Thread>>>,
}

impl InMemoryThreadRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ThreadRepository for InMemoryThreadRepository {
    async fn insert(&self, thread: Thread) -> anyhow::Result<Thread> {
        let mut threads = self.threads.write().await;
        threads.insert(thread.id, thread.clone());
        Ok(thread)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Thread>> {
        let threads = self.threads.read().await;
        Ok(threads.get(&id).cloned())
    }

    async fn find_latest(
        &self,
        recipient: RecipientRef,
        channel: Channel,
    ) -> anyhow::Result<Option<Thread>> {
        let threads = self.threads.read().await;
        Ok(threads
            .values()
            .filter(|t| t.recipient == recipient && t.channel == channel)
            .max_by_key(|t| t.last_message_at)
            .cloned())
    }

    async fn touch(&self, id: Uuid, at: DateTime<Utc>) -> anyhow::Result<()> {
        let mut threads = self.threads.write().await;
        if let Some(thread) = threads.get_mut(&id) {
            thread.last_message_at = at;
        }
        Ok(())
    }

    async fn list_by_recipient(&self, recipient: RecipientRef) -> anyhow::Result<Vec<Thread>> {
        let threads = self.threads.read().await;
        let mut matching: Vec<Thread> = threads
            .values()
            .filter(|t| t.recipient == recipient)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.last_message_at.cmp(&a.last_message_at));
        Ok(matching)
    }
}

#[derive(Default)]
pub struct InMemoryPreferenceRepository {
    preferences: Arc<RwLock<HashMap<Uuid, Preference>>>,
    audits: Arc<RwLock<Vec<PreferenceAudit>>>,
}

impl InMemoryPreferenceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceRepository for InMemoryPreferenceRepository {
    async fn find(
        &self,
        recipient: RecipientRef,
        channel: Channel,
        category: Category,
    ) -> anyhow::Result<Option<Preference>> {
        let preferences = self.preferences.read().await;
        Ok(preferences
            .values()
            .find(|p| {
                p.recipient == recipient && p.channel == channel && p.category == category
            })
            .cloned())
    }

    async fn upsert(&self, preference: Preference) -> anyhow::Result<Preference> {
        let mut preferences = self.preferences.write().await;
        preferences.insert(preference.id, preference.clone());
        Ok(preference)
    }

    async fn log_change(&self, audit: PreferenceAudit) -> anyhow::Result<()> {
        let mut audits = self.audits.write().await;
        audits.push(audit);
        Ok(())
    }

    async fn audit_history(
        &self,
        recipient: RecipientRef,
        channel: Channel,
        category: Category,
    ) -> anyhow::Result<Vec<PreferenceAudit>> {
        let audits = self.audits.read().await;
        let mut matching: Vec<PreferenceAudit> = audits
            .iter()
            .filter(|a| {
                a.recipient == recipient && a.channel == channel && a.category == category
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn list_by_recipient(
        &self,
        recipient: RecipientRef,
    ) -> anyhow::Result<Vec<Preference>> {
        let preferences = self.preferences.read().await;
        Ok(preferences
            .values()
            .filter(|p| p.recipient == recipient)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryDeliveryEventRepository {
    events: Arc<RwLock<Vec<DeliveryEvent>>>,
}

impl InMemoryDeliveryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DeliveryEventRepository for InMemoryDeliveryEventRepository {
    async fn append(&self, event: DeliveryEvent) -> anyhow::Result<()> {
        let mut events = self.events.write().await;
        events.push(event);
        Ok(())
    }

    async fn list_by_message(&self, message_id: Uuid) -> anyhow::Result<Vec<DeliveryEvent>> {
        let events = self.events.read().await;
        Ok(events
            .iter()
            .filter(|e| e.message_id == message_id)
            .cloned()
            .collect())
    }
}
