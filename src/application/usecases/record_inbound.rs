use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::application::services::threads::ThreadGrouper;
use crate::domain::errors::DomainError;
use crate::domain::models::{
    Category, Channel, Direction, Message, MessageStatus, ProviderKind, RecipientRef,
};
use crate::domain::repositories::MessageRepository;

pub struct RecordInboundRequest {
    pub recipient: RecipientRef,
    pub channel: Channel,
    pub provider: ProviderKind,
    pub category: Option<Category>,
    pub subject: Option<String>,
    pub body: String,
    pub from_address: String,
    pub to_address: String,
    pub metadata: serde_json::Value,
}

/// Records an inbound message (portal reply, provider webhook) into the same
/// thread its outbound counterparts use. Inbound records are created already
/// delivered; the lifecycle machine describes outbound delivery.
pub struct RecordInboundUseCase {
    messages: Arc<dyn MessageRepository>,
    threads: Arc<ThreadGrouper>,
}

impl RecordInboundUseCase {
    pub fn new(messages: Arc<dyn MessageRepository>, threads: Arc<ThreadGrouper>) -> Self {
        Self { messages, threads }
    }

    pub async fn execute(&self, request: RecordInboundRequest) -> Result<Message, DomainError> {
        if request.body.trim().is_empty() {
            return Err(DomainError::Validation("message body is empty".into()));
        }

        let now = Utc::now();
        let thread = self
            .threads
            .resolve(
                request.recipient,
                request.channel,
                request.subject.as_deref(),
                now,
            )
            .await?;

        let message = Message {
            id: Uuid::new_v4(),
            recipient: request.recipient,
            direction: Direction::Inbound,
            channel: request.channel,
            provider: request.provider,
            category: request.category,
            status: MessageStatus::Delivered,
            subject: request.subject,
            body: request.body,
            from_address: request.from_address,
            to_address: request.to_address,
            thread_id: thread.id,
            metadata: request.metadata,
            scheduled_at: None,
            created_at: now,
            updated_at: now,
        };

        Ok(self.messages.insert(message).await?)
    }
}
