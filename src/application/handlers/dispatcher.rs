use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::models::{
    Category, Channel, DeliveryEvent, DeliveryEventKind, Direction, Message, MessageStatus,
    ProviderKind, RecipientRef,
};
use crate::domain::repositories::{DeliveryEventRepository, MessageRepository};

use crate::application::services::preferences::PreferenceGate;
use crate::application::services::provider::ProviderRegistry;
use crate::application::services::threads::ThreadGrouper;

pub struct DispatchRequest {
    pub recipient: RecipientRef,
    pub channel: Channel,
    pub provider: Option<ProviderKind>,
    pub category: Option<Category>,
    pub subject: Option<String>,
    pub body: String,
    pub from_address: String,
    pub to_address: String,
    pub metadata: serde_json::Value,
}

/// Orchestrates one outbound send: consent check, thread resolution, record
/// creation, provider invocation, status bookkeeping.
pub struct DispatchOrchestrator {
    messages: Arc<dyn MessageRepository>,
    events: Arc<dyn DeliveryEventRepository>,
    gate: Arc<PreferenceGate>,
    threads: Arc<ThreadGrouper>,
    registry: ProviderRegistry,
}

impl DispatchOrchestrator {
    pub fn new(
        messages: Arc<dyn MessageRepository>,
        events: Arc<dyn DeliveryEventRepository>,
        gate: Arc<PreferenceGate>,
        threads: Arc<ThreadGrouper>,
        registry: ProviderRegistry,
    ) -> Self {
        Self {
            messages,
            events,
            gate,
            threads,
            registry,
        }
    }

    /// Full dispatch: creates the message and pushes it through the provider
    /// immediately. On opt-out no message is created.
    pub async fn dispatch(&self, request: DispatchRequest) -> Result<Message, DomainError> {
        let message = self.prepare(request).await?;
        self.send(message).await
    }

    /// Consent check, thread resolution, and persistence of a `Pending`
    /// record, without touching a provider. Used for deferred sends.
    pub async fn prepare(&self, request: DispatchRequest) -> Result<Message, DomainError> {
        if request.body.trim().is_empty() {
            return Err(DomainError::Validation("message body is empty".into()));
        }
        if request.to_address.trim().is_empty() {
            return Err(DomainError::Validation("to_address is empty".into()));
        }

        let allowed = self
            .gate
            .can_send(request.recipient, request.channel, request.category)
            .await?;
        if !allowed {
            let category = request
                .category
                .map(|c| c.as_str())
                .unwrap_or("uncategorized");
            return Err(DomainError::OptedOut(format!(
                "{} {} opted out of {} on {}",
                request.recipient.kind.as_str(),
                request.recipient.id,
                category,
                request.channel.as_str(),
            )));
        }

        let provider = self
            .registry
            .resolve(request.channel, request.provider)
            .ok_or_else(|| {
                DomainError::Validation(format!(
                    "no provider configured for channel {}",
                    request.channel.as_str()
                ))
            })?;

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
            direction: Direction::Outbound,
            channel: request.channel,
            provider,
            category: request.category,
            status: MessageStatus::Pending,
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

    /// Pushes an already persisted `Pending`/`Scheduled` message through its
    /// provider. Used by the queue worker and by retry.
    pub async fn dispatch_existing(&self, message_id: Uuid) -> Result<Message, DomainError> {
        let message = self
            .messages
            .get(message_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("message {message_id}")))?;

        match message.status {
            MessageStatus::Pending | MessageStatus::Scheduled => {}
            other => {
                return Err(DomainError::Validation(format!(
                    "message cannot be dispatched from status {other:?}"
                )));
            }
        }

        self.send(message).await
    }

    async fn send(&self, mut message: Message) -> Result<Message, DomainError> {
        let client = match self.registry.get(message.provider) {
            Some(client) => client,
            None => {
                let reason = format!(
                    "no adapter registered for provider {}",
                    message.provider.as_str()
                );
                self.mark_failed(&mut message, reason.clone()).await?;
                return Err(DomainError::Provider(reason));
            }
        };

        match client.send(&message).await {
            Ok(receipt) => {
                let status = MessageStatus::Sent;
                self.messages
                    .update_status(message.id, status.clone())
                    .await?;
                self.events
                    .append(DeliveryEvent::new(
                        message.id,
                        DeliveryEventKind::Sent,
                        receipt.provider_message_id,
                    ))
                    .await?;
                message.status = status;
                message.updated_at = Utc::now();
                Ok(message)
            }
            Err(err) => {
                let reason = err.to_string();
                self.mark_failed(&mut message, reason.clone()).await?;
                Err(DomainError::Provider(reason))
            }
        }
    }

    async fn mark_failed(
        &self,
        message: &mut Message,
        reason: String,
    ) -> Result<(), DomainError> {
        let status = MessageStatus::Failed {
            reason: reason.clone(),
        };
        self.messages
            .update_status(message.id, status.clone())
            .await?;
        self.events
            .append(DeliveryEvent::new(
                message.id,
                DeliveryEventKind::Failed,
                Some(reason),
            ))
            .await?;
        message.status = status;
        message.updated_at = Utc::now();
        Ok(())
    }
}
