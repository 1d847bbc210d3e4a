use std::sync::Arc;

use uuid::Uuid;

use crate::application::services::preferences::PreferenceGate;
use crate::domain::errors::DomainError;
use crate::domain::models::{ActorContext, DeliveryEvent, DeliveryEventKind, Message};
use crate::domain::repositories::{DeliveryEventRepository, MessageRepository};

/// Ingests a provider delivery event: appends it to the audit trail and
/// applies the derived status transition when the monotonic invariant allows
/// it. An event implying a backward move is recorded but changes nothing.
pub struct RecordEventUseCase {
    messages: Arc<dyn MessageRepository>,
    events: Arc<dyn DeliveryEventRepository>,
    gate: Arc<PreferenceGate>,
}

impl RecordEventUseCase {
    pub fn new(
        messages: Arc<dyn MessageRepository>,
        events: Arc<dyn DeliveryEventRepository>,
        gate: Arc<PreferenceGate>,
    ) -> Self {
        Self {
            messages,
            events,
            gate,
        }
    }

    pub async fn execute(
        &self,
        message_id: Uuid,
        kind: DeliveryEventKind,
        detail: Option<String>,
    ) -> Result<Message, DomainError> {
        let mut message = self
            .messages
            .get(message_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("message {message_id}")))?;

        self.events
            .append(DeliveryEvent::new(message_id, kind, detail.clone()))
            .await?;

        if let Some(next) = kind.derived_status(detail.as_deref()) {
            if message.status.can_transition(&next) {
                self.messages.update_status(message_id, next.clone()).await?;
                message.status = next;
            } else if message.status != next {
                tracing::debug!(
                    message_id = %message_id,
                    event = kind.as_str(),
                    "event recorded without status change"
                );
            }
        }

        if kind == DeliveryEventKind::Unsubscribed {
            self.apply_unsubscribe(&message, detail).await?;
        }

        Ok(message)
    }

    async fn apply_unsubscribe(
        &self,
        message: &Message,
        detail: Option<String>,
    ) -> Result<(), DomainError> {
        let Some(category) = message.category else {
            return Ok(());
        };
        let reason =
            detail.unwrap_or_else(|| "unsubscribed via provider notification".to_string());
        self.gate
            .opt_out(
                message.recipient,
                message.channel,
                category,
                ActorContext::default(),
                Some(reason),
            )
            .await?;
        Ok(())
    }
}
