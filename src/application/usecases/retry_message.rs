use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::application::handlers::dispatcher::DispatchOrchestrator;
use crate::domain::errors::DomainError;
use crate::domain::models::{Message, MessageStatus};
use crate::domain::repositories::MessageRepository;

/// Retries a failed or bounced send by creating a brand-new record. The
/// original record keeps its terminal status untouched.
pub struct RetryMessageUseCase {
    messages: Arc<dyn MessageRepository>,
    orchestrator: Arc<DispatchOrchestrator>,
}

impl RetryMessageUseCase {
    pub fn new(
        messages: Arc<dyn MessageRepository>,
        orchestrator: Arc<DispatchOrchestrator>,
    ) -> Self {
        Self {
            messages,
            orchestrator,
        }
    }

    pub async fn execute(&self, message_id: Uuid) -> Result<Message, DomainError> {
        let original = self
            .messages
            .get(message_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("message {message_id}")))?;

        match original.status {
            MessageStatus::Failed { .. } | MessageStatus::Bounced { .. } => {}
            other => {
                return Err(DomainError::Validation(format!(
                    "only failed or bounced messages can be retried, not {other:?}"
                )));
            }
        }

        let now = Utc::now();
        let mut metadata = original.metadata.clone();
        if let Some(map) = metadata.as_object_mut() {
            map.insert(
                "retry_of".to_string(),
                serde_json::Value::String(original.id.to_string()),
            );
        } else {
            metadata = serde_json::json!({ "retry_of": original.id.to_string() });
        }

        let copy = Message {
            id: Uuid::new_v4(),
            status: MessageStatus::Pending,
            metadata,
            scheduled_at: None,
            created_at: now,
            updated_at: now,
            ..original
        };
        let copy = self.messages.insert(copy).await?;

        self.orchestrator.dispatch_existing(copy.id).await
    }
}
