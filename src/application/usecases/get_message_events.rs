use std::sync::Arc;

use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::models::DeliveryEvent;
use crate::domain::repositories::{DeliveryEventRepository, MessageRepository};

pub struct GetMessageEventsUseCase {
    messages: Arc<dyn MessageRepository>,
    events: Arc<dyn DeliveryEventRepository>,
}

impl GetMessageEventsUseCase {
    pub fn new(
        messages: Arc<dyn MessageRepository>,
        events: Arc<dyn DeliveryEventRepository>,
    ) -> Self {
        Self { messages, events }
    }

    pub async fn execute(&self, message_id: Uuid) -> Result<Vec<DeliveryEvent>, DomainError> {
        self.messages
            .get(message_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("message {message_id}")))?;
        Ok(self.events.list_by_message(message_id).await?)
    }
}
