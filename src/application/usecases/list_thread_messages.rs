use std::sync::Arc;

use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::models::Message;
use crate::domain::repositories::{MessageRepository, ThreadRepository};

pub struct ListThreadMessagesUseCase {
    threads: Arc<dyn ThreadRepository>,
    messages: Arc<dyn MessageRepository>,
}

impl ListThreadMessagesUseCase {
    pub fn new(
        threads: Arc<dyn ThreadRepository>,
        messages: Arc<dyn MessageRepository>,
    ) -> Self {
        Self { threads, messages }
    }

    pub async fn execute(&self, thread_id: Uuid) -> Result<Vec<Message>, DomainError> {
        self.threads
            .get(thread_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("thread {thread_id}")))?;
        Ok(self.messages.list_by_thread(thread_id).await?)
    }
}
