use std::sync::Arc;

use crate::domain::models::{Message, RecipientRef};
use crate::domain::repositories::MessageRepository;

pub struct PaginatedMessages {
    pub messages: Vec<Message>,
    pub has_more: bool,
    pub next_offset: Option<u32>,
}

pub struct ListMessagesUseCase {
    repo: Arc<dyn MessageRepository>,
}

impl ListMessagesUseCase {
    pub fn new(repo: Arc<dyn MessageRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        recipient: RecipientRef,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<PaginatedMessages> {
        let (messages, has_more) = self.repo.list_by_recipient(recipient, limit, offset).await?;
        let next_offset = has_more
            .then(|| offset.unwrap_or(0) + messages.len() as u32);
        Ok(PaginatedMessages {
            messages,
            has_more,
            next_offset,
        })
    }
}
