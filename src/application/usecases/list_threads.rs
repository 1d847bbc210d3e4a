use std::sync::Arc;

use crate::domain::models::{RecipientRef, Thread};
use crate::domain::repositories::ThreadRepository;

pub struct ListThreadsUseCase {
    repo: Arc<dyn ThreadRepository>,
}

impl ListThreadsUseCase {
    pub fn new(repo: Arc<dyn ThreadRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, recipient: RecipientRef) -> anyhow::Result<Vec<Thread>> {
        self.repo.list_by_recipient(recipient).await
    }
}
