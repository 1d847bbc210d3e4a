use std::sync::Arc;

use uuid::Uuid;

use crate::application::services::scheduler::Scheduler;
use crate::domain::errors::DomainError;

pub struct CancelScheduledUseCase {
    scheduler: Arc<Scheduler>,
}

impl CancelScheduledUseCase {
    pub fn new(scheduler: Arc<Scheduler>) -> Self {
        Self { scheduler }
    }

    pub async fn execute(&self, message_id: Uuid) -> Result<(), DomainError> {
        self.scheduler.cancel(message_id).await
    }
}
