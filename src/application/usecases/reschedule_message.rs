use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::application::services::scheduler::Scheduler;
use crate::domain::errors::DomainError;

pub struct RescheduleMessageUseCase {
    scheduler: Arc<Scheduler>,
}

impl RescheduleMessageUseCase {
    pub fn new(scheduler: Arc<Scheduler>) -> Self {
        Self { scheduler }
    }

    pub async fn execute(
        &self,
        message_id: Uuid,
        send_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.scheduler.reschedule(message_id, send_at).await
    }
}
