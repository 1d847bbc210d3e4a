use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::handlers::dispatcher::{DispatchOrchestrator, DispatchRequest};
use crate::application::services::scheduler::Scheduler;
use crate::domain::errors::DomainError;
use crate::domain::models::Message;

/// Creates a message and defers its dispatch to a future time.
pub struct ScheduleMessageUseCase {
    orchestrator: Arc<DispatchOrchestrator>,
    scheduler: Arc<Scheduler>,
}

impl ScheduleMessageUseCase {
    pub fn new(orchestrator: Arc<DispatchOrchestrator>, scheduler: Arc<Scheduler>) -> Self {
        Self {
            orchestrator,
            scheduler,
        }
    }

    pub async fn execute(
        &self,
        request: DispatchRequest,
        send_at: DateTime<Utc>,
    ) -> Result<Message, DomainError> {
        // Reject a past timestamp before the record exists.
        if send_at <= Utc::now() {
            return Err(DomainError::Validation(
                "scheduled time must be in the future".into(),
            ));
        }

        let message = self.orchestrator.prepare(request).await?;
        self.scheduler.schedule(message.id, send_at).await?;
        Ok(message)
    }
}
