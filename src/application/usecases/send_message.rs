use std::sync::Arc;

use crate::application::handlers::dispatcher::{DispatchOrchestrator, DispatchRequest};
use crate::domain::errors::DomainError;
use crate::domain::models::Message;

pub struct SendMessageUseCase {
    orchestrator: Arc<DispatchOrchestrator>,
}

impl SendMessageUseCase {
    pub fn new(orchestrator: Arc<DispatchOrchestrator>) -> Self {
        Self { orchestrator }
    }

    pub async fn execute(&self, request: DispatchRequest) -> Result<Message, DomainError> {
        self.orchestrator.dispatch(request).await
    }
}
