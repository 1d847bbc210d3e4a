use std::sync::Arc;

use crate::application::services::preferences::PreferenceGate;
use crate::domain::errors::DomainError;
use crate::domain::models::{ActorContext, Category, Channel, Preference, RecipientRef};

pub struct UpdatePreferenceRequest {
    pub recipient: RecipientRef,
    pub channel: Channel,
    pub category: Category,
    pub actor: ActorContext,
    pub reason: Option<String>,
}

pub struct UpdatePreferenceUseCase {
    gate: Arc<PreferenceGate>,
}

impl UpdatePreferenceUseCase {
    pub fn new(gate: Arc<PreferenceGate>) -> Self {
        Self { gate }
    }

    pub async fn opt_in(
        &self,
        request: UpdatePreferenceRequest,
    ) -> Result<Preference, DomainError> {
        Ok(self
            .gate
            .opt_in(
                request.recipient,
                request.channel,
                request.category,
                request.actor,
                request.reason,
            )
            .await?)
    }

    pub async fn opt_out(
        &self,
        request: UpdatePreferenceRequest,
    ) -> Result<Preference, DomainError> {
        Ok(self
            .gate
            .opt_out(
                request.recipient,
                request.channel,
                request.category,
                request.actor,
                request.reason,
            )
            .await?)
    }
}
