use std::sync::Arc;

use crate::application::services::preferences::PreferenceGate;
use crate::domain::models::{Category, Channel, PreferenceAudit, RecipientRef};

pub struct GetPreferenceAuditUseCase {
    gate: Arc<PreferenceGate>,
}

impl GetPreferenceAuditUseCase {
    pub fn new(gate: Arc<PreferenceGate>) -> Self {
        Self { gate }
    }

    pub async fn execute(
        &self,
        recipient: RecipientRef,
        channel: Channel,
        category: Category,
    ) -> anyhow::Result<Vec<PreferenceAudit>> {
        self.gate.history(recipient, channel, category).await
    }
}
