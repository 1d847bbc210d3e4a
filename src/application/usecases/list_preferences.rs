use std::sync::Arc;

use crate::application::services::preferences::PreferenceGate;
use crate::domain::models::{Preference, RecipientRef};

pub struct ListPreferencesUseCase {
    gate: Arc<PreferenceGate>,
}

impl ListPreferencesUseCase {
    pub fn new(gate: Arc<PreferenceGate>) -> Self {
        Self { gate }
    }

    pub async fn execute(&self, recipient: RecipientRef) -> anyhow::Result<Vec<Preference>> {
        self.gate.list(recipient).await
    }
}
