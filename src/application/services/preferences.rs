use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::models::{
    ActorContext, Category, Channel, Preference, PreferenceAudit, RecipientRef,
};
use crate::domain::repositories::PreferenceRepository;

/// Consent gate consulted before every outbound send.
pub struct PreferenceGate {
    repo: Arc<dyn PreferenceRepository>,
}

impl PreferenceGate {
    pub fn new(repo: Arc<dyn PreferenceRepository>) -> Self {
        Self { repo }
    }

    /// Transactional and uncategorized sends are always allowed; any other
    /// category requires an explicit opted-in record. Absence of a record is
    /// not consent for marketing-class categories.
    pub async fn can_send(
        &self,
        recipient: RecipientRef,
        channel: Channel,
        category: Option<Category>,
    ) -> anyhow::Result<bool> {
        let category = match category {
            None => return Ok(true),
            Some(category) if category.is_transactional() => return Ok(true),
            Some(category) => category,
        };

        let preference = self.repo.find(recipient, channel, category).await?;
        Ok(preference.map(|p| p.opted_in).unwrap_or(false))
    }

    pub async fn opt_in(
        &self,
        recipient: RecipientRef,
        channel: Channel,
        category: Category,
        actor: ActorContext,
        reason: Option<String>,
    ) -> anyhow::Result<Preference> {
        self.set_opted(recipient, channel, category, true, actor, reason)
            .await
    }

    pub async fn opt_out(
        &self,
        recipient: RecipientRef,
        channel: Channel,
        category: Category,
        actor: ActorContext,
        reason: Option<String>,
    ) -> anyhow::Result<Preference> {
        self.set_opted(recipient, channel, category, false, actor, reason)
            .await
    }

    pub async fn history(
        &self,
        recipient: RecipientRef,
        channel: Channel,
        category: Category,
    ) -> anyhow::Result<Vec<PreferenceAudit>> {
        self.repo.audit_history(recipient, channel, category).await
    }

    pub async fn list(&self, recipient: RecipientRef) -> anyhow::Result<Vec<Preference>> {
        self.repo.list_by_recipient(recipient).await
    }

    /// Idempotent upsert. Every call appends exactly one audit entry, even
    /// when the flag does not change.
    async fn set_opted(
        &self,
        recipient: RecipientRef,
        channel: Channel,
        category: Category,
        opted_in: bool,
        actor: ActorContext,
        reason: Option<String>,
    ) -> anyhow::Result<Preference> {
        let now = Utc::now();
        let preference = match self.repo.find(recipient, channel, category).await? {
            Some(mut existing) => {
                existing.opted_in = opted_in;
                existing.updated_at = now;
                existing
            }
            None => Preference {
                id: Uuid::new_v4(),
                recipient,
                channel,
                category,
                opted_in,
                created_at: now,
                updated_at: now,
            },
        };

        let preference = self.repo.upsert(preference).await?;
        self.repo
            .log_change(PreferenceAudit {
                id: Uuid::new_v4(),
                recipient,
                channel,
                category,
                opted_in,
                actor,
                reason,
                created_at: now,
            })
            .await?;

        Ok(preference)
    }
}
