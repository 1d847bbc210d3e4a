use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::channel::{Category, Channel};
use super::recipient::RecipientRef;

/// Per-recipient, per-channel, per-category consent record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preference {
    pub id: Uuid,
    pub recipient: RecipientRef,
    pub channel: Channel,
    pub category: Category,
    pub opted_in: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Who performed a preference change, for the compliance trail.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActorContext {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

/// Append-only record of one consent change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceAudit {
    pub id: Uuid,
    pub recipient: RecipientRef,
    pub channel: Channel,
    pub category: Category,
    pub opted_in: bool,
    pub actor: ActorContext,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}
