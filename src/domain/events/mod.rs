use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Queue payload for a deferred dispatch. The message record is the source
/// of truth; the job only carries identity and the due time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchJob {
    pub job_id: Uuid,
    pub message_id: Uuid,
    pub due_at: DateTime<Utc>,
    pub enqueued_at: DateTime<Utc>,
}

impl DispatchJob {
    pub fn new(message_id: Uuid, due_at: DateTime<Utc>) -> Self {
        Self {
            job_id: Uuid::new_v4(),
            message_id,
            due_at,
            enqueued_at: Utc::now(),
        }
    }
}
