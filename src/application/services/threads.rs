use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::domain::models::{Channel, RecipientRef, Thread};
use crate::domain::repositories::ThreadRepository;

pub const DEFAULT_ACTIVE_WINDOW_DAYS: i64 = 30;

/// Groups messages into conversations by (recipient, channel).
pub struct ThreadGrouper {
    repo: Arc<dyn ThreadRepository>,
    window: Duration,
}

impl ThreadGrouper {
    pub fn new(repo: Arc<dyn ThreadRepository>) -> Self {
        Self::with_window(repo, Duration::days(DEFAULT_ACTIVE_WINDOW_DAYS))
    }

    pub fn with_window(repo: Arc<dyn ThreadRepository>, window: Duration) -> Self {
        Self { repo, window }
    }

    /// Returns the active thread for the pair, touching its activity marker,
    /// or creates a new one when none is active within the window.
    pub async fn resolve(
        &self,
        recipient: RecipientRef,
        channel: Channel,
        subject: Option<&str>,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Thread> {
        if let Some(mut thread) = self.repo.find_latest(recipient, channel).await? {
            if thread.is_active(now, self.window) {
                self.repo.touch(thread.id, now).await?;
                thread.last_message_at = now;
                return Ok(thread);
            }
        }

        let thread = Thread::new(recipient, channel, subject.map(str::to_string), now);
        self.repo.insert(thread).await
    }
}
