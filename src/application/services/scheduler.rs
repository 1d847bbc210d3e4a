use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::events::DispatchJob;
use crate::domain::models::MessageStatus;
use crate::domain::repositories::MessageRepository;

use super::dispatch_bus::DispatchBus;

pub const DEFAULT_SWEEP_GRACE_SECS: i64 = 60;

/// Deferred-delivery control: schedule, cancel, reschedule, and the overdue
/// sweep that re-enqueues jobs the queue lost.
pub struct Scheduler {
    messages: Arc<dyn MessageRepository>,
    bus: Arc<dyn DispatchBus>,
    sweep_grace: Duration,
}

impl Scheduler {
    pub fn new(messages: Arc<dyn MessageRepository>, bus: Arc<dyn DispatchBus>) -> Self {
        Self::with_grace(messages, bus, Duration::seconds(DEFAULT_SWEEP_GRACE_SECS))
    }

    pub fn with_grace(
        messages: Arc<dyn MessageRepository>,
        bus: Arc<dyn DispatchBus>,
        sweep_grace: Duration,
    ) -> Self {
        Self {
            messages,
            bus,
            sweep_grace,
        }
    }

    pub async fn schedule(
        &self,
        message_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if at <= Utc::now() {
            return Err(DomainError::Validation(
                "scheduled time must be in the future".into(),
            ));
        }

        let message = self
            .messages
            .get(message_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("message {message_id}")))?;

        match message.status {
            MessageStatus::Pending => {}
            MessageStatus::Sent | MessageStatus::Delivered => {
                return Err(DomainError::Validation(
                    "message has already been sent".into(),
                ));
            }
            other => {
                return Err(DomainError::Validation(format!(
                    "message cannot be scheduled from status {other:?}"
                )));
            }
        }

        self.messages
            .set_schedule(message_id, MessageStatus::Scheduled, Some(at))
            .await?;
        self.bus.enqueue(DispatchJob::new(message_id, at)).await?;
        Ok(())
    }

    /// Marks a scheduled message cancelled. Removing the queued job is
    /// best-effort: the worker drops jobs whose message is no longer
    /// scheduled.
    pub async fn cancel(&self, message_id: Uuid) -> Result<(), DomainError> {
        let message = self
            .messages
            .get(message_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("message {message_id}")))?;

        if message.status != MessageStatus::Scheduled {
            return Err(DomainError::Validation(
                "message is not scheduled".into(),
            ));
        }

        self.messages
            .set_schedule(message_id, MessageStatus::Cancelled, None)
            .await?;
        Ok(())
    }

    pub async fn reschedule(
        &self,
        message_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if at <= Utc::now() {
            return Err(DomainError::Validation(
                "scheduled time must be in the future".into(),
            ));
        }

        let message = self
            .messages
            .get(message_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("message {message_id}")))?;

        if message.status != MessageStatus::Scheduled {
            return Err(DomainError::Validation(
                "message is not scheduled".into(),
            ));
        }

        self.messages
            .set_schedule(message_id, MessageStatus::Scheduled, Some(at))
            .await?;
        self.bus.enqueue(DispatchJob::new(message_id, at)).await?;
        Ok(())
    }

    /// Re-enqueues scheduled messages whose due time passed more than the
    /// grace period ago. Safety net against lost queue jobs.
    pub async fn sweep(&self) -> Result<u32, DomainError> {
        let cutoff = Utc::now() - self.sweep_grace;
        let overdue = self.messages.list_scheduled_due(cutoff).await?;

        let mut enqueued = 0;
        for message in overdue {
            self.bus
                .enqueue(DispatchJob::new(message.id, Utc::now()))
                .await?;
            enqueued += 1;
        }
        Ok(enqueued)
    }
}

/// Runs the sweep on an interval in a background task.
pub fn spawn_sweeper(scheduler: Arc<Scheduler>, interval_secs: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(interval_secs));
        loop {
            interval.tick().await;
            match scheduler.sweep().await {
                Ok(0) => {}
                Ok(n) => tracing::info!(re_enqueued = n, "sweep re-enqueued overdue messages"),
                Err(err) => tracing::warn!("sweep failed: {err:?}"),
            }
        }
    })
}
