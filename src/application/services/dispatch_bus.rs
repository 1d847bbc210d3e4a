use async_trait::async_trait;

use crate::domain::events::DispatchJob;

/// Fire-and-forget handoff to the external job queue.
#[async_trait]
pub trait DispatchBus: Send + Sync {
    async fn enqueue(&self, job: DispatchJob) -> anyhow::Result<()>;
}
