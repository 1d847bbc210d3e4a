use std::sync::Arc;
use std::time::Duration;

use async_nats::jetstream::{
    self, AckKind,
    consumer::{AckPolicy, PullConsumer, pull},
};
use async_trait::async_trait;
use chrono::Utc;
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;

use crate::application::handlers::dispatcher::DispatchOrchestrator;
use crate::application::services::dispatch_bus::DispatchBus;
use crate::domain::errors::DomainError;
use crate::domain::events::DispatchJob;
use crate::domain::models::MessageStatus;
use crate::domain::repositories::MessageRepository;

#[derive(Debug, Clone)]
pub struct JetstreamConfig {
    pub url: String,
    pub stream: String,
    pub subject: String,
    pub durable: String,
    pub pull_batch: usize,
    pub ack_wait_seconds: u64,
    pub max_deliver: i64,
}

pub struct JetstreamBus {
    context: jetstream::Context,
    subject: String,
}

impl JetstreamBus {
    pub async fn new(config: &JetstreamConfig) -> anyhow::Result<(Arc<Self>, JetstreamWorker)> {
        let client = async_nats::connect(&config.url).await?;
        let context = jetstream::new(client);

        let stream = context
            .get_or_create_stream(jetstream::stream::Config {
                name: config.stream.clone(),
                subjects: vec![config.subject.clone()],
                ..Default::default()
            })
            .await?;

        let consumer = stream
            .get_or_create_consumer(
                &config.durable,
                pull::Config {
                    durable_name: Some(config.durable.clone()),
                    ack_policy: AckPolicy::Explicit,
                    ack_wait: Duration::from_secs(config.ack_wait_seconds),
                    max_deliver: config.max_deliver,
                    ..Default::default()
                },
            )
            .await?;

        let bus = Arc::new(Self {
            context: context.clone(),
            subject: config.subject.clone(),
        });

        let worker = JetstreamWorker {
            consumer,
            pull_batch: config.pull_batch,
        };

        Ok((bus, worker))
    }
}

#[async_trait]
impl DispatchBus for JetstreamBus {
    async fn enqueue(&self, job: DispatchJob) -> anyhow::Result<()> {
        let payload = serde_json::to_vec(&job)?;
        self.context
            .publish(self.subject.clone(), payload.into())
            .await?;
        Ok(())
    }
}

/// Durable pull consumer draining dispatch jobs. One worker per durable name
/// keeps the single-writer-per-message discipline.
pub struct JetstreamWorker {
    consumer: PullConsumer,
    pull_batch: usize,
}

impl JetstreamWorker {
    pub fn spawn(
        self,
        orchestrator: Arc<DispatchOrchestrator>,
        messages: Arc<dyn MessageRepository>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            if let Err(err) = self.run(orchestrator, messages).await {
                tracing::error!("jetstream worker stopped: {err:?}");
            }
        })
    }

    async fn run(
        self,
        orchestrator: Arc<DispatchOrchestrator>,
        messages: Arc<dyn MessageRepository>,
    ) -> anyhow::Result<()> {
        loop {
            let mut batch = self
                .consumer
                .batch()
                .max_messages(self.pull_batch)
                .messages()
                .await?;
            while let Some(delivery) = batch.next().await {
                match delivery {
                    Ok(msg) => {
                        if let Err(err) =
                            Self::process_job(msg, orchestrator.clone(), messages.clone()).await
                        {
                            tracing::warn!("failed to process dispatch job: {err:?}");
                        }
                    }
                    Err(err) => {
                        tracing::warn!("jetstream batch error: {err:?}");
                    }
                }
            }
        }
    }

    async fn process_job(
        delivery: jetstream::Message,
        orchestrator: Arc<DispatchOrchestrator>,
        messages: Arc<dyn MessageRepository>,
    ) -> anyhow::Result<()> {
        let job: DispatchJob = serde_json::from_slice(&delivery.payload)?;

        // Cancellation is best-effort: a job whose message is no longer
        // pending or scheduled is simply dropped.
        let current = messages.get(job.message_id).await?;
        let dispatchable = matches!(
            current.as_ref().map(|m| &m.status),
            Some(MessageStatus::Pending) | Some(MessageStatus::Scheduled)
        );
        if !dispatchable {
            ack(&delivery).await?;
            return Ok(());
        }

        let now = Utc::now();
        if job.due_at > now {
            let delay = (job.due_at - now)
                .to_std()
                .unwrap_or(Duration::from_secs(1));
            delivery
                .ack_with(AckKind::Nak(Some(delay)))
                .await
                .map_err(|e| anyhow::anyhow!("failed to nak dispatch job: {e}"))?;
            return Ok(());
        }

        match orchestrator.dispatch_existing(job.message_id).await {
            Ok(_) => {}
            // Provider failures are recorded on the message; the job is done.
            // No automatic retry here, an explicit retry creates a new record.
            Err(DomainError::Provider(reason)) => {
                tracing::warn!(message_id = %job.message_id, "provider failure: {reason}");
            }
            Err(err) => {
                tracing::warn!(message_id = %job.message_id, "dispatch job error: {err:?}");
            }
        }
        ack(&delivery).await
    }
}

async fn ack(delivery: &jetstream::Message) -> anyhow::Result<()> {
    delivery
        .ack()
        .await
        .map_err(|e| anyhow::anyhow!("failed to ack dispatch job: {e}"))
}
