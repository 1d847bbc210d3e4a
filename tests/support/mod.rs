#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Duration;
use uuid::Uuid;

use unicomm::application::handlers::dispatcher::{DispatchOrchestrator, DispatchRequest};
use unicomm::application::services::dispatch_bus::DispatchBus;
use unicomm::application::services::preferences::PreferenceGate;
use unicomm::application::services::provider::{
    ProviderClient, ProviderReceipt, ProviderRegistry,
};
use unicomm::application::services::scheduler::Scheduler;
use unicomm::application::services::threads::ThreadGrouper;
use unicomm::domain::events::DispatchJob;
use unicomm::domain::models::{
    Category, Channel, Message, ProviderKind, RecipientKind, RecipientRef,
};
use unicomm::domain::repositories::{
    DeliveryEventRepository, MessageRepository, PreferenceRepository, ThreadRepository,
};
use unicomm::infrastructure::repositories::in_memory::{
    InMemoryDeliveryEventRepository, InMemoryMessageRepository, InMemoryPreferenceRepository,
    InMemoryThreadRepository,
};

/// Provider double: records what it was asked to send and can be switched
/// into a failing mode.
pub struct StubProvider {
    kind: ProviderKind,
    fail_with: Mutex<Option<String>>,
    sent: Mutex<Vec<Uuid>>,
}

impl StubProvider {
    pub fn new(kind: ProviderKind) -> Arc<Self> {
        Arc::new(Self {
            kind,
            fail_with: Mutex::new(None),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn fail_with(&self, reason: &str) {
        *self.fail_with.lock().unwrap() = Some(reason.to_string());
    }

    pub fn succeed(&self) {
        *self.fail_with.lock().unwrap() = None;
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl ProviderClient for StubProvider {
    fn provider(&self) -> ProviderKind {
        self.kind
    }

    async fn send(&self, message: &Message) -> anyhow::Result<ProviderReceipt> {
        if let Some(reason) = self.fail_with.lock().unwrap().clone() {
            anyhow::bail!("{reason}");
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(message.id);
        Ok(ProviderReceipt {
            provider_message_id: Some(format!("stub-{}", sent.len())),
        })
    }
}

/// Bus double: collects enqueued jobs instead of talking to a queue.
#[derive(Default)]
pub struct RecordingBus {
    jobs: Mutex<Vec<DispatchJob>>,
}

impl RecordingBus {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn jobs(&self) -> Vec<DispatchJob> {
        self.jobs.lock().unwrap().clone()
    }
}

#[async_trait]
impl DispatchBus for RecordingBus {
    async fn enqueue(&self, job: DispatchJob) -> anyhow::Result<()> {
        self.jobs.lock().unwrap().push(job);
        Ok(())
    }
}

pub struct TestHarness {
    pub messages: Arc<dyn MessageRepository>,
    pub threads: Arc<dyn ThreadRepository>,
    pub preferences: Arc<dyn PreferenceRepository>,
    pub events: Arc<dyn DeliveryEventRepository>,
    pub gate: Arc<PreferenceGate>,
    pub grouper: Arc<ThreadGrouper>,
    pub orchestrator: Arc<DispatchOrchestrator>,
    pub scheduler: Arc<Scheduler>,
    pub bus: Arc<RecordingBus>,
    pub email: Arc<StubProvider>,
    pub sms: Arc<StubProvider>,
}

pub fn harness() -> TestHarness {
    let messages: Arc<dyn MessageRepository> = Arc::new(InMemoryMessageRepository::new());
    let threads: Arc<dyn ThreadRepository> = Arc::new(InMemoryThreadRepository::new());
    let preferences: Arc<dyn PreferenceRepository> =
        Arc::new(InMemoryPreferenceRepository::new());
    let events: Arc<dyn DeliveryEventRepository> =
        Arc::new(InMemoryDeliveryEventRepository::new());

    let email = StubProvider::new(ProviderKind::Smtp);
    let sms = StubProvider::new(ProviderKind::Twilio);
    let portal = StubProvider::new(ProviderKind::Portal);
    let registry = ProviderRegistry::new(vec![
        email.clone() as Arc<dyn ProviderClient>,
        sms.clone() as Arc<dyn ProviderClient>,
        portal as Arc<dyn ProviderClient>,
    ])
    .with_default(Channel::Email, ProviderKind::Smtp)
    .with_default(Channel::Sms, ProviderKind::Twilio)
    .with_default(Channel::Portal, ProviderKind::Portal);

    let gate = Arc::new(PreferenceGate::new(preferences.clone()));
    let grouper = Arc::new(ThreadGrouper::new(threads.clone()));
    let bus = RecordingBus::new();
    let scheduler = Arc::new(Scheduler::with_grace(
        messages.clone(),
        bus.clone(),
        Duration::seconds(60),
    ));
    let orchestrator = Arc::new(DispatchOrchestrator::new(
        messages.clone(),
        events.clone(),
        gate.clone(),
        grouper.clone(),
        registry,
    ));

    TestHarness {
        messages,
        threads,
        preferences,
        events,
        gate,
        grouper,
        orchestrator,
        scheduler,
        bus,
        email,
        sms,
    }
}

pub fn lead() -> RecipientRef {
    RecipientRef::new(RecipientKind::Lead, Uuid::new_v4())
}

pub fn email_request(recipient: RecipientRef, category: Option<Category>) -> DispatchRequest {
    DispatchRequest {
        recipient,
        channel: Channel::Email,
        provider: None,
        category,
        subject: Some("Your quote is ready".to_string()),
        body: "Hi, the quote you asked for is attached.".to_string(),
        from_address: "sales@dealer.example".to_string(),
        to_address: "buyer@example.com".to_string(),
        metadata: serde_json::json!({}),
    }
}

pub fn sms_request(recipient: RecipientRef, category: Option<Category>) -> DispatchRequest {
    DispatchRequest {
        recipient,
        channel: Channel::Sms,
        provider: None,
        category,
        subject: None,
        body: "Your vehicle is ready for pickup.".to_string(),
        from_address: "+15550100".to_string(),
        to_address: "+15550123".to_string(),
        metadata: serde_json::json!({}),
    }
}
