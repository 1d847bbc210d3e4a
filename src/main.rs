use std::sync::Arc;

use chrono::Duration;
use poem::{Route, Server, listener::TcpListener};
use poem_openapi::OpenApiService;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use unicomm::application::handlers::dispatcher::DispatchOrchestrator;
use unicomm::application::services::{
    preferences::PreferenceGate,
    provider::{ProviderClient, ProviderRegistry},
    scheduler::{Scheduler, spawn_sweeper},
    threads::ThreadGrouper,
};
use unicomm::application::usecases::{
    cancel_scheduled::CancelScheduledUseCase, get_message::GetMessageUseCase,
    get_message_events::GetMessageEventsUseCase,
    get_preference_audit::GetPreferenceAuditUseCase, list_messages::ListMessagesUseCase,
    list_preferences::ListPreferencesUseCase, list_thread_messages::ListThreadMessagesUseCase,
    list_threads::ListThreadsUseCase, record_event::RecordEventUseCase,
    record_inbound::RecordInboundUseCase, reschedule_message::RescheduleMessageUseCase,
    retry_message::RetryMessageUseCase, schedule_message::ScheduleMessageUseCase,
    send_message::SendMessageUseCase, update_preference::UpdatePreferenceUseCase,
};
use unicomm::config::Config;
use unicomm::domain::models::{Channel, ProviderKind};
use unicomm::domain::repositories::{
    DeliveryEventRepository, MessageRepository, PreferenceRepository, ThreadRepository,
};
use unicomm::infrastructure::providers::{
    GmailRelayProvider, PortalProvider, SesProvider, SmtpProvider, TwilioProvider,
};
use unicomm::infrastructure::queue::jetstream::JetstreamBus;
use unicomm::infrastructure::repositories::postgres::{
    PostgresDeliveryEventRepository, PostgresMessageRepository, PostgresPreferenceRepository,
    PostgresThreadRepository,
};
use unicomm::presentation::http::endpoints::{
    events::EventsEndpoints,
    messages::MessagesEndpoints,
    preferences::PreferencesEndpoints,
    root::{ApiState, Endpoints},
    threads::ThreadsEndpoints,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::try_parse().map_err(|e| anyhow::anyhow!(e))?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!().run(&pool).await?;

    let messages: Arc<dyn MessageRepository> = PostgresMessageRepository::new(pool.clone());
    let threads: Arc<dyn ThreadRepository> = PostgresThreadRepository::new(pool.clone());
    let preferences: Arc<dyn PreferenceRepository> =
        PostgresPreferenceRepository::new(pool.clone());
    let events: Arc<dyn DeliveryEventRepository> =
        PostgresDeliveryEventRepository::new(pool.clone());

    let mut clients: Vec<Arc<dyn ProviderClient>> = vec![PortalProvider::new()];
    if let Some(smtp) = &config.smtp {
        clients.push(SmtpProvider::new(smtp)?);
    }
    if let Some(gmail) = &config.gmail {
        clients.push(GmailRelayProvider::new(gmail));
    }
    if let Some(ses) = &config.ses {
        clients.push(SesProvider::new(ses));
    }
    if let Some(twilio) = &config.twilio {
        clients.push(TwilioProvider::new(twilio));
    }
    let registry = ProviderRegistry::new(clients)
        .with_default(Channel::Email, config.default_email_provider)
        .with_default(Channel::Sms, ProviderKind::Twilio)
        .with_default(Channel::Portal, ProviderKind::Portal);

    let (bus, worker) = JetstreamBus::new(&config.jetstream).await?;

    let gate = Arc::new(PreferenceGate::new(preferences.clone()));
    let grouper = Arc::new(ThreadGrouper::with_window(
        threads.clone(),
        Duration::days(config.thread_window_days),
    ));
    let scheduler = Arc::new(Scheduler::new(messages.clone(), bus.clone()));
    let orchestrator = Arc::new(DispatchOrchestrator::new(
        messages.clone(),
        events.clone(),
        gate.clone(),
        grouper.clone(),
        registry,
    ));

    let _worker = worker.spawn(orchestrator.clone(), messages.clone());
    let _sweeper = spawn_sweeper(scheduler.clone(), config.sweep_interval_secs);

    let state = Arc::new(ApiState {
        send_message: Arc::new(SendMessageUseCase::new(orchestrator.clone())),
        schedule_message: Arc::new(ScheduleMessageUseCase::new(
            orchestrator.clone(),
            scheduler.clone(),
        )),
        cancel_scheduled: Arc::new(CancelScheduledUseCase::new(scheduler.clone())),
        reschedule_message: Arc::new(RescheduleMessageUseCase::new(scheduler.clone())),
        retry_message: Arc::new(RetryMessageUseCase::new(
            messages.clone(),
            orchestrator.clone(),
        )),
        record_event: Arc::new(RecordEventUseCase::new(
            messages.clone(),
            events.clone(),
            gate.clone(),
        )),
        record_inbound: Arc::new(RecordInboundUseCase::new(messages.clone(), grouper.clone())),
        list_messages: Arc::new(ListMessagesUseCase::new(messages.clone())),
        get_message: Arc::new(GetMessageUseCase::new(messages.clone())),
        get_message_events: Arc::new(GetMessageEventsUseCase::new(
            messages.clone(),
            events.clone(),
        )),
        list_threads: Arc::new(ListThreadsUseCase::new(threads.clone())),
        list_thread_messages: Arc::new(ListThreadMessagesUseCase::new(
            threads.clone(),
            messages.clone(),
        )),
        update_preference: Arc::new(UpdatePreferenceUseCase::new(gate.clone())),
        list_preferences: Arc::new(ListPreferencesUseCase::new(gate.clone())),
        get_preference_audit: Arc::new(GetPreferenceAuditUseCase::new(gate.clone())),
    });

    let server_url = format!("{}://{}:{}", config.scheme, config.host, config.port);
    tracing::info!("starting server at {server_url}");

    let api_service = OpenApiService::new(
        (
            Endpoints,
            MessagesEndpoints::new(state.clone()),
            ThreadsEndpoints::new(state.clone()),
            PreferencesEndpoints::new(state.clone()),
            EventsEndpoints::new(state.clone()),
        ),
        "Unicomm API",
        "0.1.0",
    )
    .server(format!("{server_url}/api"));
    let ui = api_service.swagger_ui();
    let app = Route::new().nest("/api", api_service).nest("/", ui);

    Server::new(TcpListener::bind(format!("0.0.0.0:{}", config.port)))
        .run(app)
        .await?;
    Ok(())
}
