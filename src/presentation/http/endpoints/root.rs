use std::sync::Arc;

use poem_openapi::Tags;

use crate::application::usecases::{
    cancel_scheduled::CancelScheduledUseCase, get_message::GetMessageUseCase,
    get_message_events::GetMessageEventsUseCase,
    get_preference_audit::GetPreferenceAuditUseCase, list_messages::ListMessagesUseCase,
    list_preferences::ListPreferencesUseCase, list_thread_messages::ListThreadMessagesUseCase,
    list_threads::ListThreadsUseCase, record_event::RecordEventUseCase,
    record_inbound::RecordInboundUseCase, reschedule_message::RescheduleMessageUseCase,
    retry_message::RetryMessageUseCase, schedule_message::ScheduleMessageUseCase,
    send_message::SendMessageUseCase, update_preference::UpdatePreferenceUseCase,
};
use crate::domain::errors::DomainError;

#[derive(Clone)]
pub struct ApiState {
    pub send_message: Arc<SendMessageUseCase>,
    pub schedule_message: Arc<ScheduleMessageUseCase>,
    pub cancel_scheduled: Arc<CancelScheduledUseCase>,
    pub reschedule_message: Arc<RescheduleMessageUseCase>,
    pub retry_message: Arc<RetryMessageUseCase>,
    pub record_event: Arc<RecordEventUseCase>,
    pub record_inbound: Arc<RecordInboundUseCase>,
    pub list_messages: Arc<ListMessagesUseCase>,
    pub get_message: Arc<GetMessageUseCase>,
    pub get_message_events: Arc<GetMessageEventsUseCase>,
    pub list_threads: Arc<ListThreadsUseCase>,
    pub list_thread_messages: Arc<ListThreadMessagesUseCase>,
    pub update_preference: Arc<UpdatePreferenceUseCase>,
    pub list_preferences: Arc<ListPreferencesUseCase>,
    pub get_preference_audit: Arc<GetPreferenceAuditUseCase>,
}

/// Enum of API sections (tags)
#[derive(Tags)]
pub enum EndpointsTags {
    Health,
    Messages,
    Threads,
    Preferences,
    Events,
}

pub struct Endpoints;

pub fn map_domain_error(err: DomainError) -> poem::Error {
    use poem::http::StatusCode;
    let status = match &err {
        DomainError::OptedOut(_) => StatusCode::FORBIDDEN,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Provider(_) => StatusCode::BAD_GATEWAY,
        DomainError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    poem::Error::from_string(err.to_string(), status)
}

pub fn internal_error(err: anyhow::Error) -> poem::Error {
    poem::Error::from_string(
        err.to_string(),
        poem::http::StatusCode::INTERNAL_SERVER_ERROR,
    )
}
