use chrono::{DateTime, Utc};
use poem_openapi::Object;
use uuid::Uuid;

use crate::presentation::models::{
    CategoryKind, ChannelKind, EventKind, ProviderName, RecipientRefDto,
};

#[derive(Object, Debug)]
pub struct SendMessageRequestDto {
    pub recipient: RecipientRefDto,
    pub channel: ChannelKind,
    pub provider: Option<ProviderName>,
    pub category: Option<CategoryKind>,
    #[oai(validator(max_length = 998))]
    pub subject: Option<String>,
    #[oai(validator(min_length = 1, max_length = 65536))]
    pub body: String,
    #[oai(validator(min_length = 1))]
    pub from_address: String,
    #[oai(validator(min_length = 1))]
    pub to_address: String,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Object, Debug)]
pub struct ScheduleMessageRequestDto {
    pub message: SendMessageRequestDto,
    pub send_at: DateTime<Utc>,
}

#[derive(Object, Debug)]
pub struct RescheduleMessageRequestDto {
    pub send_at: DateTime<Utc>,
}

#[derive(Object, Debug)]
pub struct InboundMessageRequestDto {
    pub recipient: RecipientRefDto,
    pub channel: ChannelKind,
    pub provider: Option<ProviderName>,
    pub category: Option<CategoryKind>,
    #[oai(validator(max_length = 998))]
    pub subject: Option<String>,
    #[oai(validator(min_length = 1, max_length = 65536))]
    pub body: String,
    #[oai(validator(min_length = 1))]
    pub from_address: String,
    #[oai(validator(min_length = 1))]
    pub to_address: String,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Object, Debug)]
pub struct ProviderEventRequestDto {
    pub message_id: Uuid,
    pub kind: EventKind,
    pub detail: Option<String>,
}

#[derive(Object, Debug)]
pub struct PreferenceUpdateRequestDto {
    pub recipient: RecipientRefDto,
    pub channel: ChannelKind,
    pub category: CategoryKind,
    pub reason: Option<String>,
    pub actor_ip: Option<String>,
    pub actor_user_agent: Option<String>,
}
