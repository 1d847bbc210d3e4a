use poem_openapi::Object;
use uuid::Uuid;

use crate::presentation::models::{
    CategoryKind, ChannelKind, DirectionKind, EventKind, MessageStatusDto, ProviderName,
    RecipientRefDto,
};

#[derive(Object)]
pub struct MessageDto {
    pub id: Uuid,
    pub recipient: RecipientRefDto,
    pub direction: DirectionKind,
    pub channel: ChannelKind,
    pub provider: ProviderName,
    pub category: Option<CategoryKind>,
    pub status: MessageStatusDto,
    pub last_error: Option<String>,
    pub subject: Option<String>,
    pub body: String,
    pub from_address: String,
    pub to_address: String,
    pub thread_id: Uuid,
    pub scheduled_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Object)]
pub struct PaginatedMessagesDto {
    pub messages: Vec<MessageDto>,
    pub has_more: bool,
    pub next_offset: Option<u32>,
}

#[derive(Object)]
pub struct ThreadDto {
    pub id: Uuid,
    pub recipient: RecipientRefDto,
    pub channel: ChannelKind,
    pub subject: Option<String>,
    pub last_message_at: String,
    pub created_at: String,
}

#[derive(Object)]
pub struct DeliveryEventDto {
    pub id: Uuid,
    pub message_id: Uuid,
    pub kind: EventKind,
    pub detail: Option<String>,
    pub occurred_at: String,
}

#[derive(Object)]
pub struct PreferenceDto {
    pub recipient: RecipientRefDto,
    pub channel: ChannelKind,
    pub category: CategoryKind,
    pub opted_in: bool,
    pub updated_at: String,
}

#[derive(Object)]
pub struct PreferenceAuditDto {
    pub id: Uuid,
    pub recipient: RecipientRefDto,
    pub channel: ChannelKind,
    pub category: CategoryKind,
    pub opted_in: bool,
    pub actor_ip: Option<String>,
    pub actor_user_agent: Option<String>,
    pub reason: Option<String>,
    pub created_at: String,
}
