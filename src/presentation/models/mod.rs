use poem_openapi::{Enum, Object};
use uuid::Uuid;

use crate::domain::models::{
    Category, Channel, DeliveryEventKind, Direction, MessageStatus, ProviderKind, RecipientKind,
    RecipientRef,
};

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum ChannelKind {
    #[oai(rename = "email")]
    Email,
    #[oai(rename = "sms")]
    Sms,
    #[oai(rename = "portal")]
    Portal,
}

impl From<ChannelKind> for Channel {
    fn from(value: ChannelKind) -> Self {
        match value {
            ChannelKind::Email => Channel::Email,
            ChannelKind::Sms => Channel::Sms,
            ChannelKind::Portal => Channel::Portal,
        }
    }
}

impl From<Channel> for ChannelKind {
    fn from(value: Channel) -> Self {
        match value {
            Channel::Email => ChannelKind::Email,
            Channel::Sms => ChannelKind::Sms,
            Channel::Portal => ChannelKind::Portal,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum ProviderName {
    #[oai(rename = "smtp")]
    Smtp,
    #[oai(rename = "gmail_relay")]
    GmailRelay,
    #[oai(rename = "ses")]
    Ses,
    #[oai(rename = "twilio")]
    Twilio,
    #[oai(rename = "portal")]
    Portal,
}

impl From<ProviderName> for ProviderKind {
    fn from(value: ProviderName) -> Self {
        match value {
            ProviderName::Smtp => ProviderKind::Smtp,
            ProviderName::GmailRelay => ProviderKind::GmailRelay,
            ProviderName::Ses => ProviderKind::Ses,
            ProviderName::Twilio => ProviderKind::Twilio,
            ProviderName::Portal => ProviderKind::Portal,
        }
    }
}

impl From<ProviderKind> for ProviderName {
    fn from(value: ProviderKind) -> Self {
        match value {
            ProviderKind::Smtp => ProviderName::Smtp,
            ProviderKind::GmailRelay => ProviderName::GmailRelay,
            ProviderKind::Ses => ProviderName::Ses,
            ProviderKind::Twilio => ProviderName::Twilio,
            ProviderKind::Portal => ProviderName::Portal,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum CategoryKind {
    #[oai(rename = "marketing")]
    Marketing,
    #[oai(rename = "transactional")]
    Transactional,
    #[oai(rename = "quotes")]
    Quotes,
    #[oai(rename = "documents")]
    Documents,
    #[oai(rename = "billing")]
    Billing,
}

impl From<CategoryKind> for Category {
    fn from(value: CategoryKind) -> Self {
        match value {
            CategoryKind::Marketing => Category::Marketing,
            CategoryKind::Transactional => Category::Transactional,
            CategoryKind::Quotes => Category::Quotes,
            CategoryKind::Documents => Category::Documents,
            CategoryKind::Billing => Category::Billing,
        }
    }
}

impl From<Category> for CategoryKind {
    fn from(value: Category) -> Self {
        match value {
            Category::Marketing => CategoryKind::Marketing,
            Category::Transactional => CategoryKind::Transactional,
            Category::Quotes => CategoryKind::Quotes,
            Category::Documents => CategoryKind::Documents,
            Category::Billing => CategoryKind::Billing,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum RecipientKindDto {
    #[oai(rename = "lead")]
    Lead,
    #[oai(rename = "account")]
    Account,
    #[oai(rename = "contact")]
    Contact,
}

impl From<RecipientKindDto> for RecipientKind {
    fn from(value: RecipientKindDto) -> Self {
        match value {
            RecipientKindDto::Lead => RecipientKind::Lead,
            RecipientKindDto::Account => RecipientKind::Account,
            RecipientKindDto::Contact => RecipientKind::Contact,
        }
    }
}

impl From<RecipientKind> for RecipientKindDto {
    fn from(value: RecipientKind) -> Self {
        match value {
            RecipientKind::Lead => RecipientKindDto::Lead,
            RecipientKind::Account => RecipientKindDto::Account,
            RecipientKind::Contact => RecipientKindDto::Contact,
        }
    }
}

#[derive(Object, Debug, Clone, Copy)]
pub struct RecipientRefDto {
    pub kind: RecipientKindDto,
    pub id: Uuid,
}

impl From<RecipientRefDto> for RecipientRef {
    fn from(value: RecipientRefDto) -> Self {
        RecipientRef {
            kind: value.kind.into(),
            id: value.id,
        }
    }
}

impl From<RecipientRef> for RecipientRefDto {
    fn from(value: RecipientRef) -> Self {
        RecipientRefDto {
            kind: value.kind.into(),
            id: value.id,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum DirectionKind {
    #[oai(rename = "outbound")]
    Outbound,
    #[oai(rename = "inbound")]
    Inbound,
}

impl From<Direction> for DirectionKind {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Outbound => DirectionKind::Outbound,
            Direction::Inbound => DirectionKind::Inbound,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum MessageStatusDto {
    Pending,
    Scheduled,
    Sent,
    Delivered,
    Failed,
    Bounced,
    Cancelled,
}

impl From<&MessageStatus> for MessageStatusDto {
    fn from(value: &MessageStatus) -> Self {
        match value {
            MessageStatus::Pending => MessageStatusDto::Pending,
            MessageStatus::Scheduled => MessageStatusDto::Scheduled,
            MessageStatus::Sent => MessageStatusDto::Sent,
            MessageStatus::Delivered => MessageStatusDto::Delivered,
            MessageStatus::Failed { .. } => MessageStatusDto::Failed,
            MessageStatus::Bounced { .. } => MessageStatusDto::Bounced,
            MessageStatus::Cancelled => MessageStatusDto::Cancelled,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum EventKind {
    #[oai(rename = "sent")]
    Sent,
    #[oai(rename = "delivered")]
    Delivered,
    #[oai(rename = "opened")]
    Opened,
    #[oai(rename = "clicked")]
    Clicked,
    #[oai(rename = "bounced")]
    Bounced,
    #[oai(rename = "failed")]
    Failed,
    #[oai(rename = "unsubscribed")]
    Unsubscribed,
}

impl From<EventKind> for DeliveryEventKind {
    fn from(value: EventKind) -> Self {
        match value {
            EventKind::Sent => DeliveryEventKind::Sent,
            EventKind::Delivered => DeliveryEventKind::Delivered,
            EventKind::Opened => DeliveryEventKind::Opened,
            EventKind::Clicked => DeliveryEventKind::Clicked,
            EventKind::Bounced => DeliveryEventKind::Bounced,
            EventKind::Failed => DeliveryEventKind::Failed,
            EventKind::Unsubscribed => DeliveryEventKind::Unsubscribed,
        }
    }
}

impl From<DeliveryEventKind> for EventKind {
    fn from(value: DeliveryEventKind) -> Self {
        match value {
            DeliveryEventKind::Sent => EventKind::Sent,
            DeliveryEventKind::Delivered => EventKind::Delivered,
            DeliveryEventKind::Opened => EventKind::Opened,
            DeliveryEventKind::Clicked => EventKind::Clicked,
            DeliveryEventKind::Bounced => EventKind::Bounced,
            DeliveryEventKind::Failed => EventKind::Failed,
            DeliveryEventKind::Unsubscribed => EventKind::Unsubscribed,
        }
    }
}
