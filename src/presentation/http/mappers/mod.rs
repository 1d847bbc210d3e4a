use crate::domain::models::{DeliveryEvent, Message, Preference, PreferenceAudit, Thread};
use crate::presentation::http::responses::{
    DeliveryEventDto, MessageDto, PreferenceAuditDto, PreferenceDto, ThreadDto,
};
use crate::presentation::models::MessageStatusDto;

pub fn map_message(message: &Message) -> MessageDto {
    MessageDto {
        id: message.id,
        recipient: message.recipient.into(),
        direction: message.direction.into(),
        channel: message.channel.into(),
        provider: message.provider.into(),
        category: message.category.map(Into::into),
        status: MessageStatusDto::from(&message.status),
        last_error: message.last_error().map(str::to_string),
        subject: message.subject.clone(),
        body: message.body.clone(),
        from_address: message.from_address.clone(),
        to_address: message.to_address.clone(),
        thread_id: message.thread_id,
        scheduled_at: message.scheduled_at.map(|at| at.to_rfc3339()),
        created_at: message.created_at.to_rfc3339(),
        updated_at: message.updated_at.to_rfc3339(),
    }
}

pub fn map_thread(thread: &Thread) -> ThreadDto {
    ThreadDto {
        id: thread.id,
        recipient: thread.recipient.into(),
        channel: thread.channel.into(),
        subject: thread.subject.clone(),
        last_message_at: thread.last_message_at.to_rfc3339(),
        created_at: thread.created_at.to_rfc3339(),
    }
}

pub fn map_event(event: &DeliveryEvent) -> DeliveryEventDto {
    DeliveryEventDto {
        id: event.id,
        message_id: event.message_id,
        kind: event.kind.into(),
        detail: event.detail.clone(),
        occurred_at: event.occurred_at.to_rfc3339(),
    }
}

pub fn map_preference(preference: &Preference) -> PreferenceDto {
    PreferenceDto {
        recipient: preference.recipient.into(),
        channel: preference.channel.into(),
        category: preference.category.into(),
        opted_in: preference.opted_in,
        updated_at: preference.updated_at.to_rfc3339(),
    }
}

pub fn map_audit(audit: &PreferenceAudit) -> PreferenceAuditDto {
    PreferenceAuditDto {
        id: audit.id,
        recipient: audit.recipient.into(),
        channel: audit.channel.into(),
        category: audit.category.into(),
        opted_in: audit.opted_in,
        actor_ip: audit.actor.ip.clone(),
        actor_user_agent: audit.actor.user_agent.clone(),
        reason: audit.reason.clone(),
        created_at: audit.created_at.to_rfc3339(),
    }
}
