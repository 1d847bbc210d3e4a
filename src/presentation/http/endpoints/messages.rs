use std::sync::Arc;

use poem::Result as PoemResult;
use poem_openapi::{
    OpenApi,
    param::{Path, Query},
    payload::Json,
};
use uuid::Uuid;

use crate::application::handlers::dispatcher::DispatchRequest;
use crate::application::usecases::record_inbound::RecordInboundRequest;
use crate::domain::models::{ProviderKind, RecipientRef};
use crate::presentation::http::{
    endpoints::root::{ApiState, EndpointsTags, internal_error, map_domain_error},
    mappers::{map_event, map_message},
    requests::{
        InboundMessageRequestDto, RescheduleMessageRequestDto, ScheduleMessageRequestDto,
        SendMessageRequestDto,
    },
    responses::{DeliveryEventDto, MessageDto, PaginatedMessagesDto},
};
use crate::presentation::models::RecipientKindDto;

#[derive(Clone)]
pub struct MessagesEndpoints {
    state: Arc<ApiState>,
}

impl MessagesEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

fn to_dispatch_request(dto: SendMessageRequestDto) -> DispatchRequest {
    DispatchRequest {
        recipient: dto.recipient.into(),
        channel: dto.channel.into(),
        provider: dto.provider.map(Into::into),
        category: dto.category.map(Into::into),
        subject: dto.subject,
        body: dto.body,
        from_address: dto.from_address,
        to_address: dto.to_address,
        metadata: dto.metadata.unwrap_or_else(|| serde_json::json!({})),
    }
}

#[OpenApi]
impl MessagesEndpoints {
    #[oai(path = "/messages", method = "post", tag = EndpointsTags::Messages)]
    pub async fn send_message(
        &self,
        request: Json<SendMessageRequestDto>,
    ) -> PoemResult<Json<MessageDto>> {
        let message = self
            .state
            .send_message
            .execute(to_dispatch_request(request.0))
            .await
            .map_err(map_domain_error)?;
        Ok(Json(map_message(&message)))
    }

    #[oai(
        path = "/messages/schedule",
        method = "post",
        tag = EndpointsTags::Messages,
    )]
    pub async fn schedule_message(
        &self,
        request: Json<ScheduleMessageRequestDto>,
    ) -> PoemResult<Json<MessageDto>> {
        let payload = request.0;
        let message = self
            .state
            .schedule_message
            .execute(to_dispatch_request(payload.message), payload.send_at)
            .await
            .map_err(map_domain_error)?;
        Ok(Json(map_message(&message)))
    }

    #[oai(path = "/messages", method = "get", tag = EndpointsTags::Messages)]
    pub async fn list_messages(
        &self,
        recipient_kind: Query<RecipientKindDto>,
        recipient_id: Query<Uuid>,
        limit: Query<Option<u32>>,
        offset: Query<Option<u32>>,
    ) -> PoemResult<Json<PaginatedMessagesDto>> {
        let recipient = RecipientRef::new(recipient_kind.0.into(), recipient_id.0);
        let result = self
            .state
            .list_messages
            .execute(recipient, limit.0, offset.0)
            .await
            .map_err(internal_error)?;

        Ok(Json(PaginatedMessagesDto {
            messages: result.messages.iter().map(map_message).collect(),
            has_more: result.has_more,
            next_offset: result.next_offset,
        }))
    }

    #[oai(
        path = "/messages/:message_id",
        method = "get",
        tag = EndpointsTags::Messages,
    )]
    pub async fn get_message(&self, message_id: Path<Uuid>) -> PoemResult<Json<MessageDto>> {
        let message = self
            .state
            .get_message
            .execute(message_id.0)
            .await
            .map_err(map_domain_error)?;
        Ok(Json(map_message(&message)))
    }

    #[oai(
        path = "/messages/:message_id/events",
        method = "get",
        tag = EndpointsTags::Messages,
    )]
    pub async fn get_message_events(
        &self,
        message_id: Path<Uuid>,
    ) -> PoemResult<Json<Vec<DeliveryEventDto>>> {
        let events = self
            .state
            .get_message_events
            .execute(message_id.0)
            .await
            .map_err(map_domain_error)?;
        Ok(Json(events.iter().map(map_event).collect()))
    }

    #[oai(
        path = "/messages/:message_id/actions/cancel",
        method = "post",
        tag = EndpointsTags::Messages,
    )]
    pub async fn cancel_scheduled(&self, message_id: Path<Uuid>) -> PoemResult<()> {
        self.state
            .cancel_scheduled
            .execute(message_id.0)
            .await
            .map_err(map_domain_error)?;
        Ok(())
    }

    #[oai(
        path = "/messages/:message_id/actions/reschedule",
        method = "post",
        tag = EndpointsTags::Messages,
    )]
    pub async fn reschedule_message(
        &self,
        message_id: Path<Uuid>,
        request: Json<RescheduleMessageRequestDto>,
    ) -> PoemResult<()> {
        self.state
            .reschedule_message
            .execute(message_id.0, request.send_at)
            .await
            .map_err(map_domain_error)?;
        Ok(())
    }

    #[oai(
        path = "/messages/:message_id/actions/retry",
        method = "post",
        tag = EndpointsTags::Messages,
    )]
    pub async fn retry_message(&self, message_id: Path<Uuid>) -> PoemResult<Json<MessageDto>> {
        let message = self
            .state
            .retry_message
            .execute(message_id.0)
            .await
            .map_err(map_domain_error)?;
        Ok(Json(map_message(&message)))
    }

    #[oai(
        path = "/messages/inbound",
        method = "post",
        tag = EndpointsTags::Messages,
    )]
    pub async fn record_inbound(
        &self,
        request: Json<InboundMessageRequestDto>,
    ) -> PoemResult<Json<MessageDto>> {
        let dto = request.0;
        let channel = dto.channel.into();
        let provider = dto
            .provider
            .map(ProviderKind::from)
            .unwrap_or(ProviderKind::Portal);
        let message = self
            .state
            .record_inbound
            .execute(RecordInboundRequest {
                recipient: dto.recipient.into(),
                channel,
                provider,
                category: dto.category.map(Into::into),
                subject: dto.subject,
                body: dto.body,
                from_address: dto.from_address,
                to_address: dto.to_address,
                metadata: dto.metadata.unwrap_or_else(|| serde_json::json!({})),
            })
            .await
            .map_err(map_domain_error)?;
        Ok(Json(map_message(&message)))
    }
}
