use std::sync::Arc;

use poem::Result as PoemResult;
use poem_openapi::{OpenApi, payload::Json};

use crate::presentation::http::{
    endpoints::root::{ApiState, EndpointsTags, map_domain_error},
    mappers::map_message,
    requests::ProviderEventRequestDto,
    responses::MessageDto,
};

/// Ingestion point for provider delivery webhooks (delivery receipts,
/// bounces, opens, unsubscribes).
#[derive(Clone)]
pub struct EventsEndpoints {
    state: Arc<ApiState>,
}

impl EventsEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl EventsEndpoints {
    #[oai(
        path = "/events/provider",
        method = "post",
        tag = EndpointsTags::Events,
    )]
    pub async fn record_provider_event(
        &self,
        request: Json<ProviderEventRequestDto>,
    ) -> PoemResult<Json<MessageDto>> {
        let dto = request.0;
        let message = self
            .state
            .record_event
            .execute(dto.message_id, dto.kind.into(), dto.detail)
            .await
            .map_err(map_domain_error)?;
        Ok(Json(map_message(&message)))
    }
}
