use std::sync::Arc;

use poem::Result as PoemResult;
use poem_openapi::{
    OpenApi,
    param::{Path, Query},
    payload::Json,
};
use uuid::Uuid;

use crate::domain::models::RecipientRef;
use crate::presentation::http::{
    endpoints::root::{ApiState, EndpointsTags, internal_error, map_domain_error},
    mappers::{map_message, map_thread},
    responses::{MessageDto, ThreadDto},
};
use crate::presentation::models::RecipientKindDto;

#[derive(Clone)]
pub struct ThreadsEndpoints {
    state: Arc<ApiState>,
}

impl ThreadsEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl ThreadsEndpoints {
    #[oai(path = "/threads", method = "get", tag = EndpointsTags::Threads)]
    pub async fn list_threads(
        &self,
        recipient_kind: Query<RecipientKindDto>,
        recipient_id: Query<Uuid>,
    ) -> PoemResult<Json<Vec<ThreadDto>>> {
        let recipient = RecipientRef::new(recipient_kind.0.into(), recipient_id.0);
        let threads = self
            .state
            .list_threads
            .execute(recipient)
            .await
            .map_err(internal_error)?;
        Ok(Json(threads.iter().map(map_thread).collect()))
    }

    #[oai(
        path = "/threads/:thread_id/messages",
        method = "get",
        tag = EndpointsTags::Threads,
    )]
    pub async fn list_thread_messages(
        &self,
        thread_id: Path<Uuid>,
    ) -> PoemResult<Json<Vec<MessageDto>>> {
        let messages = self
            .state
            .list_thread_messages
            .execute(thread_id.0)
            .await
            .map_err(map_domain_error)?;
        Ok(Json(messages.iter().map(map_message).collect()))
    }
}
