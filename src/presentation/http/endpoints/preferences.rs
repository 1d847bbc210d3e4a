use std::sync::Arc;

use poem::Result as PoemResult;
use poem_openapi::{OpenApi, param::Query, payload::Json};
use uuid::Uuid;

use crate::application::usecases::update_preference::UpdatePreferenceRequest;
use crate::domain::models::{ActorContext, RecipientRef};
use crate::presentation::http::{
    endpoints::root::{ApiState, EndpointsTags, internal_error, map_domain_error},
    mappers::{map_audit, map_preference},
    requests::PreferenceUpdateRequestDto,
    responses::{PreferenceAuditDto, PreferenceDto},
};
use crate::presentation::models::{CategoryKind, ChannelKind, RecipientKindDto};

#[derive(Clone)]
pub struct PreferencesEndpoints {
    state: Arc<ApiState>,
}

impl PreferencesEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

fn to_update_request(dto: PreferenceUpdateRequestDto) -> UpdatePreferenceRequest {
    UpdatePreferenceRequest {
        recipient: dto.recipient.into(),
        channel: dto.channel.into(),
        category: dto.category.into(),
        actor: ActorContext {
            ip: dto.actor_ip,
            user_agent: dto.actor_user_agent,
        },
        reason: dto.reason,
    }
}

#[OpenApi]
impl PreferencesEndpoints {
    #[oai(
        path = "/preferences",
        method = "get",
        tag = EndpointsTags::Preferences,
    )]
    pub async fn list_preferences(
        &self,
        recipient_kind: Query<RecipientKindDto>,
        recipient_id: Query<Uuid>,
    ) -> PoemResult<Json<Vec<PreferenceDto>>> {
        let recipient = RecipientRef::new(recipient_kind.0.into(), recipient_id.0);
        let preferences = self
            .state
            .list_preferences
            .execute(recipient)
            .await
            .map_err(internal_error)?;
        Ok(Json(preferences.iter().map(map_preference).collect()))
    }

    #[oai(
        path = "/preferences/opt-in",
        method = "post",
        tag = EndpointsTags::Preferences,
    )]
    pub async fn opt_in(
        &self,
        request: Json<PreferenceUpdateRequestDto>,
    ) -> PoemResult<Json<PreferenceDto>> {
        let preference = self
            .state
            .update_preference
            .opt_in(to_update_request(request.0))
            .await
            .map_err(map_domain_error)?;
        Ok(Json(map_preference(&preference)))
    }

    #[oai(
        path = "/preferences/opt-out",
        method = "post",
        tag = EndpointsTags::Preferences,
    )]
    pub async fn opt_out(
        &self,
        request: Json<PreferenceUpdateRequestDto>,
    ) -> PoemResult<Json<PreferenceDto>> {
        let preference = self
            .state
            .update_preference
            .opt_out(to_update_request(request.0))
            .await
            .map_err(map_domain_error)?;
        Ok(Json(map_preference(&preference)))
    }

    #[oai(
        path = "/preferences/audit",
        method = "get",
        tag = EndpointsTags::Preferences,
    )]
    pub async fn audit_history(
        &self,
        recipient_kind: Query<RecipientKindDto>,
        recipient_id: Query<Uuid>,
        channel: Query<ChannelKind>,
        category: Query<CategoryKind>,
    ) -> PoemResult<Json<Vec<PreferenceAuditDto>>> {
        let recipient = RecipientRef::new(recipient_kind.0.into(), recipient_id.0);
        let audits = self
            .state
            .get_preference_audit
            .execute(recipient, channel.0.into(), category.0.into())
            .await
            .map_err(internal_error)?;
        Ok(Json(audits.iter().map(map_audit).collect()))
    }
}
