use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use garde::Validate;
use kernel::model::id::{EventId, RegistrationId};
use kernel::model::registration::event::{CancelRegistration, CreateRegistration};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::extractor::AuthorizedUser;
use crate::model::registration::{
    CreateRegistrationRequest, RegistrationCreatedResponse, RegistrationsResponse,
};

pub async fn register_for_event(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateRegistrationRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;
    // 枚数未指定は 1 枚として扱う
    let ticket_count = req.ticket_count.unwrap_or(1);

    let create = CreateRegistration::new(event_id, user.id(), ticket_count);
    let registration_id = registry.registration_repository().create(create).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegistrationCreatedResponse { registration_id }),
    ))
}

pub async fn cancel_registration(
    user: AuthorizedUser,
    Path(registration_id): Path<RegistrationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let cancel = CancelRegistration::new(registration_id, user.id());
    registry
        .registration_repository()
        .cancel(cancel)
        .await
        .map(|_| StatusCode::OK)
}

pub async fn show_my_registrations(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RegistrationsResponse>> {
    registry
        .registration_repository()
        .find_all_by_user_id(user.id())
        .await
        .map(RegistrationsResponse::from)
        .map(Json)
}
