use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use garde::Validate;
use kernel::model::event::{event::DeleteEvent, Event};
use kernel::model::id::EventId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::extractor::AuthorizedUser;
use crate::model::event::{
    CreateEventRequest, EventListQuery, EventResponse, PaginatedEventResponse, UpdateEventRequest,
    UpdateEventRequestWithIds,
};

pub async fn register_event(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateEventRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;
    // イベントの作成はスタッフのみ
    if !user.is_staff() {
        return Err(AppError::ForbiddenOperation);
    }

    registry
        .event_repository()
        .create(req.into(), user.id())
        .await
        .map(|_| StatusCode::CREATED)
}

pub async fn show_event_list(
    _user: AuthorizedUser,
    Query(query): Query<EventListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PaginatedEventResponse>> {
    query.validate(&())?;

    registry
        .event_repository()
        .find_all(query.into())
        .await
        .map(PaginatedEventResponse::from)
        .map(Json)
}

pub async fn show_event(
    _user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventResponse>> {
    registry
        .event_repository()
        .find_by_id(event_id)
        .await
        .and_then(|event| match event {
            Some(event) => Ok(Json(event.into())),
            None => Err(AppError::EntityNotFound("event not found".into())),
        })
}

pub async fn update_event(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateEventRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;
    if !user.is_staff() {
        return Err(AppError::ForbiddenOperation);
    }

    let update_event = UpdateEventRequestWithIds::new(event_id, user.id(), req);
    registry
        .event_repository()
        .update(update_event.into())
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_event(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    if !user.is_staff() {
        return Err(AppError::ForbiddenOperation);
    }

    let delete_event = DeleteEvent {
        event_id,
        requested_user: user.id(),
    };
    registry
        .event_repository()
        .delete(delete_event)
        .await
        .map(|_| StatusCode::OK)
}

// カレンダー登録ボタン用の iCalendar ファイルを返す
pub async fn event_calendar(
    _user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<impl IntoResponse> {
    let event = registry
        .event_repository()
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("event not found".into()))?;

    let body = to_ics(&event, Utc::now());
    Ok((
        [(header::CONTENT_TYPE, "text/calendar; charset=utf-8")],
        body,
    ))
}

fn to_ics(event: &Event, now: chrono::DateTime<Utc>) -> String {
    const DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";
    format!(
        "BEGIN:VCALENDAR\r\n\
         VERSION:2.0\r\n\
         PRODID:-//event-desk//JP\r\n\
         BEGIN:VEVENT\r\n\
         UID:{}\r\n\
         DTSTAMP:{}\r\n\
         DTSTART:{}\r\n\
         SUMMARY:{}\r\n\
         LOCATION:{}\r\n\
         DESCRIPTION:{}\r\n\
         END:VEVENT\r\n\
         END:VCALENDAR\r\n",
        event.event_id,
        now.format(DATE_FORMAT),
        event.start_date.format(DATE_FORMAT),
        escape_ics(&event.name),
        escape_ics(&event.venue),
        escape_ics(&event.description),
    )
}

// RFC 5545 の TEXT 値で特別扱いされる文字をエスケープする
fn escape_ics(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}
