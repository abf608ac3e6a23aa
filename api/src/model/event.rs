use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    event::{
        event::{CreateEvent, EventListOptions, UpdateEvent},
        Event,
    },
    id::{EventId, UserId},
    list::PaginatedList,
    user::EventOrganizer,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(skip)]
    #[serde(default)]
    pub description: String,
    #[garde(skip)]
    #[serde(default)]
    pub venue: String,
    // 開始日時は必須。省略時に現在時刻で補うような扱いはしない
    #[garde(skip)]
    pub start_date: DateTime<Utc>,
}

impl From<CreateEventRequest> for CreateEvent {
    fn from(value: CreateEventRequest) -> Self {
        let CreateEventRequest {
            name,
            description,
            venue,
            start_date,
        } = value;
        CreateEvent {
            name,
            description,
            venue,
            start_date,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[garde(inner(length(min = 1)))]
    pub name: Option<String>,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(skip)]
    pub venue: Option<String>,
    #[garde(skip)]
    pub start_date: Option<DateTime<Utc>>,
}

#[derive(new)]
pub struct UpdateEventRequestWithIds(EventId, UserId, UpdateEventRequest);

impl From<UpdateEventRequestWithIds> for UpdateEvent {
    fn from(value: UpdateEventRequestWithIds) -> Self {
        let UpdateEventRequestWithIds(
            event_id,
            requested_user,
            UpdateEventRequest {
                name,
                description,
                venue,
                start_date,
            },
        ) = value;
        UpdateEvent {
            event_id,
            name,
            description,
            venue,
            start_date,
            requested_user,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EventListQuery {
    #[garde(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[garde(range(min = 0))]
    #[serde(default)]
    pub offset: i64,
}

const fn default_limit() -> i64 {
    20
}

impl From<EventListQuery> for EventListOptions {
    fn from(value: EventListQuery) -> Self {
        let EventListQuery { limit, offset } = value;
        Self { limit, offset }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: EventId,
    pub name: String,
    pub description: String,
    pub venue: String,
    pub start_date: DateTime<Utc>,
    pub organizer: EventOrganizerResponse,
}

impl From<Event> for EventResponse {
    fn from(value: Event) -> Self {
        let Event {
            event_id,
            name,
            description,
            venue,
            start_date,
            organizer,
        } = value;
        Self {
            id: event_id,
            name,
            description,
            venue,
            start_date,
            organizer: organizer.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventOrganizerResponse {
    pub organizer_id: UserId,
    pub organizer_name: String,
}

impl From<EventOrganizer> for EventOrganizerResponse {
    fn from(value: EventOrganizer) -> Self {
        let EventOrganizer {
            organizer_id,
            organizer_name,
        } = value;
        Self {
            organizer_id,
            organizer_name,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedEventResponse {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub items: Vec<EventResponse>,
}

impl From<PaginatedList<Event>> for PaginatedEventResponse {
    fn from(value: PaginatedList<Event>) -> Self {
        let PaginatedList {
            total,
            limit,
            offset,
            items,
        } = value;
        Self {
            total,
            limit,
            offset,
            items: items.into_iter().map(EventResponse::from).collect(),
        }
    }
}
