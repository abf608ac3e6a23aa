use chrono::{DateTime, Utc};
use kernel::model::{
    event::Event,
    id::{EventId, UserId},
    user::EventOrganizer,
};
use sqlx::FromRow;

#[derive(FromRow)]
pub struct EventRow {
    pub event_id: EventId,
    pub name: String,
    pub description: String,
    pub venue: String,
    pub start_date: DateTime<Utc>,
    pub owned_by: UserId,
    pub owner_name: String,
}

impl From<EventRow> for Event {
    fn from(value: EventRow) -> Self {
        let EventRow {
            event_id,
            name,
            description,
            venue,
            start_date,
            owned_by,
            owner_name,
        } = value;
        Event {
            event_id,
            name,
            description,
            venue,
            start_date,
            organizer: EventOrganizer {
                organizer_id: owned_by,
                organizer_name: owner_name,
            },
        }
    }
}

// ページネーション用の adapter 内部の型
#[derive(FromRow)]
pub struct PaginatedEventRow {
    pub total: i64,
    pub event_id: EventId,
}
