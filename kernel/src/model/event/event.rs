use crate::model::id::{EventId, UserId};
use chrono::{DateTime, Utc};

pub struct CreateEvent {
    pub name: String,
    pub description: String,
    pub venue: String,
    pub start_date: DateTime<Utc>,
}

#[derive(Debug)]
pub struct UpdateEvent {
    pub event_id: EventId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub requested_user: UserId,
}

#[derive(Debug)]
pub struct DeleteEvent {
    pub event_id: EventId,
    pub requested_user: UserId,
}

#[derive(Debug)]
pub struct EventListOptions {
    pub limit: i64,
    pub offset: i64,
}
