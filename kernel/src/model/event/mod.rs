use crate::model::id::EventId;
use crate::model::registration::EventRegistration;
use crate::model::user::EventOrganizer;
use chrono::{DateTime, Utc};

pub mod event;

#[derive(Debug)]
pub struct Event {
    pub event_id: EventId,
    pub name: String,
    pub description: String,
    pub venue: String,
    pub start_date: DateTime<Utc>,
    pub organizer: EventOrganizer,
}

// スタッフダッシュボード用の集計結果。
// 参加登録が 1 件もないイベントはこの一覧に現れない
#[derive(Debug)]
pub struct EventWithRegistrations {
    pub event_id: EventId,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub registrations: Vec<EventRegistration>,
}
