use crate::model::id::{EventId, RegistrationId};
use crate::model::user::RegistrationUser;
use chrono::{DateTime, Utc};
use strum::{AsRefStr, EnumString};

pub mod event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum RegistrationStatus {
    Confirmed,
    Cancelled,
}

// 参加登録の一覧表示で使う型。イベントの概要を一緒に持つ
#[derive(Debug)]
pub struct Registration {
    pub registration_id: RegistrationId,
    pub registered_by: RegistrationUser,
    pub registered_at: DateTime<Utc>,
    pub status: RegistrationStatus,
    pub ticket_count: i32,
    pub event: RegistrationEvent,
}

#[derive(Debug)]
pub struct RegistrationEvent {
    pub event_id: EventId,
    pub name: String,
    pub start_date: DateTime<Utc>,
}

// ダッシュボード集計の 1 明細。登録者のメールアドレスと名前を展開して持つ
#[derive(Debug)]
pub struct EventRegistration {
    pub registration_id: RegistrationId,
    pub event_id: EventId,
    pub user_email: String,
    pub user_name: String,
    pub registered_at: DateTime<Utc>,
    pub status: RegistrationStatus,
    pub ticket_count: i32,
}
