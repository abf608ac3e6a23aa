use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    id::{EventId, RegistrationId, UserId},
    registration::{Registration, RegistrationEvent, RegistrationStatus},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatusName {
    Confirmed,
    Cancelled,
}

impl From<RegistrationStatus> for RegistrationStatusName {
    fn from(value: RegistrationStatus) -> Self {
        match value {
            RegistrationStatus::Confirmed => Self::Confirmed,
            RegistrationStatus::Cancelled => Self::Cancelled,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegistrationRequest {
    // 省略時は 1 枚。0 枚は明示的なバリデーションエラーにする
    #[garde(inner(range(min = 1)))]
    #[serde(default)]
    pub ticket_count: Option<i32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationCreatedResponse {
    pub registration_id: RegistrationId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationsResponse {
    pub items: Vec<RegistrationResponse>,
}

impl From<Vec<Registration>> for RegistrationsResponse {
    fn from(value: Vec<Registration>) -> Self {
        Self {
            items: value.into_iter().map(RegistrationResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub registration_id: RegistrationId,
    pub registered_by: UserId,
    pub registered_at: DateTime<Utc>,
    pub status: RegistrationStatusName,
    pub ticket_count: i32,
    pub event: RegistrationEventResponse,
}

impl From<Registration> for RegistrationResponse {
    fn from(value: Registration) -> Self {
        let Registration {
            registration_id,
            registered_by,
            registered_at,
            status,
            ticket_count,
            event,
        } = value;
        Self {
            registration_id,
            registered_by: registered_by.user_id,
            registered_at,
            status: status.into(),
            ticket_count,
            event: event.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationEventResponse {
    pub event_id: EventId,
    pub name: String,
    pub start_date: DateTime<Utc>,
}

impl From<RegistrationEvent> for RegistrationEventResponse {
    fn from(value: RegistrationEvent) -> Self {
        let RegistrationEvent {
            event_id,
            name,
            start_date,
        } = value;
        Self {
            event_id,
            name,
            start_date,
        }
    }
}
