use chrono::{DateTime, Utc};
use kernel::model::{
    event::EventWithRegistrations,
    id::{EventId, RegistrationId},
    registration::EventRegistration,
};
use serde::Serialize;

use crate::model::registration::RegistrationStatusName;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRegistrationsResponse {
    pub events: Vec<EventSummaryResponse>,
}

impl From<Vec<EventWithRegistrations>> for EventRegistrationsResponse {
    fn from(value: Vec<EventWithRegistrations>) -> Self {
        Self {
            events: value.into_iter().map(EventSummaryResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummaryResponse {
    pub id: EventId,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub registrations: Vec<RegistrationEntryResponse>,
}

impl From<EventWithRegistrations> for EventSummaryResponse {
    fn from(value: EventWithRegistrations) -> Self {
        let EventWithRegistrations {
            event_id,
            name,
            start_date,
            registrations,
        } = value;
        Self {
            id: event_id,
            name,
            start_date,
            registrations: registrations
                .into_iter()
                .map(RegistrationEntryResponse::from)
                .collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationEntryResponse {
    pub id: RegistrationId,
    pub event_id: EventId,
    pub user_email: String,
    pub user_name: String,
    pub registered_at: DateTime<Utc>,
    pub status: RegistrationStatusName,
    pub ticket_count: i32,
}

impl From<EventRegistration> for RegistrationEntryResponse {
    fn from(value: EventRegistration) -> Self {
        let EventRegistration {
            registration_id,
            event_id,
            user_email,
            user_name,
            registered_at,
            status,
            ticket_count,
        } = value;
        Self {
            id: registration_id,
            event_id,
            user_email,
            user_name,
            registered_at,
            status: status.into(),
            ticket_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use kernel::model::registration::RegistrationStatus;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn response_matches_the_dashboard_contract() {
        let event_id = EventId::from_str("0dd61a7a-eba0-4b84-a9a6-dbd1923a09ca").unwrap();
        let registration_id =
            RegistrationId::from_str("c62f6f41-a66a-4cbd-9718-b1b3e5b8eb0e").unwrap();
        let aggregated = vec![EventWithRegistrations {
            event_id,
            name: "Expo".into(),
            start_date: Utc.with_ymd_and_hms(2025, 5, 1, 10, 0, 0).unwrap(),
            registrations: vec![EventRegistration {
                registration_id,
                event_id,
                user_email: "a@x.com".into(),
                user_name: "Alice".into(),
                registered_at: Utc.with_ymd_and_hms(2025, 4, 1, 9, 30, 0).unwrap(),
                status: RegistrationStatus::Confirmed,
                ticket_count: 2,
            }],
        }];

        let response = EventRegistrationsResponse::from(aggregated);
        let actual = serde_json::to_value(&response).unwrap();

        // タイムスタンプは ISO-8601 文字列で返る
        let expected = json!({
            "events": [
                {
                    "id": "0dd61a7a-eba0-4b84-a9a6-dbd1923a09ca",
                    "name": "Expo",
                    "startDate": "2025-05-01T10:00:00Z",
                    "registrations": [
                        {
                            "id": "c62f6f41-a66a-4cbd-9718-b1b3e5b8eb0e",
                            "eventId": "0dd61a7a-eba0-4b84-a9a6-dbd1923a09ca",
                            "userEmail": "a@x.com",
                            "userName": "Alice",
                            "registeredAt": "2025-04-01T09:30:00Z",
                            "status": "confirmed",
                            "ticketCount": 2
                        }
                    ]
                }
            ]
        });
        assert_eq!(actual, expected);
    }

    #[test]
    fn no_owned_registrations_serialize_to_an_empty_list() {
        let response = EventRegistrationsResponse::from(Vec::new());
        let actual = serde_json::to_value(&response).unwrap();
        assert_eq!(actual, json!({ "events": [] }));
    }
}
