use chrono::{DateTime, Utc};
use kernel::model::{
    event::EventWithRegistrations,
    id::{EventId, RegistrationId, UserId},
    registration::{EventRegistration, Registration, RegistrationEvent, RegistrationStatus},
    user::RegistrationUser,
};
use shared::error::AppError;
use sqlx::FromRow;
use std::str::FromStr;

// 参加登録一覧を取得する際に使う型。イベントとユーザーを JOIN した結果を受ける
#[derive(FromRow)]
pub struct RegistrationRow {
    pub registration_id: RegistrationId,
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub registered_at: DateTime<Utc>,
    pub status: String,
    pub ticket_count: i32,
    pub event_id: EventId,
    pub event_name: String,
    pub start_date: DateTime<Utc>,
}

impl TryFrom<RegistrationRow> for Registration {
    type Error = AppError;

    fn try_from(value: RegistrationRow) -> Result<Self, Self::Error> {
        let RegistrationRow {
            registration_id,
            user_id,
            user_name,
            email,
            registered_at,
            status,
            ticket_count,
            event_id,
            event_name,
            start_date,
        } = value;
        Ok(Registration {
            registration_id,
            registered_by: RegistrationUser {
                user_id,
                user_name,
                email,
            },
            registered_at,
            status: parse_status(&status)?,
            ticket_count,
            event: RegistrationEvent {
                event_id,
                name: event_name,
                start_date,
            },
        })
    }
}

// ダッシュボード集計クエリの 1 行。
// events / registrations / users を JOIN したフラットな結果を受ける
#[derive(FromRow)]
pub struct EventRegistrationRow {
    pub registration_id: RegistrationId,
    pub event_id: EventId,
    pub email: String,
    pub user_name: String,
    pub registered_at: DateTime<Utc>,
    pub status: String,
    pub ticket_count: i32,
    pub event_name: String,
    pub start_date: DateTime<Utc>,
}

// フラットな行をイベント単位にまとめる。
// 行は (start_date, event_id, registered_at) 順で並んでいる前提。
// 同一イベントの行は連続するので、直前のグループと比較するだけでよい
pub fn group_rows_by_event(
    rows: Vec<EventRegistrationRow>,
) -> Result<Vec<EventWithRegistrations>, AppError> {
    let mut events: Vec<EventWithRegistrations> = Vec::new();
    for row in rows {
        let EventRegistrationRow {
            registration_id,
            event_id,
            email,
            user_name,
            registered_at,
            status,
            ticket_count,
            event_name,
            start_date,
        } = row;
        let registration = EventRegistration {
            registration_id,
            event_id,
            user_email: email,
            user_name,
            registered_at,
            status: parse_status(&status)?,
            ticket_count,
        };
        match events.last_mut() {
            Some(group) if group.event_id == event_id => group.registrations.push(registration),
            _ => events.push(EventWithRegistrations {
                event_id,
                name: event_name,
                start_date,
                registrations: vec![registration],
            }),
        }
    }
    Ok(events)
}

fn parse_status(status: &str) -> Result<RegistrationStatus, AppError> {
    RegistrationStatus::from_str(status).map_err(|e| AppError::ConversionEntityError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(
        event_id: EventId,
        event_name: &str,
        start_hour: u32,
        email: &str,
        tickets: i32,
    ) -> EventRegistrationRow {
        EventRegistrationRow {
            registration_id: RegistrationId::new(),
            event_id,
            email: email.into(),
            user_name: "Test User".into(),
            registered_at: Utc.with_ymd_and_hms(2025, 4, 1, 9, 0, 0).unwrap(),
            status: "confirmed".into(),
            ticket_count: tickets,
            event_name: event_name.into(),
            start_date: Utc.with_ymd_and_hms(2025, 5, 1, start_hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn consecutive_rows_of_one_event_form_one_group() {
        let event_id = EventId::new();
        let rows = vec![
            row(event_id, "Expo", 10, "a@example.com", 1),
            row(event_id, "Expo", 10, "b@example.com", 2),
        ];

        let groups = group_rows_by_event(rows).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "Expo");
        assert_eq!(groups[0].registrations.len(), 2);
        assert_eq!(groups[0].registrations[0].user_email, "a@example.com");
        assert_eq!(groups[0].registrations[1].user_email, "b@example.com");
    }

    #[test]
    fn event_boundaries_split_groups_in_row_order() {
        let first = EventId::new();
        let second = EventId::new();
        let rows = vec![
            row(first, "Expo", 10, "a@example.com", 1),
            row(second, "Meetup", 15, "b@example.com", 1),
            row(second, "Meetup", 15, "c@example.com", 1),
        ];

        let groups = group_rows_by_event(rows).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].event_id, first);
        assert_eq!(groups[1].event_id, second);
        assert_eq!(groups[1].registrations.len(), 2);
    }

    #[test]
    fn empty_rows_produce_empty_result() {
        let groups = group_rows_by_event(Vec::new()).unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn unknown_status_is_rejected() {
        let mut bad = row(EventId::new(), "Expo", 10, "a@example.com", 1);
        bad.status = "pending".into();
        assert!(group_rows_by_event(vec![bad]).is_err());
    }
}
