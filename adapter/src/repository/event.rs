use async_trait::async_trait;
use derive_new::new;
use kernel::model::event::{
    event::{CreateEvent, DeleteEvent, EventListOptions, UpdateEvent},
    Event,
};
use kernel::model::id::{EventId, UserId};
use kernel::model::list::PaginatedList;
use kernel::repository::event::EventRepository;
use shared::error::{AppError, AppResult};

use crate::database::model::event::{EventRow, PaginatedEventRow};
use crate::database::ConnectionPool;

#[derive(new)]
pub struct EventRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl EventRepository for EventRepositoryImpl {
    async fn create(&self, event: CreateEvent, organizer_id: UserId) -> AppResult<EventId> {
        let event_id = EventId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO events (event_id, name, description, venue, start_date, created_by)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(event_id)
        .bind(&event.name)
        .bind(&event.description)
        .bind(&event.venue)
        .bind(event.start_date)
        .bind(organizer_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No event record has been created".into(),
            ));
        }

        Ok(event_id)
    }

    async fn find_all(&self, options: EventListOptions) -> AppResult<PaginatedList<Event>> {
        let EventListOptions { limit, offset } = options;

        // 件数とページ内のイベント ID を先に取得し、その後に本体を引く
        let rows: Vec<PaginatedEventRow> = sqlx::query_as(
            r#"
                SELECT COUNT(*) OVER() AS total, event_id
                FROM events
                ORDER BY start_date ASC
                LIMIT $1
                OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let total = rows.first().map(|r| r.total).unwrap_or_default();
        let event_ids: Vec<uuid::Uuid> = rows.into_iter().map(|r| r.event_id.raw()).collect();

        let rows: Vec<EventRow> = sqlx::query_as(
            r#"
                SELECT
                    e.event_id,
                    e.name,
                    e.description,
                    e.venue,
                    e.start_date,
                    e.created_by AS owned_by,
                    u.user_name AS owner_name
                FROM events AS e
                INNER JOIN users AS u ON e.created_by = u.user_id
                WHERE e.event_id = ANY($1)
                ORDER BY e.start_date ASC
            "#,
        )
        .bind(&event_ids)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(PaginatedList {
            total,
            limit,
            offset,
            items: rows.into_iter().map(Event::from).collect(),
        })
    }

    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>> {
        let row: Option<EventRow> = sqlx::query_as(
            r#"
                SELECT
                    e.event_id,
                    e.name,
                    e.description,
                    e.venue,
                    e.start_date,
                    e.created_by AS owned_by,
                    u.user_name AS owner_name
                FROM events AS e
                INNER JOIN users AS u ON e.created_by = u.user_id
                WHERE e.event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Event::from))
    }

    async fn update(&self, event: UpdateEvent) -> AppResult<()> {
        // created_by は更新対象に含めない。
        // 主催者以外による更新は 0 行更新となり、存在しない場合と区別しない
        let res = sqlx::query(
            r#"
                UPDATE events
                SET
                    name = COALESCE($3, name),
                    description = COALESCE($4, description),
                    venue = COALESCE($5, venue),
                    start_date = COALESCE($6, start_date)
                WHERE event_id = $1 AND created_by = $2
            "#,
        )
        .bind(event.event_id)
        .bind(event.requested_user)
        .bind(event.name)
        .bind(event.description)
        .bind(event.venue)
        .bind(event.start_date)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(
                "specified event not found".into(),
            ));
        }

        Ok(())
    }

    async fn delete(&self, event: DeleteEvent) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                DELETE FROM events
                WHERE event_id = $1 AND created_by = $2
            "#,
        )
        .bind(event.event_id)
        .bind(event.requested_user)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(
                "specified event not found".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::user::UserRepositoryImpl;
    use chrono::{TimeZone, Utc};
    use kernel::model::role::Role;
    use kernel::model::user::event::{CreateUser, UpdateUserRole};
    use kernel::repository::user::UserRepository;

    async fn insert_staff(pool: &sqlx::PgPool, email: &str) -> anyhow::Result<UserId> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let user = repo
            .create(CreateUser {
                user_name: "Staff".into(),
                email: email.into(),
                password: "test-password".into(),
            })
            .await?;
        repo.update_role(UpdateUserRole {
            user_id: user.user_id,
            role: Role::Staff,
        })
        .await?;
        Ok(user.user_id)
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_register_and_list_events(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let staff_id = insert_staff(&pool, "staff@example.com").await?;
        let repo = EventRepositoryImpl::new(ConnectionPool::new(pool));

        let later = repo
            .create(
                CreateEvent {
                    name: "Meetup".into(),
                    description: "Monthly meetup".into(),
                    venue: "Room B".into(),
                    start_date: Utc.with_ymd_and_hms(2025, 6, 1, 18, 0, 0).unwrap(),
                },
                staff_id,
            )
            .await?;
        let earlier = repo
            .create(
                CreateEvent {
                    name: "Expo".into(),
                    description: "Annual expo".into(),
                    venue: "Hall A".into(),
                    start_date: Utc.with_ymd_and_hms(2025, 5, 1, 10, 0, 0).unwrap(),
                },
                staff_id,
            )
            .await?;

        let list = repo
            .find_all(EventListOptions {
                limit: 20,
                offset: 0,
            })
            .await?;
        assert_eq!(list.total, 2);
        // 開始日時の昇順で返る
        assert_eq!(list.items[0].event_id, earlier);
        assert_eq!(list.items[1].event_id, later);

        let found = repo.find_by_id(earlier).await?.unwrap();
        assert_eq!(found.name, "Expo");
        assert_eq!(found.organizer.organizer_id, staff_id);

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_only_the_organizer_can_update_or_delete(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let owner_id = insert_staff(&pool, "owner@example.com").await?;
        let other_id = insert_staff(&pool, "other@example.com").await?;
        let repo = EventRepositoryImpl::new(ConnectionPool::new(pool));

        let event_id = repo
            .create(
                CreateEvent {
                    name: "Expo".into(),
                    description: "".into(),
                    venue: "Hall A".into(),
                    start_date: Utc.with_ymd_and_hms(2025, 5, 1, 10, 0, 0).unwrap(),
                },
                owner_id,
            )
            .await?;

        let res = repo
            .update(UpdateEvent {
                event_id,
                name: Some("Hijacked".into()),
                description: None,
                venue: None,
                start_date: None,
                requested_user: other_id,
            })
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));

        repo.update(UpdateEvent {
            event_id,
            name: Some("Expo 2025".into()),
            description: None,
            venue: None,
            start_date: None,
            requested_user: owner_id,
        })
        .await?;
        let found = repo.find_by_id(event_id).await?.unwrap();
        assert_eq!(found.name, "Expo 2025");
        // 他の項目は維持される
        assert_eq!(found.venue, "Hall A");

        let res = repo
            .delete(DeleteEvent {
                event_id,
                requested_user: other_id,
            })
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));

        repo.delete(DeleteEvent {
            event_id,
            requested_user: owner_id,
        })
        .await?;
        assert!(repo.find_by_id(event_id).await?.is_none());

        Ok(())
    }
}
