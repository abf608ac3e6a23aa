use async_trait::async_trait;
use derive_new::new;
use kernel::model::event::EventWithRegistrations;
use kernel::model::id::{RegistrationId, UserId};
use kernel::model::registration::{
    event::{CancelRegistration, CreateRegistration},
    Registration, RegistrationStatus,
};
use kernel::repository::registration::RegistrationRepository;
use shared::error::{AppError, AppResult};

use crate::database::model::registration::{
    group_rows_by_event, EventRegistrationRow, RegistrationRow,
};
use crate::database::ConnectionPool;

#[derive(new)]
pub struct RegistrationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RegistrationRepository for RegistrationRepositoryImpl {
    async fn create(&self, event: CreateRegistration) -> AppResult<RegistrationId> {
        let mut tx = self.db.begin().await?;

        // 参加登録の前に、対象イベントが存在するかを確認する
        let found: Option<(uuid::Uuid,)> = sqlx::query_as(
            r#"
                SELECT event_id
                FROM events
                WHERE event_id = $1
            "#,
        )
        .bind(event.event_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if found.is_none() {
            return Err(AppError::EntityNotFound(
                "specified event not found".into(),
            ));
        }

        let registration_id = RegistrationId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO registrations
                    (registration_id, event_id, user_id, status, ticket_count)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(registration_id)
        .bind(event.event_id)
        .bind(event.registered_by)
        .bind(RegistrationStatus::Confirmed.as_ref())
        .bind(event.ticket_count)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No registration record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(registration_id)
    }

    async fn cancel(&self, event: CancelRegistration) -> AppResult<()> {
        // 本人の登録以外は 0 行更新となり、存在しない場合と区別しない
        let res = sqlx::query(
            r#"
                UPDATE registrations
                SET status = $3
                WHERE registration_id = $1 AND user_id = $2
            "#,
        )
        .bind(event.registration_id)
        .bind(event.requested_user)
        .bind(RegistrationStatus::Cancelled.as_ref())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(
                "specified registration not found".into(),
            ));
        }

        Ok(())
    }

    async fn find_all_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Registration>> {
        let rows: Vec<RegistrationRow> = sqlx::query_as(
            r#"
                SELECT
                    r.registration_id,
                    r.user_id,
                    u.user_name,
                    u.email,
                    r.registered_at,
                    r.status,
                    r.ticket_count,
                    e.event_id,
                    e.name AS event_name,
                    e.start_date
                FROM registrations AS r
                INNER JOIN events AS e ON r.event_id = e.event_id
                INNER JOIN users AS u ON r.user_id = u.user_id
                WHERE r.user_id = $1
                ORDER BY r.registered_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Registration::try_from).collect()
    }

    async fn find_grouped_by_event_owner(
        &self,
        owner_id: UserId,
    ) -> AppResult<Vec<EventWithRegistrations>> {
        // 主催イベントの絞り込みと参加登録の突き合わせは 1 つのクエリで行う。
        // イベントは開始日時の昇順（同時刻はイベント ID 順）、
        // 同一イベント内の参加登録は登録日時の昇順に並べる
        let rows: Vec<EventRegistrationRow> = sqlx::query_as(
            r#"
                SELECT
                    r.registration_id,
                    r.event_id,
                    u.email,
                    u.user_name,
                    r.registered_at,
                    r.status,
                    r.ticket_count,
                    e.name AS event_name,
                    e.start_date
                FROM events AS e
                INNER JOIN registrations AS r ON r.event_id = e.event_id
                INNER JOIN users AS u ON r.user_id = u.user_id
                WHERE e.created_by = $1
                ORDER BY e.start_date ASC, e.event_id ASC, r.registered_at ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        group_rows_by_event(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::event::EventRepositoryImpl;
    use crate::repository::user::UserRepositoryImpl;
    use chrono::{TimeZone, Utc};
    use kernel::model::event::event::CreateEvent;
    use kernel::model::id::EventId;
    use kernel::model::role::Role;
    use kernel::model::user::event::{CreateUser, UpdateUserRole};
    use kernel::repository::event::EventRepository;
    use kernel::repository::user::UserRepository;

    async fn insert_user(
        pool: &sqlx::PgPool,
        name: &str,
        email: &str,
        role: Role,
    ) -> anyhow::Result<UserId> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let user = repo
            .create(CreateUser {
                user_name: name.into(),
                email: email.into(),
                password: "test-password".into(),
            })
            .await?;
        if role == Role::Staff {
            repo.update_role(UpdateUserRole {
                user_id: user.user_id,
                role,
            })
            .await?;
        }
        Ok(user.user_id)
    }

    async fn insert_event(
        pool: &sqlx::PgPool,
        name: &str,
        start: chrono::DateTime<Utc>,
        created_by: UserId,
    ) -> anyhow::Result<EventId> {
        let repo = EventRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let event_id = repo
            .create(
                CreateEvent {
                    name: name.into(),
                    description: "".into(),
                    venue: "Hall A".into(),
                    start_date: start,
                },
                created_by,
            )
            .await?;
        Ok(event_id)
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_aggregation_is_scoped_to_the_owner(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let owner = insert_user(&pool, "Owner", "u1@example.com", Role::Staff).await?;
        let other_staff = insert_user(&pool, "Other", "u2@example.com", Role::Staff).await?;
        let attendee = insert_user(&pool, "Attendee", "a@x.com", Role::Attendee).await?;

        let e1 = insert_event(
            &pool,
            "Expo",
            Utc.with_ymd_and_hms(2025, 5, 1, 10, 0, 0).unwrap(),
            owner,
        )
        .await?;
        let e2 = insert_event(
            &pool,
            "Foreign",
            Utc.with_ymd_and_hms(2025, 5, 2, 10, 0, 0).unwrap(),
            other_staff,
        )
        .await?;

        let repo = RegistrationRepositoryImpl::new(ConnectionPool::new(pool));
        let r1 = repo
            .create(CreateRegistration::new(e1, attendee, 2))
            .await?;
        repo.create(CreateRegistration::new(e2, attendee, 1))
            .await?;

        let groups = repo.find_grouped_by_event_owner(owner).await?;

        // 他のスタッフが主催するイベントの登録は現れない
        assert_eq!(groups.len(), 1);
        let group = &groups[0];
        assert_eq!(group.event_id, e1);
        assert_eq!(group.name, "Expo");
        assert_eq!(group.registrations.len(), 1);

        let entry = &group.registrations[0];
        assert_eq!(entry.registration_id, r1);
        assert_eq!(entry.event_id, e1);
        assert_eq!(entry.user_email, "a@x.com");
        assert_eq!(entry.user_name, "Attendee");
        assert_eq!(entry.status, RegistrationStatus::Confirmed);
        assert_eq!(entry.ticket_count, 2);

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_events_without_registrations_are_omitted(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let owner = insert_user(&pool, "Owner", "u1@example.com", Role::Staff).await?;
        let attendee = insert_user(&pool, "Attendee", "a@x.com", Role::Attendee).await?;

        let with_regs = insert_event(
            &pool,
            "Expo",
            Utc.with_ymd_and_hms(2025, 5, 1, 10, 0, 0).unwrap(),
            owner,
        )
        .await?;
        insert_event(
            &pool,
            "Empty",
            Utc.with_ymd_and_hms(2025, 5, 2, 10, 0, 0).unwrap(),
            owner,
        )
        .await?;

        let repo = RegistrationRepositoryImpl::new(ConnectionPool::new(pool));
        repo.create(CreateRegistration::new(with_regs, attendee, 1))
            .await?;

        let groups = repo.find_grouped_by_event_owner(owner).await?;
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].event_id, with_regs);

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_events_are_ordered_by_start_date(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let owner = insert_user(&pool, "Owner", "u1@example.com", Role::Staff).await?;
        let attendee = insert_user(&pool, "Attendee", "a@x.com", Role::Attendee).await?;

        let later = insert_event(
            &pool,
            "Later",
            Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap(),
            owner,
        )
        .await?;
        let earlier = insert_event(
            &pool,
            "Earlier",
            Utc.with_ymd_and_hms(2025, 5, 1, 10, 0, 0).unwrap(),
            owner,
        )
        .await?;

        let repo = RegistrationRepositoryImpl::new(ConnectionPool::new(pool));
        repo.create(CreateRegistration::new(later, attendee, 1))
            .await?;
        repo.create(CreateRegistration::new(earlier, attendee, 1))
            .await?;

        let groups = repo.find_grouped_by_event_owner(owner).await?;
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].event_id, earlier);
        assert_eq!(groups[1].event_id, later);

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_ticket_count_defaults_to_one_in_the_store(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let owner = insert_user(&pool, "Owner", "u1@example.com", Role::Staff).await?;
        let attendee = insert_user(&pool, "Attendee", "a@x.com", Role::Attendee).await?;
        let event_id = insert_event(
            &pool,
            "Expo",
            Utc.with_ymd_and_hms(2025, 5, 1, 10, 0, 0).unwrap(),
            owner,
        )
        .await?;

        // ticket_count を省略した INSERT はカラムのデフォルト値 1 になる
        sqlx::query(
            r#"
                INSERT INTO registrations (registration_id, event_id, user_id)
                VALUES ($1, $2, $3)
            "#,
        )
        .bind(RegistrationId::new())
        .bind(event_id)
        .bind(attendee)
        .execute(&pool)
        .await?;

        let repo = RegistrationRepositoryImpl::new(ConnectionPool::new(pool));
        let groups = repo.find_grouped_by_event_owner(owner).await?;
        assert_eq!(groups[0].registrations[0].ticket_count, 1);
        assert_eq!(
            groups[0].registrations[0].status,
            RegistrationStatus::Confirmed
        );

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_cancel_only_touches_own_registrations(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let owner = insert_user(&pool, "Owner", "u1@example.com", Role::Staff).await?;
        let attendee = insert_user(&pool, "Attendee", "a@x.com", Role::Attendee).await?;
        let intruder = insert_user(&pool, "Intruder", "b@x.com", Role::Attendee).await?;
        let event_id = insert_event(
            &pool,
            "Expo",
            Utc.with_ymd_and_hms(2025, 5, 1, 10, 0, 0).unwrap(),
            owner,
        )
        .await?;

        let repo = RegistrationRepositoryImpl::new(ConnectionPool::new(pool));
        let registration_id = repo
            .create(CreateRegistration::new(event_id, attendee, 1))
            .await?;

        let res = repo
            .cancel(CancelRegistration::new(registration_id, intruder))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));

        repo.cancel(CancelRegistration::new(registration_id, attendee))
            .await?;

        let mine = repo.find_all_by_user_id(attendee).await?;
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].status, RegistrationStatus::Cancelled);

        Ok(())
    }

    #[sqlx::test(migrations = "../migrations")]
    async fn test_registration_for_missing_event_is_rejected(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let attendee = insert_user(&pool, "Attendee", "a@x.com", Role::Attendee).await?;

        let repo = RegistrationRepositoryImpl::new(ConnectionPool::new(pool));
        let res = repo
            .create(CreateRegistration::new(EventId::new(), attendee, 1))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));

        Ok(())
    }
}
