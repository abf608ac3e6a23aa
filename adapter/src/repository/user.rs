use async_trait::async_trait;
use derive_new::new;
use kernel::model::id::UserId;
use kernel::model::role::Role;
use kernel::model::user::{
    event::{CreateUser, UpdateUserPassword, UpdateUserRole},
    User,
};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

use crate::database::model::user::{UserCredentialRow, UserRow};
use crate::database::ConnectionPool;

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let user_id = UserId::new();
        let hashed_password = bcrypt::hash(&event.password, bcrypt::DEFAULT_COST)?;
        // サインアップしたユーザーは常に attendee ロールになる
        let res = sqlx::query(
            r#"
                INSERT INTO users (user_id, user_name, email, password_hash, role_id)
                SELECT $1, $2, $3, $4, role_id
                FROM roles
                WHERE name = $5
            "#,
        )
        .bind(user_id)
        .bind(&event.user_name)
        .bind(&event.email)
        .bind(&hashed_password)
        .bind(Role::Attendee.as_ref())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No user record has been created".into(),
            ));
        }

        Ok(User {
            user_id,
            user_name: event.user_name,
            email: event.email,
            role: Role::Attendee,
        })
    }

    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
                SELECT u.user_id, u.user_name, u.email, r.name AS role_name
                FROM users AS u
                INNER JOIN roles AS r ON u.role_id = r.role_id
                WHERE u.user_id = $1
            "#,
        )
        .bind(current_user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(User::try_from).transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
                SELECT u.user_id, u.user_name, u.email, r.name AS role_name
                FROM users AS u
                INNER JOIN roles AS r ON u.role_id = r.role_id
                ORDER BY u.created_at DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn update_password(&self, event: UpdateUserPassword) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let row: Option<UserCredentialRow> = sqlx::query_as(
            r#"
                SELECT user_id, password_hash
                FROM users
                WHERE user_id = $1
            "#,
        )
        .bind(event.user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(row) = row else {
            return Err(AppError::EntityNotFound(
                "specified user not found".into(),
            ));
        };

        // 現在のパスワードが一致しない場合は更新を拒否する
        let valid = bcrypt::verify(&event.current_password, &row.password_hash)?;
        if !valid {
            return Err(AppError::UnauthenticatedError);
        }

        let hashed_password = bcrypt::hash(&event.new_password, bcrypt::DEFAULT_COST)?;
        sqlx::query(
            r#"
                UPDATE users
                SET password_hash = $2
                WHERE user_id = $1
            "#,
        )
        .bind(event.user_id)
        .bind(&hashed_password)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn update_role(&self, event: UpdateUserRole) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE users
                SET role_id = (SELECT role_id FROM roles WHERE name = $2)
                WHERE user_id = $1
            "#,
        )
        .bind(event.user_id)
        .bind(event.role.as_ref())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(
                "specified user not found".into(),
            ));
        }

        Ok(())
    }
}
