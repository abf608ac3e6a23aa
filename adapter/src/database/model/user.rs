use kernel::model::{id::UserId, role::Role, user::User};
use shared::error::AppError;
use sqlx::FromRow;
use std::str::FromStr;

#[derive(FromRow)]
pub struct UserRow {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub role_name: String,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(value: UserRow) -> Result<Self, Self::Error> {
        let UserRow {
            user_id,
            user_name,
            email,
            role_name,
        } = value;
        Ok(User {
            user_id,
            user_name,
            email,
            role: Role::from_str(&role_name)
                .map_err(|e| AppError::ConversionEntityError(e.to_string()))?,
        })
    }
}

// ログイン検証で使う型
#[derive(FromRow)]
pub struct UserCredentialRow {
    pub user_id: UserId,
    pub password_hash: String,
}
