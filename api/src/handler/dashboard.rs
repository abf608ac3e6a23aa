use axum::extract::State;
use axum::Json;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::extractor::AuthorizedUser;
use crate::model::dashboard::EventRegistrationsResponse;

// スタッフダッシュボード。
// 呼び出したスタッフが主催するイベントの参加登録をイベント単位にまとめて返す
pub async fn event_registrations(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventRegistrationsResponse>> {
    // staff ロールのみ許可する。それ以外のロールはすべて拒否
    if !user.is_staff() {
        return Err(AppError::ForbiddenOperation);
    }

    registry
        .registration_repository()
        .find_grouped_by_event_owner(user.id())
        .await
        .map(EventRegistrationsResponse::from)
        .map(Json)
}
