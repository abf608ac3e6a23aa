use crate::model::event::EventWithRegistrations;
use crate::model::id::{RegistrationId, UserId};
use crate::model::registration::{
    event::{CancelRegistration, CreateRegistration},
    Registration,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    // 参加登録を行う。対象イベントが存在しない場合はエラー
    async fn create(&self, event: CreateRegistration) -> AppResult<RegistrationId>;
    // 本人の参加登録をキャンセル状態にする
    async fn cancel(&self, event: CancelRegistration) -> AppResult<()>;
    // ユーザー ID に紐づく参加登録を新しい順に取得する
    async fn find_all_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Registration>>;
    // 指定ユーザーが主催するイベントの参加登録をイベント単位にまとめて取得する。
    // 参加登録のないイベントは結果に含まれない
    async fn find_grouped_by_event_owner(
        &self,
        owner_id: UserId,
    ) -> AppResult<Vec<EventWithRegistrations>>;
}
