use crate::model::event::{
    event::{CreateEvent, DeleteEvent, EventListOptions, UpdateEvent},
    Event,
};
use crate::model::id::{EventId, UserId};
use crate::model::list::PaginatedList;
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: CreateEvent, organizer_id: UserId) -> AppResult<EventId>;
    // 開始日時の昇順で一覧を取得する
    async fn find_all(&self, options: EventListOptions) -> AppResult<PaginatedList<Event>>;
    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>>;
    // 主催者本人のイベントのみ更新できる。created_by は変更しない
    async fn update(&self, event: UpdateEvent) -> AppResult<()>;
    // 主催者本人のイベントのみ削除できる。参加登録も連鎖して削除される
    async fn delete(&self, event: DeleteEvent) -> AppResult<()>;
}
