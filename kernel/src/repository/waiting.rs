use crate::model::{
    id::{MemberId, ReservationTimeId, ThemeId, WaitingId},
    reservation::ReservationDate,
    waiting::{
        event::{CreateWaiting, DeleteWaiting},
        Waiting, WaitingWithRank,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait WaitingRepository: Send + Sync {
    // 予約待ちを登録する。ID はストアが単調増加で採番し、その順が到着順になる。
    // (会員, 日付, 時間, テーマ) の一意制約違反は AppError::DuplicateWaiting として返す
    async fn create(&self, event: CreateWaiting) -> AppResult<Waiting>;
    async fn find_by_id(&self, waiting_id: WaitingId) -> AppResult<Option<Waiting>>;
    async fn find_by_member_and_slot(
        &self,
        member_id: MemberId,
        date: &ReservationDate,
        time_id: ReservationTimeId,
        theme_id: ThemeId,
    ) -> AppResult<Option<Waiting>>;
    // 会員の予約待ち一覧を、同一枠内の順位付きで作成順に返す
    async fn find_with_rank_by_member_id(
        &self,
        member_id: MemberId,
    ) -> AppResult<Vec<WaitingWithRank>>;
    // 削除対象が既に存在しない場合は AppError::WaitingNotFound を返す
    async fn delete(&self, event: DeleteWaiting) -> AppResult<()>;
}
