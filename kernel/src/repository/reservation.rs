use crate::model::{
    id::{ReservationTimeId, ThemeId},
    reservation::{Reservation, ReservationDate},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    // 日付・時間・テーマの組で確定予約を引く。各組に予約は高々ひとつ
    async fn find_by_slot(
        &self,
        date: &ReservationDate,
        time_id: ReservationTimeId,
        theme_id: ThemeId,
    ) -> AppResult<Option<Reservation>>;
}
