use crate::database::model::{
    member::MemberRow,
    reservation::{ReservationTimeRow, ThemeRow},
};
use kernel::model::{
    id::WaitingId,
    reservation::ReservationDate,
    waiting::{Waiting, WaitingWithRank},
};
use shared::error::AppError;
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct WaitingRow {
    pub waiting_id: WaitingId,
    pub date: ReservationDate,
    #[sqlx(flatten)]
    pub member: MemberRow,
    #[sqlx(flatten)]
    pub time: ReservationTimeRow,
    #[sqlx(flatten)]
    pub theme: ThemeRow,
}

impl TryFrom<WaitingRow> for Waiting {
    type Error = AppError;

    fn try_from(value: WaitingRow) -> Result<Self, Self::Error> {
        Ok(Waiting {
            id: value.waiting_id,
            member: value.member.try_into()?,
            date: value.date,
            time: value.time.into(),
            theme: value.theme.into(),
        })
    }
}

// 同一枠内の順位付きで取得する際に使う型。
// rank は自身を含む、自分以前に採番された同一枠の待ちの件数
#[derive(Debug, FromRow)]
pub struct WaitingWithRankRow {
    #[sqlx(flatten)]
    pub waiting: WaitingRow,
    pub rank: i64,
}

impl TryFrom<WaitingWithRankRow> for WaitingWithRank {
    type Error = AppError;

    fn try_from(value: WaitingWithRankRow) -> Result<Self, Self::Error> {
        Ok(WaitingWithRank {
            waiting: value.waiting.try_into()?,
            rank: value.rank,
        })
    }
}
