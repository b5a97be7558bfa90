use crate::model::{
    id::WaitingId,
    member::Member,
    reservation::{ReservationDate, ReservationTime, Theme},
};

pub mod event;

/// 予約済みの枠に対する順番待ち。作成後は削除されるまで不変。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Waiting {
    pub id: WaitingId,
    pub member: Member,
    pub date: ReservationDate,
    pub time: ReservationTime,
    pub theme: Theme,
}

/// 同一枠の待ちの中での 1 始まりの順位を付けた読み取り専用の射影。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitingWithRank {
    pub waiting: Waiting,
    pub rank: i64,
}
