use crate::database::model::member::MemberRow;
use kernel::model::{
    id::{ReservationTimeId, ThemeId},
    reservation::{Reservation, ReservationDate, ReservationTime, Theme},
};
use kernel::model::id::ReservationId;
use shared::error::AppError;
use sqlx::types::chrono::NaiveTime;
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct ReservationTimeRow {
    pub time_id: ReservationTimeId,
    pub start_at: NaiveTime,
}

impl From<ReservationTimeRow> for ReservationTime {
    fn from(value: ReservationTimeRow) -> Self {
        let ReservationTimeRow { time_id, start_at } = value;
        Self {
            id: time_id,
            start_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct ThemeRow {
    pub theme_id: ThemeId,
    pub theme_name: String,
    pub description: String,
    pub thumbnail: String,
}

impl From<ThemeRow> for Theme {
    fn from(value: ThemeRow) -> Self {
        let ThemeRow {
            theme_id,
            theme_name,
            description,
            thumbnail,
        } = value;
        Self {
            id: theme_id,
            name: theme_name,
            description,
            thumbnail,
        }
    }
}

// 予約を会員・時間・テーマと JOIN した形で取得する際に使う型
#[derive(Debug, FromRow)]
pub struct ReservationRow {
    pub reservation_id: ReservationId,
    pub date: ReservationDate,
    pub status: String,
    #[sqlx(flatten)]
    pub member: MemberRow,
    #[sqlx(flatten)]
    pub time: ReservationTimeRow,
    #[sqlx(flatten)]
    pub theme: ThemeRow,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(value: ReservationRow) -> Result<Self, Self::Error> {
        let status = value.status.parse().map_err(|_| {
            AppError::ConversionEntityError(format!("不正な予約状態です: {}", value.status))
        })?;
        Ok(Reservation {
            id: value.reservation_id,
            member: value.member.try_into()?,
            date: value.date,
            time: value.time.into(),
            theme: value.theme.into(),
            status,
        })
    }
}
