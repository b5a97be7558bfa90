use crate::model::{
    id::{ReservationId, ReservationTimeId, ThemeId},
    member::Member,
};
use chrono::{Local, NaiveDate, NaiveTime};
use shared::error::AppError;
use std::str::FromStr;
use strum::{AsRefStr, EnumString};

/// 予約日。ISO 形式（YYYY-MM-DD）の文字列から生成する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, sqlx::Type)]
#[sqlx(transparent)]
pub struct ReservationDate(NaiveDate);

impl ReservationDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn is_before(&self, other: NaiveDate) -> bool {
        self.0 < other
    }
}

impl FromStr for ReservationDate {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| AppError::ConversionEntityError(format!("不正な日付形式です: {s}")))
    }
}

impl std::fmt::Display for ReservationDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// 予約時間枠。開始時刻のみを持つルックアップデータ。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationTime {
    pub id: ReservationTimeId,
    pub start_at: NaiveTime,
}

/// テーマ。ルックアップデータであり、この層では更新しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub id: ThemeId,
    pub name: String,
    pub description: String,
    pub thumbnail: String,
}

// 現状の作成経路では RESERVATION しか生まれないが、
// 将来の状態（キャンセル等）の追加を見込んで enum のままにしておく
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum ReservationStatus {
    Reservation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub id: ReservationId,
    pub member: Member,
    pub date: ReservationDate,
    pub time: ReservationTime,
    pub theme: Theme,
    pub status: ReservationStatus,
}

impl Reservation {
    /// 日付が今日より前、または今日かつ開始時刻が現在時刻より前なら true。
    /// この述語が予約待ち作成の可否を決める。
    pub fn is_past(&self) -> bool {
        let now = Local::now().naive_local();
        self.date.is_before(now.date())
            || (self.date.date() == now.date() && self.time.start_at < now.time())
    }
}
