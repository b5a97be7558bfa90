use chrono::NaiveTime;
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::{MemberId, ReservationTimeId, ThemeId, WaitingId},
    reservation::{ReservationTime, Theme},
    waiting::{event::CreateWaiting, Waiting, WaitingWithRank},
};
use serde::{Deserialize, Serialize};
use shared::error::AppError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWaitingRequest {
    #[garde(length(min = 1))]
    pub date: String,
    #[garde(skip)]
    pub time_id: ReservationTimeId,
    #[garde(skip)]
    pub theme_id: ThemeId,
}

#[derive(new)]
pub struct CreateWaitingRequestWithMemberId(CreateWaitingRequest, MemberId);

impl TryFrom<CreateWaitingRequestWithMemberId> for CreateWaiting {
    type Error = AppError;

    fn try_from(value: CreateWaitingRequestWithMemberId) -> Result<Self, Self::Error> {
        let CreateWaitingRequestWithMemberId(request, member_id) = value;
        Ok(CreateWaiting::new(
            member_id,
            request.date.parse()?,
            request.time_id,
            request.theme_id,
        ))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitingResponse {
    pub waiting_id: WaitingId,
    pub member_name: String,
    pub date: String,
    pub time: ReservationTimeResponse,
    pub theme: ThemeResponse,
}

impl From<Waiting> for WaitingResponse {
    fn from(value: Waiting) -> Self {
        let Waiting {
            id,
            member,
            date,
            time,
            theme,
        } = value;
        Self {
            waiting_id: id,
            member_name: member.name.into_inner(),
            date: date.to_string(),
            time: time.into(),
            theme: theme.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationTimeResponse {
    pub time_id: ReservationTimeId,
    pub start_at: NaiveTime,
}

impl From<ReservationTime> for ReservationTimeResponse {
    fn from(value: ReservationTime) -> Self {
        let ReservationTime { id, start_at } = value;
        Self {
            time_id: id,
            start_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeResponse {
    pub theme_id: ThemeId,
    pub theme_name: String,
    pub description: String,
    pub thumbnail: String,
}

impl From<Theme> for ThemeResponse {
    fn from(value: Theme) -> Self {
        let Theme {
            id,
            name,
            description,
            thumbnail,
        } = value;
        Self {
            theme_id: id,
            theme_name: name,
            description,
            thumbnail,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitingsWithRankResponse {
    pub items: Vec<WaitingWithRankResponse>,
}

impl From<Vec<WaitingWithRank>> for WaitingsWithRankResponse {
    fn from(value: Vec<WaitingWithRank>) -> Self {
        Self {
            items: value.into_iter().map(WaitingWithRankResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitingWithRankResponse {
    pub waiting: WaitingResponse,
    pub rank: i64,
}

impl From<WaitingWithRank> for WaitingWithRankResponse {
    fn from(value: WaitingWithRank) -> Self {
        let WaitingWithRank { waiting, rank } = value;
        Self {
            waiting: waiting.into(),
            rank,
        }
    }
}
