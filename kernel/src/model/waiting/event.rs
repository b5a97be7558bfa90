use crate::model::{
    id::{MemberId, ReservationTimeId, ThemeId, WaitingId},
    reservation::ReservationDate,
};
use derive_new::new;

#[derive(Debug, Clone, Copy, new)]
pub struct CreateWaiting {
    pub member_id: MemberId,
    pub date: ReservationDate,
    pub time_id: ReservationTimeId,
    pub theme_id: ThemeId,
}

#[derive(Debug, Clone, Copy, new)]
pub struct DeleteWaiting {
    pub waiting_id: WaitingId,
    pub requested_by: MemberId,
}
