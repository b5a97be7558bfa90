use crate::database::{model::reservation::ReservationRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{ReservationTimeId, ThemeId},
    reservation::{Reservation, ReservationDate},
};
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    // (date, time_id, theme_id) には一意制約があるため、行は高々 1 件
    async fn find_by_slot(
        &self,
        date: &ReservationDate,
        time_id: ReservationTimeId,
        theme_id: ThemeId,
    ) -> AppResult<Option<Reservation>> {
        let row: Option<ReservationRow> = sqlx::query_as(
            r#"
                SELECT
                    r.reservation_id,
                    r.date,
                    r.status,
                    m.member_id,
                    m.member_name,
                    m.email,
                    m.password_hash,
                    m.role,
                    t.time_id,
                    t.start_at,
                    th.theme_id,
                    th.theme_name,
                    th.description,
                    th.thumbnail
                FROM reservations AS r
                INNER JOIN members AS m ON r.member_id = m.member_id
                INNER JOIN reservation_times AS t ON r.time_id = t.time_id
                INNER JOIN themes AS th ON r.theme_id = th.theme_id
                WHERE r.date = $1 AND r.time_id = $2 AND r.theme_id = $3
            "#,
        )
        .bind(*date)
        .bind(time_id)
        .bind(theme_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Reservation::try_from).transpose()
    }
}
