use crate::database::{
    model::waiting::{WaitingRow, WaitingWithRankRow},
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{MemberId, ReservationTimeId, ThemeId, WaitingId},
    reservation::ReservationDate,
    waiting::{
        event::{CreateWaiting, DeleteWaiting},
        Waiting, WaitingWithRank,
    },
};
use kernel::repository::waiting::WaitingRepository;
use shared::error::{AppError, AppResult};

// 予約待ちを会員・時間・テーマと JOIN して引くときの共通部
const SELECT_WAITING: &str = r#"
    SELECT
        w.waiting_id,
        w.date,
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
    FROM waitings AS w
    INNER JOIN members AS m ON w.member_id = m.member_id
    INNER JOIN reservation_times AS t ON w.time_id = t.time_id
    INNER JOIN themes AS th ON w.theme_id = th.theme_id
"#;

#[derive(new)]
pub struct WaitingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl WaitingRepository for WaitingRepositoryImpl {
    async fn create(&self, event: CreateWaiting) -> AppResult<Waiting> {
        let mut tx = self.db.begin().await?;

        // waiting_id は BIGSERIAL の採番順で、同一枠の待ち行列の順序キーになる。
        // (member_id, date, time_id, theme_id) の一意インデックス違反は
        // 事前チェックと区別が付かないように同じ DuplicateWaiting に写す
        let waiting_id: WaitingId = sqlx::query_scalar(
            r#"
                INSERT INTO waitings (member_id, date, time_id, theme_id)
                VALUES ($1, $2, $3, $4)
                RETURNING waiting_id
            "#,
        )
        .bind(event.member_id)
        .bind(event.date)
        .bind(event.time_id)
        .bind(event.theme_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::DuplicateWaiting
            }
            e => AppError::SpecificOperationError(e),
        })?;

        let sql = format!("{SELECT_WAITING} WHERE w.waiting_id = $1");
        let row: WaitingRow = sqlx::query_as(&sql)
            .bind(waiting_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        row.try_into()
    }

    async fn find_by_id(&self, waiting_id: WaitingId) -> AppResult<Option<Waiting>> {
        let sql = format!("{SELECT_WAITING} WHERE w.waiting_id = $1");
        let row: Option<WaitingRow> = sqlx::query_as(&sql)
            .bind(waiting_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        row.map(Waiting::try_from).transpose()
    }

    async fn find_by_member_and_slot(
        &self,
        member_id: MemberId,
        date: &ReservationDate,
        time_id: ReservationTimeId,
        theme_id: ThemeId,
    ) -> AppResult<Option<Waiting>> {
        let sql = format!(
            "{SELECT_WAITING} WHERE w.member_id = $1 AND w.date = $2 AND w.time_id = $3 AND w.theme_id = $4"
        );
        let row: Option<WaitingRow> = sqlx::query_as(&sql)
            .bind(member_id)
            .bind(*date)
            .bind(time_id)
            .bind(theme_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        row.map(Waiting::try_from).transpose()
    }

    // 順位は採番キーの昇順に対するスナップショットの読み取りであり、ロックは取らない
    async fn find_with_rank_by_member_id(
        &self,
        member_id: MemberId,
    ) -> AppResult<Vec<WaitingWithRank>> {
        let rows: Vec<WaitingWithRankRow> = sqlx::query_as(
            r#"
                SELECT
                    w.waiting_id,
                    w.date,
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
                    th.thumbnail,
                    (
                        SELECT COUNT(*)
                        FROM waitings AS prior
                        WHERE prior.date = w.date
                          AND prior.time_id = w.time_id
                          AND prior.theme_id = w.theme_id
                          AND prior.waiting_id <= w.waiting_id
                    ) AS rank
                FROM waitings AS w
                INNER JOIN members AS m ON w.member_id = m.member_id
                INNER JOIN reservation_times AS t ON w.time_id = t.time_id
                INNER JOIN themes AS th ON w.theme_id = th.theme_id
                WHERE w.member_id = $1
                ORDER BY w.waiting_id ASC
            "#,
        )
        .bind(member_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(WaitingWithRank::try_from).collect()
    }

    async fn delete(&self, event: DeleteWaiting) -> AppResult<()> {
        // 所有者の検査はサービス側で済んでいる。ここでの 0 件は
        // 正当な所有者による並行削除に負けたケースで、NotFound として返す
        let res = sqlx::query("DELETE FROM waitings WHERE waiting_id = $1")
            .bind(event.waiting_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::WaitingNotFound);
        }

        Ok(())
    }
}
