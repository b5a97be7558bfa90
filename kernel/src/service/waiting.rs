use crate::model::{
    id::MemberId,
    waiting::{
        event::{CreateWaiting, DeleteWaiting},
        Waiting, WaitingWithRank,
    },
};
use crate::repository::{reservation::ReservationRepository, waiting::WaitingRepository};
use derive_new::new;
use shared::error::{AppError, AppResult};
use std::sync::Arc;

/// 予約待ちの作成・順位取得・削除を、登録済みの予約と突き合わせて行うサービス。
///
/// 作成時の事前条件はこの順で検査し、最初に失敗した条件のエラーを返す。
/// 1. 対象の枠に予約が存在すること
/// 2. その予約の所有者が申請者本人でないこと
/// 3. 申請者が同じ枠の予約待ちを持っていないこと
/// 4. 枠の日時が過ぎていないこと
///
/// 3 の検査はチェック後に別リクエストが割り込む可能性があるため、
/// ストア側の一意制約を最終防衛線とする（制約違反も同じ DuplicateWaiting になる）。
#[derive(new)]
pub struct WaitingService {
    reservation_repository: Arc<dyn ReservationRepository>,
    waiting_repository: Arc<dyn WaitingRepository>,
}

impl WaitingService {
    pub async fn register_waiting(&self, event: CreateWaiting) -> AppResult<Waiting> {
        let reservation = self
            .reservation_repository
            .find_by_slot(&event.date, event.time_id, event.theme_id)
            .await?
            .ok_or(AppError::WaitingWithoutReservation)?;

        if reservation.member.id == event.member_id {
            return Err(AppError::WaitingOnOwnReservation);
        }

        if self
            .waiting_repository
            .find_by_member_and_slot(event.member_id, &event.date, event.time_id, event.theme_id)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateWaiting);
        }

        if reservation.is_past() {
            return Err(AppError::PastSlotWaiting);
        }

        self.waiting_repository.create(event).await
    }

    /// 会員の予約待ち一覧を順位付きで返す。純粋な読み取りで、何も更新しない。
    /// 返した順位は直後の並行作成で古くなり得るが、参考値なのでそれでよい。
    pub async fn find_waitings_with_rank(
        &self,
        member_id: MemberId,
    ) -> AppResult<Vec<WaitingWithRank>> {
        self.waiting_repository
            .find_with_rank_by_member_id(member_id)
            .await
    }

    pub async fn delete_member_waiting(&self, event: DeleteWaiting) -> AppResult<()> {
        let waiting = self
            .waiting_repository
            .find_by_id(event.waiting_id)
            .await?
            .ok_or(AppError::WaitingNotFound)?;

        // ADMIN でも本人以外の削除は許可しない。権限の昇格は呼び出し側の責務
        if waiting.member.id != event.requested_by {
            return Err(AppError::ForbiddenOperation);
        }

        self.waiting_repository.delete(event).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        id::{ReservationId, ReservationTimeId, ThemeId, WaitingId},
        member::{Member, MemberEmail, MemberName, MemberPassword},
        reservation::{
            Reservation, ReservationDate, ReservationStatus, ReservationTime, Theme,
        },
        role::Role,
    };
    use async_trait::async_trait;
    use chrono::{Duration, Local, NaiveTime};
    use std::sync::{
        atomic::{AtomicI64, Ordering},
        Mutex,
    };

    fn member(id: i64, name: &str) -> Member {
        Member {
            id: MemberId::new(id),
            name: MemberName::new(name).unwrap(),
            email: MemberEmail::new(format!("{id}@aaa.com")).unwrap(),
            password: MemberPassword::new("asd").unwrap(),
            role: Role::User,
        }
    }

    fn time(id: i64) -> ReservationTime {
        ReservationTime {
            id: ReservationTimeId::new(id),
            start_at: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
        }
    }

    fn theme(id: i64) -> Theme {
        Theme {
            id: ThemeId::new(id),
            name: format!("테마{id}"),
            description: "한 시간 안에 탈출".into(),
            thumbnail: "thumbnail.png".into(),
        }
    }

    fn tomorrow() -> ReservationDate {
        ReservationDate::new(Local::now().date_naive() + Duration::days(1))
    }

    fn yesterday() -> ReservationDate {
        ReservationDate::new(Local::now().date_naive() - Duration::days(1))
    }

    struct InMemoryReservationRepository {
        reservations: Mutex<Vec<Reservation>>,
    }

    impl InMemoryReservationRepository {
        fn with(reservations: Vec<Reservation>) -> Self {
            Self {
                reservations: Mutex::new(reservations),
            }
        }
    }

    #[async_trait]
    impl ReservationRepository for InMemoryReservationRepository {
        async fn find_by_slot(
            &self,
            date: &ReservationDate,
            time_id: ReservationTimeId,
            theme_id: ThemeId,
        ) -> AppResult<Option<Reservation>> {
            let reservations = self.reservations.lock().unwrap();
            Ok(reservations
                .iter()
                .find(|r| r.date == *date && r.time.id == time_id && r.theme.id == theme_id)
                .cloned())
        }
    }

    /// BIGSERIAL 相当の単調増加な採番と (会員, 枠) の一意制約を再現したフェイク。
    struct InMemoryWaitingRepository {
        waitings: Mutex<Vec<Waiting>>,
        sequence: AtomicI64,
        members: Vec<Member>,
    }

    impl InMemoryWaitingRepository {
        fn with_members(members: Vec<Member>) -> Self {
            Self {
                waitings: Mutex::new(Vec::new()),
                sequence: AtomicI64::new(0),
                members,
            }
        }
    }

    #[async_trait]
    impl WaitingRepository for InMemoryWaitingRepository {
        async fn create(&self, event: CreateWaiting) -> AppResult<Waiting> {
            let mut waitings = self.waitings.lock().unwrap();
            // 一意制約に相当する検査。事前チェックをすり抜けた場合もここで止まる
            if waitings.iter().any(|w| {
                w.member.id == event.member_id
                    && w.date == event.date
                    && w.time.id == event.time_id
                    && w.theme.id == event.theme_id
            }) {
                return Err(AppError::DuplicateWaiting);
            }
            let member = self
                .members
                .iter()
                .find(|m| m.id == event.member_id)
                .cloned()
                .ok_or_else(|| AppError::EntityNotFound("member not found".into()))?;
            let waiting = Waiting {
                id: WaitingId::new(self.sequence.fetch_add(1, Ordering::SeqCst) + 1),
                member,
                date: event.date,
                time: time(event.time_id.raw()),
                theme: theme(event.theme_id.raw()),
            };
            waitings.push(waiting.clone());
            Ok(waiting)
        }

        async fn find_by_id(&self, waiting_id: WaitingId) -> AppResult<Option<Waiting>> {
            let waitings = self.waitings.lock().unwrap();
            Ok(waitings.iter().find(|w| w.id == waiting_id).cloned())
        }

        async fn find_by_member_and_slot(
            &self,
            member_id: MemberId,
            date: &ReservationDate,
            time_id: ReservationTimeId,
            theme_id: ThemeId,
        ) -> AppResult<Option<Waiting>> {
            let waitings = self.waitings.lock().unwrap();
            Ok(waitings
                .iter()
                .find(|w| {
                    w.member.id == member_id
                        && w.date == *date
                        && w.time.id == time_id
                        && w.theme.id == theme_id
                })
                .cloned())
        }

        async fn find_with_rank_by_member_id(
            &self,
            member_id: MemberId,
        ) -> AppResult<Vec<WaitingWithRank>> {
            let waitings = self.waitings.lock().unwrap();
            let mut mine: Vec<Waiting> = waitings
                .iter()
                .filter(|w| w.member.id == member_id)
                .cloned()
                .collect();
            mine.sort_by_key(|w| w.id);
            Ok(mine
                .into_iter()
                .map(|w| {
                    let rank = waitings
                        .iter()
                        .filter(|other| {
                            other.date == w.date
                                && other.time.id == w.time.id
                                && other.theme.id == w.theme.id
                                && other.id <= w.id
                        })
                        .count() as i64;
                    WaitingWithRank { waiting: w, rank }
                })
                .collect())
        }

        async fn delete(&self, event: DeleteWaiting) -> AppResult<()> {
            let mut waitings = self.waitings.lock().unwrap();
            let before = waitings.len();
            waitings.retain(|w| w.id != event.waiting_id);
            if waitings.len() == before {
                return Err(AppError::WaitingNotFound);
            }
            Ok(())
        }
    }

    fn reservation(id: i64, owner: Member, date: ReservationDate) -> Reservation {
        Reservation {
            id: ReservationId::new(id),
            member: owner,
            date,
            time: time(1),
            theme: theme(1),
            status: ReservationStatus::Reservation,
        }
    }

    fn service_with(
        reservations: Vec<Reservation>,
        members: Vec<Member>,
    ) -> (WaitingService, Arc<InMemoryWaitingRepository>) {
        let waiting_repository = Arc::new(InMemoryWaitingRepository::with_members(members));
        let service = WaitingService::new(
            Arc::new(InMemoryReservationRepository::with(reservations)),
            waiting_repository.clone(),
        );
        (service, waiting_repository)
    }

    fn create_event(member_id: i64, date: ReservationDate) -> CreateWaiting {
        CreateWaiting::new(
            MemberId::new(member_id),
            date,
            ReservationTimeId::new(1),
            ThemeId::new(1),
        )
    }

    #[tokio::test]
    async fn register_waiting_succeeds() -> anyhow::Result<()> {
        let owner = member(1, "감자");
        let requester = member(2, "고구마");
        let date = tomorrow();
        let (service, repo) = service_with(
            vec![reservation(1, owner, date)],
            vec![requester.clone()],
        );

        let waiting = service.register_waiting(create_event(2, date)).await?;

        assert_eq!(waiting.member, requester);
        assert_eq!(waiting.date, date);
        let stored = repo.find_by_id(waiting.id).await?;
        assert_eq!(stored, Some(waiting));
        Ok(())
    }

    #[tokio::test]
    async fn register_waiting_fails_without_reservation() {
        let (service, _) = service_with(vec![], vec![member(1, "감자")]);

        let err = service
            .register_waiting(create_event(1, tomorrow()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::WaitingWithoutReservation));
    }

    #[tokio::test]
    async fn register_waiting_fails_on_own_reservation() {
        let owner = member(1, "감자");
        let date = tomorrow();
        let (service, _) = service_with(
            vec![reservation(1, owner.clone(), date)],
            vec![owner],
        );

        let err = service
            .register_waiting(create_event(1, date))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::WaitingOnOwnReservation));
    }

    #[tokio::test]
    async fn register_waiting_fails_on_duplicate() -> anyhow::Result<()> {
        let owner = member(1, "감자");
        let date = tomorrow();
        let (service, _) = service_with(
            vec![reservation(1, owner, date)],
            vec![member(2, "고구마")],
        );

        service.register_waiting(create_event(2, date)).await?;
        let err = service
            .register_waiting(create_event(2, date))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::DuplicateWaiting));
        Ok(())
    }

    #[tokio::test]
    async fn store_constraint_reports_same_duplicate_error() -> anyhow::Result<()> {
        // 事前チェックを通過した後に割り込まれた場合でも、
        // ストアの一意制約が同じ DuplicateWaiting を返すことを確認する
        let owner = member(1, "감자");
        let date = tomorrow();
        let (service, repo) = service_with(
            vec![reservation(1, owner, date)],
            vec![member(2, "고구마")],
        );

        service.register_waiting(create_event(2, date)).await?;
        let err = repo.create(create_event(2, date)).await.unwrap_err();

        assert!(matches!(err, AppError::DuplicateWaiting));
        Ok(())
    }

    #[tokio::test]
    async fn register_waiting_fails_on_past_slot() {
        let owner = member(1, "감자");
        let date = yesterday();
        let (service, _) = service_with(
            vec![reservation(1, owner, date)],
            vec![member(2, "고구마")],
        );

        let err = service
            .register_waiting(create_event(2, date))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::PastSlotWaiting));
    }

    #[tokio::test]
    async fn self_conflict_wins_over_past_slot() {
        // 事前条件は順に検査されるため、過去枠でも本人予約のエラーが先に出る
        let owner = member(1, "감자");
        let date = yesterday();
        let (service, _) = service_with(
            vec![reservation(1, owner.clone(), date)],
            vec![owner],
        );

        let err = service
            .register_waiting(create_event(1, date))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::WaitingOnOwnReservation));
    }

    #[tokio::test]
    async fn rank_increases_with_creation_order() -> anyhow::Result<()> {
        let owner = member(1, "감자");
        let date = tomorrow();
        let (service, _) = service_with(
            vec![reservation(1, owner, date)],
            vec![member(2, "고구마"), member(3, "단호박")],
        );

        service.register_waiting(create_event(2, date)).await?;
        service.register_waiting(create_event(3, date)).await?;

        let first = service.find_waitings_with_rank(MemberId::new(2)).await?;
        let second = service.find_waitings_with_rank(MemberId::new(3)).await?;
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].rank, 1);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].rank, 2);
        Ok(())
    }

    #[tokio::test]
    async fn ranks_are_independent_between_slots() -> anyhow::Result<()> {
        let owner = member(1, "감자");
        let date_a = tomorrow();
        let date_b = ReservationDate::new(Local::now().date_naive() + Duration::days(2));
        let (service, _) = service_with(
            vec![
                reservation(1, owner.clone(), date_a),
                reservation(2, owner, date_b),
            ],
            vec![member(2, "고구마"), member(3, "단호박")],
        );

        // 枠 A には 2 人、枠 B には後から 3 だけが並ぶ
        service.register_waiting(create_event(2, date_a)).await?;
        service.register_waiting(create_event(3, date_a)).await?;
        service.register_waiting(create_event(3, date_b)).await?;

        let ranked = service.find_waitings_with_rank(MemberId::new(3)).await?;
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].waiting.date, date_a);
        assert_eq!(ranked[0].rank, 2);
        assert_eq!(ranked[1].waiting.date, date_b);
        assert_eq!(ranked[1].rank, 1);
        Ok(())
    }

    #[tokio::test]
    async fn find_waitings_with_rank_returns_empty_for_member_without_waitings() -> anyhow::Result<()>
    {
        let (service, _) = service_with(vec![], vec![]);

        let ranked = service.find_waitings_with_rank(MemberId::new(42)).await?;

        assert!(ranked.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn owner_can_delete_own_waiting() -> anyhow::Result<()> {
        let owner = member(1, "감자");
        let date = tomorrow();
        let (service, repo) = service_with(
            vec![reservation(1, owner, date)],
            vec![member(2, "고구마")],
        );
        let waiting = service.register_waiting(create_event(2, date)).await?;

        service
            .delete_member_waiting(DeleteWaiting::new(waiting.id, MemberId::new(2)))
            .await?;

        assert_eq!(repo.find_by_id(waiting.id).await?, None);
        let ranked = service.find_waitings_with_rank(MemberId::new(2)).await?;
        assert!(ranked.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn deleting_other_members_waiting_is_forbidden() -> anyhow::Result<()> {
        let owner = member(1, "감자");
        let date = tomorrow();
        let (service, repo) = service_with(
            vec![reservation(1, owner, date)],
            vec![member(2, "고구마")],
        );
        let waiting = service.register_waiting(create_event(2, date)).await?;

        let err = service
            .delete_member_waiting(DeleteWaiting::new(waiting.id, MemberId::new(1)))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ForbiddenOperation));
        // 失敗してもレコードはそのまま残る
        assert!(repo.find_by_id(waiting.id).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn deleting_missing_waiting_is_not_found() {
        let (service, _) = service_with(vec![], vec![]);

        let err = service
            .delete_member_waiting(DeleteWaiting::new(WaitingId::new(1), MemberId::new(1)))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::WaitingNotFound));
    }

    #[tokio::test]
    async fn waiting_queue_scenario() -> anyhow::Result<()> {
        // M1 が予約済みの枠に M2, M3 が並び、M2 の重複と M1 の越権削除が弾かれ、
        // M3 が自分の待ちを消すと順位照会が空になる一連の流れ
        let m1 = member(1, "감자");
        let date = tomorrow();
        let (service, _) = service_with(
            vec![reservation(1, m1, date)],
            vec![member(2, "고구마"), member(3, "단호박")],
        );

        let w2 = service.register_waiting(create_event(2, date)).await?;
        let w3 = service.register_waiting(create_event(3, date)).await?;
        assert!(w2.id < w3.id);

        let err = service
            .register_waiting(create_event(2, date))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateWaiting));

        let err = service
            .delete_member_waiting(DeleteWaiting::new(w3.id, MemberId::new(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ForbiddenOperation));

        service
            .delete_member_waiting(DeleteWaiting::new(w3.id, MemberId::new(3)))
            .await?;
        let ranked = service.find_waitings_with_rank(MemberId::new(3)).await?;
        assert!(ranked.is_empty());
        Ok(())
    }
}
