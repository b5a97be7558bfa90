use crate::database::{model::member::MemberRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{id::MemberId, member::Member};
use kernel::repository::member::MemberRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct MemberRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl MemberRepository for MemberRepositoryImpl {
    async fn find_by_id(&self, member_id: MemberId) -> AppResult<Option<Member>> {
        let row: Option<MemberRow> = sqlx::query_as(
            r#"
                SELECT
                    member_id,
                    member_name,
                    email,
                    password_hash,
                    role
                FROM members
                WHERE member_id = $1
            "#,
        )
        .bind(member_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Member::try_from).transpose()
    }
}
