use crate::model::{id::MemberId, member::Member};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn find_by_id(&self, member_id: MemberId) -> AppResult<Option<Member>>;
}
