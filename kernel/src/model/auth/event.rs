use crate::model::id::MemberId;
use derive_new::new;

#[derive(Debug, Clone, Copy, new)]
pub struct CreateToken {
    pub member_id: MemberId,
}
