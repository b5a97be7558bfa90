use kernel::model::{
    id::MemberId,
    member::{Member, MemberEmail, MemberName, MemberPassword},
};
use shared::error::AppError;
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct MemberRow {
    pub member_id: MemberId,
    pub member_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

impl TryFrom<MemberRow> for Member {
    type Error = AppError;

    fn try_from(value: MemberRow) -> Result<Self, Self::Error> {
        let MemberRow {
            member_id,
            member_name,
            email,
            password_hash,
            role,
        } = value;
        Ok(Member {
            id: member_id,
            name: MemberName::new(member_name)?,
            email: MemberEmail::new(email)?,
            password: MemberPassword::new(password_hash)?,
            role: role
                .parse()
                .map_err(|_| AppError::ConversionEntityError(format!("不正な権限です: {role}")))?,
        })
    }
}

// ログイン検証にだけ使う最小の射影
#[derive(Debug, FromRow)]
pub struct MemberCredentialRow {
    pub member_id: MemberId,
    pub password_hash: String,
}
