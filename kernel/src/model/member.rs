use crate::model::{id::MemberId, role::Role};
use shared::error::{AppError, AppResult};

/// 会員名。空白のみの名前は許可しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberName(String);

impl MemberName {
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::UnprocessableEntity(
                "会員名は空にできません。".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberEmail(String);

impl MemberEmail {
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() || !value.contains('@') {
            return Err(AppError::UnprocessableEntity(
                "会員メールアドレスの形式が不正です。".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// 不透明な認証情報。待ち行列のロジックやレスポンスには一切渡さない。
#[derive(Clone, PartialEq, Eq)]
pub struct MemberPassword(String);

impl MemberPassword {
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(AppError::UnprocessableEntity(
                "会員パスワードは空にできません。".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for MemberPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MemberPassword(*****)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub name: MemberName,
    pub email: MemberEmail,
    pub password: MemberPassword,
    pub role: Role,
}
