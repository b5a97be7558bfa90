use axum::{async_trait, extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeader,
};
use kernel::model::{auth::AccessToken, id::MemberId, member::Member, role::Role};
use registry::AppRegistry;
use shared::error::AppError;

/// Bearer トークンから検証済みの会員を取り出すエクストラクタ。
/// ハンドラに届く時点で会員の実在は保証されている。
pub struct AuthorizedMember {
    pub access_token: AccessToken,
    pub member: Member,
}

impl AuthorizedMember {
    pub fn id(&self) -> MemberId {
        self.member.id
    }

    pub fn is_admin(&self) -> bool {
        self.member.role == Role::Admin
    }
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedMember {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::UnauthorizedError)?;
        let access_token = AccessToken(bearer.token().to_string());

        let member_id = registry
            .auth_repository()
            .fetch_member_id_from_token(&access_token)
            .await?
            .ok_or(AppError::UnauthenticatedError)?;
        let member = registry
            .member_repository()
            .find_by_id(member_id)
            .await?
            .ok_or(AppError::UnauthenticatedError)?;

        Ok(Self {
            access_token,
            member,
        })
    }
}
