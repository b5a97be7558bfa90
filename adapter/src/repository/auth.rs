use crate::{
    database::{model::member::MemberCredentialRow, ConnectionPool},
    redis::RedisClient,
};
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    auth::{event::CreateToken, AccessToken},
    id::MemberId,
};
use kernel::repository::auth::AuthRepository;
use shared::error::{AppError, AppResult};
use std::sync::Arc;

#[derive(new)]
pub struct AuthRepositoryImpl {
    db: ConnectionPool,
    kv: Arc<RedisClient>,
    ttl: u64,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_member_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<MemberId>> {
        let value = self.kv.get(&access_token.0).await?;
        value
            .map(|id| {
                id.parse::<i64>()
                    .map(MemberId::new)
                    .map_err(|_| AppError::ConversionEntityError("不正なトークン値です。".into()))
            })
            .transpose()
    }

    async fn verify_member(&self, email: &str, password: &str) -> AppResult<MemberId> {
        let row: Option<MemberCredentialRow> = sqlx::query_as(
            r#"
                SELECT member_id, password_hash
                FROM members
                WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let row = row.ok_or(AppError::UnauthenticatedError)?;

        // メールアドレスの存在有無は応答から判別できないようにする
        let parsed_hash =
            PasswordHash::new(&row.password_hash).map_err(|_| AppError::UnauthenticatedError)?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AppError::UnauthenticatedError)?;

        Ok(row.member_id)
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        let token = uuid::Uuid::new_v4().simple().to_string();
        self.kv
            .set_ex(&token, &event.member_id.raw().to_string(), self.ttl)
            .await?;
        Ok(AccessToken(token))
    }

    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()> {
        self.kv.delete(&access_token.0).await
    }
}
