use crate::{
    extractor::AuthorizedMember,
    model::auth::{AccessTokenResponse, LoginRequest},
};
use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use kernel::model::auth::event::CreateToken;
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn login(
    State(registry): State<AppRegistry>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AccessTokenResponse>> {
    req.validate(&())?;

    let member_id = registry
        .auth_repository()
        .verify_member(&req.email, &req.password)
        .await?;
    let access_token = registry
        .auth_repository()
        .create_token(CreateToken::new(member_id))
        .await?;

    Ok(Json(AccessTokenResponse {
        member_id,
        access_token: access_token.0,
    }))
}

pub async fn logout(
    member: AuthorizedMember,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .auth_repository()
        .delete_token(member.access_token)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
