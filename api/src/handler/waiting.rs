use crate::{
    extractor::AuthorizedMember,
    model::waiting::{
        CreateWaitingRequest, CreateWaitingRequestWithMemberId, WaitingResponse,
        WaitingsWithRankResponse,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{id::WaitingId, waiting::event::DeleteWaiting};
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn register_waiting(
    member: AuthorizedMember,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateWaitingRequest>,
) -> AppResult<(StatusCode, Json<WaitingResponse>)> {
    req.validate(&())?;

    let event = CreateWaitingRequestWithMemberId::new(req, member.id()).try_into()?;
    let waiting = registry.waiting_service().register_waiting(event).await?;

    Ok((StatusCode::CREATED, Json(waiting.into())))
}

pub async fn show_my_waiting_list(
    member: AuthorizedMember,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<WaitingsWithRankResponse>> {
    registry
        .waiting_service()
        .find_waitings_with_rank(member.id())
        .await
        .map(WaitingsWithRankResponse::from)
        .map(Json)
}

pub async fn delete_waiting(
    member: AuthorizedMember,
    Path(waiting_id): Path<WaitingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .waiting_service()
        .delete_member_waiting(DeleteWaiting::new(waiting_id, member.id()))
        .await
        .map(|_| StatusCode::NO_CONTENT)
}
