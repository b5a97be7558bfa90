use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    ConversionEntityError(String),
    #[error("リクエストパラメータが不正です。")]
    ValidationError(#[from] garde::Report),
    // 予約待ち作成時の事前条件違反。先に失敗した条件が勝つ
    #[error("予約が存在しない日付・時間・テーマに対しては予約待ちを作成できません。")]
    WaitingWithoutReservation,
    #[error("本人が予約している日付・時間・テーマに対しては予約待ちを作成できません。")]
    WaitingOnOwnReservation,
    #[error("同一会員の重複した予約待ちは作成できません。")]
    DuplicateWaiting,
    #[error("過ぎた日時に対する予約待ちは作成できません。")]
    PastSlotWaiting,
    // 予約待ち削除時のエラー。存在しないのか権限がないのかは呼び出し側が区別できる
    #[error("予約待ち削除失敗: 対象の予約待ちが見つかりません。")]
    WaitingNotFound,
    #[error("予約待ちを削除する権限がない会員です。")]
    ForbiddenOperation,
    #[error("ログインに失敗しました。")]
    UnauthenticatedError,
    #[error("認証情報が誤っています。")]
    UnauthorizedError,
    #[error("トランザクション処理に失敗しました。")]
    TransactionError(#[source] sqlx::Error),
    #[error("データベース処理の実行に失敗しました。")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("操作対象の行が存在しません: {0}")]
    NoRowsAffectedError(String),
    #[error("Redis の操作に失敗しました。")]
    KeyValueStoreError(#[from] redis::RedisError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = match self {
            AppError::UnprocessableEntity(_)
            | AppError::ConversionEntityError(_)
            | AppError::ValidationError(_)
            | AppError::WaitingWithoutReservation
            | AppError::WaitingOnOwnReservation
            | AppError::PastSlotWaiting => StatusCode::BAD_REQUEST,
            AppError::DuplicateWaiting => StatusCode::CONFLICT,
            AppError::EntityNotFound(_) | AppError::WaitingNotFound => StatusCode::NOT_FOUND,
            AppError::ForbiddenOperation => StatusCode::FORBIDDEN,
            AppError::UnauthenticatedError | AppError::UnauthorizedError => {
                StatusCode::UNAUTHORIZED
            }
            AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::KeyValueStoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "Unexpected error happened"
            );
        }

        (status_code, self.to_string()).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
