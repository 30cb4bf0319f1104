use crate::application::catalog::CatalogError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(CatalogError);

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match self.0 {
            // 404 Not Found - リクエストされたリソースが存在しない
            CatalogError::BookNotFound => (StatusCode::NOT_FOUND, "BOOK_NOT_FOUND"),
            CatalogError::MemberNotFound => (StatusCode::NOT_FOUND, "MEMBER_NOT_FOUND"),

            // 422 Unprocessable Entity - ビジネスルール違反
            CatalogError::EmptyCollection(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "EMPTY_COLLECTION")
            }
            CatalogError::NoneAvailable => (StatusCode::UNPROCESSABLE_ENTITY, "NONE_AVAILABLE"),
            CatalogError::AlreadyBorrowed => {
                (StatusCode::UNPROCESSABLE_ENTITY, "ALREADY_BORROWED")
            }
            CatalogError::BookOnLoan => (StatusCode::UNPROCESSABLE_ENTITY, "BOOK_ON_LOAN"),
            CatalogError::MemberHasActiveLoans => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MEMBER_HAS_ACTIVE_LOANS",
            ),
        };

        tracing::debug!(error = %self.0, %status, "request rejected");

        let body = Json(ErrorResponse::new(error_type, self.0.to_string()));
        (status, body).into_response()
    }
}
