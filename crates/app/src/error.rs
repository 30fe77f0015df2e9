use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::{Datelike, Utc};
use services::{AccountError, ProgressError};
use thiserror::Error;
use tracing::error;
use ui::{PageChrome, render_error};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("page not found")]
    NotFound,
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<ProgressError> for AppError {
    fn from(err: ProgressError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Страница не найдена."),
            AppError::Internal(detail) => {
                error!(%detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Что-то пошло не так. Попробуйте позже.",
                )
            }
        };
        let chrome = PageChrome::new("Ошибка", Utc::now().year());
        (status, Html(render_error(chrome, status.as_u16(), message))).into_response()
    }
}
