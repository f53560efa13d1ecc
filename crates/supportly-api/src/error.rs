use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;
use tracing::error;

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const TICKET_NOT_FOUND: &str = "Ticket not found or unauthorized";
pub const PAGE_NOT_FOUND: &str = "404 - Page Not Found";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("{}", INVALID_CREDENTIALS)]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthenticated,

    /// Missing and foreign tickets are reported identically.
    #[error("{}", TICKET_NOT_FOUND)]
    NotFoundOrUnauthorized,

    #[error("{}", PAGE_NOT_FOUND)]
    PageNotFound,

    #[error(transparent)]
    Session(#[from] tower_sessions::session::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// User-facing flash messages for errors that are recovered at the
    /// handler boundary. Transport-level errors are handed back unchanged.
    pub fn into_messages(self) -> Result<Vec<String>, ApiError> {
        match self {
            ApiError::Validation(messages) => Ok(messages),
            ApiError::InvalidCredentials | ApiError::NotFoundOrUnauthorized => {
                Ok(vec![self.to_string()])
            }
            other => Err(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::PageNotFound => (StatusCode::NOT_FOUND, PAGE_NOT_FOUND).into_response(),
            ApiError::Unauthenticated => Redirect::to("/?page=login").into_response(),
            ApiError::Validation(_)
            | ApiError::InvalidCredentials
            | ApiError::NotFoundOrUnauthorized => {
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            ApiError::Session(_) | ApiError::Internal(_) => {
                error!("Request failed: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
