use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::errors::{ApiError, ErrorKind};

#[derive(Debug, Error)]
pub enum UserError {
    #[error("{0}")]
    UnknownUser(String),

    #[error("{0}")]
    InvalidPassword(String),

    #[error("{0}")]
    EmailAlreadyTaken(String),

    #[error("{0}")]
    Validation(String),

    #[error("{}", .0.body_text())]
    Body(#[from] JsonRejection),

    #[error("{}", .0.body_text())]
    Query(#[from] QueryRejection),

    #[error("store error: {0}")]
    Store(#[from] mongodb::error::Error),

    #[error("password hashing failed: {0}")]
    Hashing(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::UnknownUser(_) => ErrorKind::UnprocessableEntity,
            UserError::InvalidPassword(_) => ErrorKind::InvalidPassword,
            UserError::EmailAlreadyTaken(_) => ErrorKind::EmailAlreadyTaken,
            UserError::Validation(_) | UserError::Body(_) | UserError::Query(_) => {
                ErrorKind::ValidationError
            }
            UserError::Store(_) | UserError::Hashing(_) => ErrorKind::ServerError,
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        let kind = err.kind();
        match err {
            UserError::Store(e) => {
                tracing::error!(error = %e, "store error");
                ApiError::new(kind, "Internal server error")
            }
            UserError::Hashing(e) => {
                tracing::error!(error = %e, "hashing error");
                ApiError::new(kind, "Internal server error")
            }
            other => ApiError::new(kind, other.to_string()),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
