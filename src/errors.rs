use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Named error kinds understood by the response translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnprocessableEntity,
    InvalidPassword,
    EmailAlreadyTaken,
    ValidationError,
    ServerError,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::UnprocessableEntity
            | ErrorKind::InvalidPassword
            | ErrorKind::EmailAlreadyTaken => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::ValidationError => StatusCode::BAD_REQUEST,
            ErrorKind::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::UnprocessableEntity => "UNPROCESSABLE_ENTITY_ERROR",
            ErrorKind::InvalidPassword => "INVALID_PASSWORD_ERROR",
            ErrorKind::EmailAlreadyTaken => "EMAIL_ALREADY_TAKEN_ERROR",
            ErrorKind::ValidationError => "VALIDATION_ERROR",
            ErrorKind::ServerError => "SERVER_ERROR",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ErrorKind::UnprocessableEntity => "Unprocessable entity",
            ErrorKind::InvalidPassword => "Invalid password",
            ErrorKind::EmailAlreadyTaken => "Email already taken",
            ErrorKind::ValidationError => "Invalid request",
            ErrorKind::ServerError => "Server error",
        }
    }
}

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub error: &'static str,
    pub description: &'static str,
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status();
        let body = ErrorBody {
            status_code: status.as_u16(),
            error: self.kind.code(),
            description: self.kind.description(),
            message: self.message,
        };
        (status, Json(body)).into_response()
    }
}
