//! API error type and its JSON envelope

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use mygroup_core::DomainError;
use mygroup_shared::constants::messages;
use mygroup_shared::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{}", messages::INVALID_CREDENTIALS)]
    InvalidCredentials,

    #[error("{}", messages::INACTIVE_ACCOUNT)]
    InactiveAccount,

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("{0}")]
    InvalidToken(String),

    /// A well-signed token of the wrong kind was presented.
    #[error("Invalid token type")]
    InvalidTokenType,

    #[error("{0}")]
    DuplicateEntry(String),

    #[error("Invalid reference to related resource")]
    ForeignKey(String),

    #[error("Database error")]
    Database(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{}", messages::SERVER_ERROR)]
    Internal(String),
}

/// Error envelope carried on the response so the outer layer can add the
/// `stack` field outside production.
#[derive(Debug, Clone)]
pub struct ErrorDetail {
    pub body: ApiResponse<()>,
    pub stack: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::InvalidTokenType
            | ApiError::DuplicateEntry(_)
            | ApiError::ForeignKey(_)
            | ApiError::PayloadTooLarge(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidCredentials
            | ApiError::Unauthorized(_)
            | ApiError::TokenExpired
            | ApiError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            ApiError::InactiveAccount | ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::InactiveAccount => "INACTIVE_ACCOUNT",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::TokenExpired => "TOKEN_EXPIRED",
            ApiError::InvalidToken(_) | ApiError::InvalidTokenType => "INVALID_TOKEN",
            ApiError::DuplicateEntry(_) => "DUPLICATE_ENTRY",
            ApiError::ForeignKey(_) => "FOREIGN_KEY_ERROR",
            ApiError::Database(_) => "DATABASE_ERROR",
            ApiError::PayloadTooLarge(_) => "FILE_TOO_LARGE",
            ApiError::Internal(_) => "SERVER_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), "{:?}", self);
        } else {
            tracing::warn!(code = self.code(), "{}", self);
        }

        let body = ApiResponse::<()>::error(self.code(), &self.to_string());
        let detail = ErrorDetail {
            body: body.clone(),
            stack: format!("{:?}", self),
        };

        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(detail);
        response
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::ValidationError(msg) => ApiError::Validation(msg),
            DomainError::TenantNotFound => ApiError::NotFound("Group not found".into()),
            DomainError::UserNotFound => ApiError::NotFound("User not found".into()),
            DomainError::InvalidCredentials => ApiError::InvalidCredentials,
            DomainError::UserNotActive => ApiError::InactiveAccount,
            DomainError::Forbidden(msg) => ApiError::Forbidden(msg),
            DomainError::TokenExpired => ApiError::TokenExpired,
            DomainError::InvalidToken(_) => ApiError::InvalidToken("Invalid token".into()),
            DomainError::WrongTokenType => ApiError::InvalidTokenType,
            DomainError::DuplicateEntry { field } => ApiError::DuplicateEntry(format!("{} already exists", field)),
            DomainError::ForeignKeyViolation(msg) => ApiError::ForeignKey(msg),
            DomainError::DatabaseError(msg) => ApiError::Database(msg),
            DomainError::PasswordHashError(msg)
            | DomainError::TokenGenerationError(msg)
            | DomainError::InternalError(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge("Request body too large".into())
        } else {
            ApiError::Validation(format!("{}: {}", messages::VALIDATION_ERROR, rejection.body_text()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_codes() {
        let cases = [
            (DomainError::ValidationError("x".into()), StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            (DomainError::TenantNotFound, StatusCode::NOT_FOUND, "NOT_FOUND"),
            (DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            (DomainError::UserNotActive, StatusCode::FORBIDDEN, "INACTIVE_ACCOUNT"),
            (DomainError::Forbidden("no".into()), StatusCode::FORBIDDEN, "FORBIDDEN"),
            (DomainError::TokenExpired, StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED"),
            (DomainError::InvalidToken("bad".into()), StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            (DomainError::WrongTokenType, StatusCode::BAD_REQUEST, "INVALID_TOKEN"),
            (
                DomainError::DuplicateEntry { field: "email".into() },
                StatusCode::BAD_REQUEST,
                "DUPLICATE_ENTRY",
            ),
            (DomainError::ForeignKeyViolation("fk".into()), StatusCode::BAD_REQUEST, "FOREIGN_KEY_ERROR"),
            (DomainError::DatabaseError("db".into()), StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            (DomainError::InternalError("boom".into()), StatusCode::INTERNAL_SERVER_ERROR, "SERVER_ERROR"),
        ];
        for (domain, status, code) in cases {
            let api = ApiError::from(domain);
            assert_eq!(api.status(), status);
            assert_eq!(api.code(), code);
        }
    }

    #[test]
    fn test_duplicate_message_names_field() {
        let api = ApiError::from(DomainError::DuplicateEntry { field: "username".into() });
        assert_eq!(api.to_string(), "username already exists");
    }

    #[test]
    fn test_internal_detail_not_in_message() {
        let api = ApiError::Database("relation \"users\" does not exist".into());
        assert_eq!(api.to_string(), "Database error");

        let response = api.into_response();
        let detail = response.extensions().get::<ErrorDetail>().unwrap();
        assert!(detail.stack.contains("relation"));
        assert_eq!(detail.body.code.as_deref(), Some("DATABASE_ERROR"));
    }

    #[test]
    fn test_fixed_messages() {
        assert_eq!(ApiError::InvalidCredentials.to_string(), "Invalid credentials");
        assert_eq!(ApiError::InactiveAccount.to_string(), "Account is inactive");
        assert_eq!(ApiError::Internal("stack overflow".into()).to_string(), "Internal server error");
    }
}
