//! Domain errors

use mygroup_security::{JwtError, PasswordError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Group not found")]
    TenantNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is inactive")]
    UserNotActive,

    #[error("{0}")]
    Forbidden(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Invalid token type")]
    WrongTokenType,

    #[error("{field} already exists")]
    DuplicateEntry { field: String },

    #[error("Invalid reference to related resource: {0}")]
    ForeignKeyViolation(String),

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<JwtError> for DomainError {
    fn from(e: JwtError) -> Self {
        match e {
            JwtError::TokenExpired => DomainError::TokenExpired,
            JwtError::InvalidToken(msg) => DomainError::InvalidToken(msg),
            JwtError::WrongTokenType { .. } => DomainError::WrongTokenType,
            JwtError::CreationError(msg) => DomainError::TokenGenerationError(msg),
        }
    }
}

impl From<PasswordError> for DomainError {
    fn from(e: PasswordError) -> Self {
        DomainError::PasswordHashError(e.to_string())
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| match &err.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();
        DomainError::ValidationError(messages.join(", "))
    }
}
