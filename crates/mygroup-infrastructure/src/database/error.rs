//! Maps sqlx failures onto domain errors

use sqlx::error::ErrorKind;
use tracing::error;

use mygroup_core::error::DomainError;

pub(crate) fn map_sqlx_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    let Some(db_err) = e.as_database_error() else {
        return DomainError::DatabaseError(e.to_string());
    };
    match db_err.kind() {
        ErrorKind::UniqueViolation => DomainError::DuplicateEntry {
            field: unique_field(db_err.constraint(), db_err.table()),
        },
        ErrorKind::ForeignKeyViolation => DomainError::ForeignKeyViolation(db_err.message().to_string()),
        ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
            DomainError::ValidationError(db_err.message().to_string())
        }
        _ => DomainError::DatabaseError(db_err.message().to_string()),
    }
}

/// Column named by a Postgres default unique constraint (`users_email_key`
/// -> `email`).
fn unique_field(constraint: Option<&str>, table: Option<&str>) -> String {
    let Some(constraint) = constraint else {
        return "Field".to_string();
    };
    let name = constraint.strip_suffix("_key").unwrap_or(constraint);
    let name = table
        .and_then(|t| name.strip_prefix(t))
        .and_then(|rest| rest.strip_prefix('_'))
        .unwrap_or(name);
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_field_from_constraint() {
        assert_eq!(unique_field(Some("users_email_key"), Some("users")), "email");
        assert_eq!(unique_field(Some("group_create_name_key"), Some("group_create")), "name");
        assert_eq!(unique_field(Some("custom_idx"), None), "custom_idx");
        assert_eq!(unique_field(None, Some("users")), "Field");
    }

    #[test]
    fn test_non_database_errors() {
        assert!(matches!(
            map_sqlx_error("testing", sqlx::Error::RowNotFound),
            DomainError::DatabaseError(_)
        ));
        assert!(matches!(
            map_sqlx_error("testing", sqlx::Error::PoolTimedOut),
            DomainError::DatabaseError(_)
        ));
    }
}
