//! Application-wide constants

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";
pub const TOKEN_TYPE_PASSWORD_RESET: &str = "password_reset";
pub const TOKEN_TYPE_EMAIL_VERIFICATION: &str = "email_verification";

pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 900;
pub const DEFAULT_REFRESH_TOKEN_EXPIRY: i64 = 604800;
pub const PASSWORD_RESET_TOKEN_EXPIRY: i64 = 3600;
pub const EMAIL_VERIFICATION_TOKEN_EXPIRY: i64 = 86400;

pub const DEFAULT_JWT_ISSUER: &str = "mygroup-api";
pub const DEFAULT_JWT_AUDIENCE: &str = "mygroup-client";
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

pub const DEFAULT_BCRYPT_COST: u32 = 10;

pub const DEFAULT_API_PREFIX: &str = "/api";
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;
pub const SHUTDOWN_GRACE_SECONDS: u64 = 10;

/// Route used when a role has no dedicated dashboard.
pub const FALLBACK_DASHBOARD_ROUTE: &str = "/dashboard";

pub mod messages {
    pub const LOGIN: &str = "Login successful";
    pub const LOGOUT: &str = "Logout successful";
    pub const REGISTER: &str = "Registration successful";

    pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
    pub const VALIDATION_ERROR: &str = "Validation error";
    pub const SERVER_ERROR: &str = "Internal server error";
    pub const INACTIVE_ACCOUNT: &str = "Account is inactive";
}
