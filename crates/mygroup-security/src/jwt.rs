//! JWT token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use mygroup_shared::config::JwtSettings;
use mygroup_shared::constants::{
    EMAIL_VERIFICATION_TOKEN_EXPIRY, PASSWORD_RESET_TOKEN_EXPIRY, TOKEN_TYPE_ACCESS,
    TOKEN_TYPE_EMAIL_VERIFICATION, TOKEN_TYPE_PASSWORD_RESET, TOKEN_TYPE_REFRESH,
};
use mygroup_shared::{TenantId, UserId};

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token expired")]
    TokenExpired,
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("Invalid token type: expected {expected}, found {found}")]
    WrongTokenType { expected: String, found: String },
}

/// Claims carried by every token this service signs.
///
/// Access tokens fill the whole identity; refresh tokens only carry `id`,
/// `username` and the `type` marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    #[serde(rename = "groupId", default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<TenantId>,
    #[serde(rename = "type")]
    pub token_type: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

impl TokenClaims {
    pub fn is_type(&self, token_type: &str) -> bool {
        self.token_type == token_type
    }
}

/// Identity fields a token is issued for.
#[derive(Debug, Clone, Copy)]
pub struct TokenSubject<'a> {
    pub id: UserId,
    pub username: &'a str,
    pub email: &'a str,
    pub group_id: Option<TenantId>,
}

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl TokenService {
    pub fn new(settings: &JwtSettings) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[settings.issuer.as_str()]);
        validation.set_audience(&[settings.audience.as_str()]);

        Self {
            encoding_key: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.secret.as_bytes()),
            validation,
            issuer: settings.issuer.clone(),
            audience: settings.audience.clone(),
            access_token_expiry: settings.access_token_expiry,
            refresh_token_expiry: settings.refresh_token_expiry,
        }
    }

    pub fn generate_access_token(&self, subject: TokenSubject<'_>, roles: &[String]) -> Result<String, JwtError> {
        let mut claims = self.base_claims(subject.id, TOKEN_TYPE_ACCESS, self.access_token_expiry);
        claims.username = subject.username.to_string();
        claims.email = Some(subject.email.to_string());
        claims.roles = roles.to_vec();
        claims.group_id = subject.group_id;
        self.sign(&claims)
    }

    pub fn generate_refresh_token(&self, subject: TokenSubject<'_>) -> Result<String, JwtError> {
        let mut claims = self.base_claims(subject.id, TOKEN_TYPE_REFRESH, self.refresh_token_expiry);
        claims.username = subject.username.to_string();
        self.sign(&claims)
    }

    pub fn generate_password_reset_token(&self, user_id: UserId, email: &str) -> Result<String, JwtError> {
        let mut claims = self.base_claims(user_id, TOKEN_TYPE_PASSWORD_RESET, PASSWORD_RESET_TOKEN_EXPIRY);
        claims.email = Some(email.to_string());
        self.sign(&claims)
    }

    pub fn generate_email_verification_token(&self, user_id: UserId, email: &str) -> Result<String, JwtError> {
        let mut claims = self.base_claims(user_id, TOKEN_TYPE_EMAIL_VERIFICATION, EMAIL_VERIFICATION_TOKEN_EXPIRY);
        claims.email = Some(email.to_string());
        self.sign(&claims)
    }

    /// Verifies signature, issuer, audience and expiry.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, JwtError> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::InvalidToken(e.to_string()),
            })
    }

    /// Verifies the token and requires its `type` claim to match.
    pub fn verify_typed(&self, token: &str, expected: &str) -> Result<TokenClaims, JwtError> {
        let claims = self.verify(token)?;
        if !claims.is_type(expected) {
            return Err(JwtError::WrongTokenType {
                expected: expected.to_string(),
                found: claims.token_type,
            });
        }
        Ok(claims)
    }

    /// Reads the claims without checking signature or expiry. Diagnostics only.
    pub fn decode_unverified(token: &str) -> Option<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();
        decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
            .map(|data| data.claims)
            .ok()
    }

    fn base_claims(&self, id: UserId, token_type: &str, expiry: i64) -> TokenClaims {
        let now = Utc::now();
        TokenClaims {
            id,
            username: String::new(),
            email: None,
            roles: Vec::new(),
            group_id: None,
            token_type: token_type.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(expiry)).timestamp(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        }
    }

    fn sign(&self, claims: &TokenClaims) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| JwtError::CreationError(e.to_string()))
    }
}
