//! User domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use mygroup_shared::{TenantId, UserId, UserProfile};

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub profile_img: Option<String>,
    pub display_name: Option<String>,
    pub alter_number: Option<String>,

    /// Epoch seconds.
    pub created_on: Option<i64>,
    /// Epoch seconds.
    pub last_login: Option<i64>,
    pub active: bool,
    pub group_id: Option<TenantId>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn can_login(&self) -> bool {
        self.active
    }

    pub fn record_login(&mut self, at: i64) {
        self.last_login = Some(at);
        self.updated_at = Utc::now();
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile::from(self)
    }
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            company: user.company.clone(),
            phone: user.phone.clone(),
            profile_img: user.profile_img.clone(),
            display_name: user.display_name.clone(),
            alter_number: user.alter_number.clone(),
            created_on: user.created_on,
            last_login: user.last_login,
            active: user.active,
            group_id: user.group_id,
        }
    }
}

/// Registration input as received from the API.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Username must be between 1 and 100 characters"))]
    pub username: String,

    #[serde(default)]
    #[validate(email(message = "Email is invalid"), length(max = 254, message = "Email too long"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 8, max = 128, message = "Password must be between 8 and 128 characters"))]
    pub password: String,

    #[validate(length(max = 50, message = "First name too long"))]
    pub first_name: Option<String>,
    #[validate(length(max = 50, message = "Last name too long"))]
    pub last_name: Option<String>,
    #[validate(length(max = 20, message = "Phone too long"))]
    pub phone: Option<String>,
    pub role: Option<String>,
}

impl RegisterInput {
    /// Trims the username and trims and lowercases the email, so checks
    /// run against the values that get stored.
    pub fn normalized(mut self) -> Self {
        self.username = self.username.trim().to_string();
        self.email = self.email.trim().to_lowercase();
        self
    }

    pub fn has_required_fields(&self) -> bool {
        !self.username.trim().is_empty() && !self.email.trim().is_empty() && !self.password.is_empty()
    }

    /// `"{first} {last}"` with surrounding blanks removed.
    pub fn display_name(&self) -> Option<String> {
        let joined = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        );
        let trimmed = joined.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// A user ready to be inserted. `password_hash` is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub display_name: Option<String>,
    pub group_id: Option<TenantId>,
    pub active: bool,
    pub created_on: i64,
}

impl NewUser {
    pub fn from_registration(input: &RegisterInput, password_hash: String, created_on: i64) -> Self {
        Self {
            username: input.username.trim().to_string(),
            email: input.email.trim().to_lowercase(),
            password_hash,
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            phone: input.phone.clone(),
            company: None,
            display_name: input.display_name(),
            group_id: None,
            active: true,
            created_on,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> RegisterInput {
        RegisterInput {
            username: "meena".into(),
            email: "meena@example.com".into(),
            password: "long-enough".into(),
            first_name: Some("Meena".into()),
            last_name: Some(" Iyer ".into()),
            phone: None,
            role: None,
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(input().validate().is_ok());
        assert!(input().has_required_fields());
    }

    #[test]
    fn test_short_password_rejected() {
        let mut bad = input();
        bad.password = "short".into();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_bad_email_rejected() {
        let mut bad = input();
        bad.email = "not-an-email".into();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_padded_email_validates_once_normalized() {
        let mut padded = input();
        padded.username = " meena ".into();
        padded.email = "  Meena@Example.com ".into();

        let normalized = padded.normalized();
        assert!(normalized.validate().is_ok());
        assert_eq!(normalized.username, "meena");
        assert_eq!(normalized.email, "meena@example.com");
    }

    #[test]
    fn test_missing_fields_detected() {
        let mut bad = input();
        bad.username = "  ".into();
        assert!(!bad.has_required_fields());
    }

    #[test]
    fn test_display_name_trimmed() {
        assert_eq!(input().display_name().as_deref(), Some("Meena  Iyer"));

        let mut only_last = input();
        only_last.first_name = None;
        assert_eq!(only_last.display_name().as_deref(), Some("Iyer"));

        let mut none = input();
        none.first_name = None;
        none.last_name = None;
        assert_eq!(none.display_name(), None);
    }

    #[test]
    fn test_serialized_user_hides_password() {
        let now = Utc::now();
        let user = User {
            id: 1,
            username: "meena".into(),
            email: "meena@example.com".into(),
            password_hash: "$2b$10$abcdefghijklmnopqrstuv".into(),
            first_name: None,
            last_name: None,
            company: None,
            phone: None,
            profile_img: None,
            display_name: None,
            alter_number: None,
            created_on: Some(1),
            last_login: None,
            active: true,
            group_id: None,
            created_at: now,
            updated_at: now,
        };
        let entity = serde_json::to_string(&user).unwrap();
        let profile = serde_json::to_string(&user.profile()).unwrap();
        for json in [entity, profile] {
            assert!(!json.contains("password"));
            assert!(!json.contains("$2b$"));
        }
    }
}
