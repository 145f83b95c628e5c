//! Login types and the profile table that drives the single login flow

use serde::Deserialize;

use super::role::Role;

/// How a login endpoint narrows the user lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantScope {
    /// Any user with the username.
    Global,
    /// Tenant looked up by name from the URL; the user must belong to it.
    TenantByName,
    /// The user's `company` column must equal the name from the URL.
    Company,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoginKind {
    Admin,
    GroupAdmin,
    Company,
    Client,
    God,
    Partner,
    Reporter,
}

/// One row of the login table.
#[derive(Debug, Clone, Copy)]
pub struct LoginProfile {
    pub kind: LoginKind,
    pub scope: TenantScope,
    /// `None` admits any role.
    pub allowed_roles: Option<&'static [Role]>,
    pub denied_message: &'static str,
}

const ADMIN_LOGIN_ROLES: &[Role] = &[
    Role::Admin,
    Role::Groups,
    Role::Corporate,
    Role::HeadOffice,
    Role::Regional,
    Role::Branch,
];

const LOGIN_PROFILES: [LoginProfile; 7] = [
    LoginProfile {
        kind: LoginKind::Admin,
        scope: TenantScope::Global,
        allowed_roles: Some(ADMIN_LOGIN_ROLES),
        denied_message: "Access denied. Admin or corporate role required.",
    },
    LoginProfile {
        kind: LoginKind::GroupAdmin,
        scope: TenantScope::TenantByName,
        allowed_roles: None,
        denied_message: "Access denied.",
    },
    LoginProfile {
        kind: LoginKind::Company,
        scope: TenantScope::Company,
        allowed_roles: None,
        denied_message: "Access denied.",
    },
    LoginProfile {
        kind: LoginKind::Client,
        scope: TenantScope::TenantByName,
        allowed_roles: Some(Role::CLIENTS),
        denied_message: "Access denied. Client role required.",
    },
    LoginProfile {
        kind: LoginKind::God,
        scope: TenantScope::TenantByName,
        allowed_roles: Some(&[Role::ClientGod]),
        denied_message: "Access denied. God/Temple role required.",
    },
    LoginProfile {
        kind: LoginKind::Partner,
        scope: TenantScope::Global,
        allowed_roles: Some(Role::PARTNERS),
        denied_message: "Access denied. Partner role required.",
    },
    LoginProfile {
        kind: LoginKind::Reporter,
        scope: TenantScope::Global,
        allowed_roles: Some(Role::REPORTERS),
        denied_message: "Access denied. Reporter role required.",
    },
];

impl LoginKind {
    pub const ALL: [LoginKind; 7] = [
        LoginKind::Admin,
        LoginKind::GroupAdmin,
        LoginKind::Company,
        LoginKind::Client,
        LoginKind::God,
        LoginKind::Partner,
        LoginKind::Reporter,
    ];

    /// The tag used in URLs and by clients (`group-admin`, `god`, ...).
    pub fn tag(&self) -> &'static str {
        match self {
            LoginKind::Admin => "admin",
            LoginKind::GroupAdmin => "group-admin",
            LoginKind::Company => "company",
            LoginKind::Client => "client",
            LoginKind::God => "god",
            LoginKind::Partner => "partner",
            LoginKind::Reporter => "reporter",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        LoginKind::ALL.iter().copied().find(|kind| kind.tag() == tag)
    }

    pub fn profile(&self) -> &'static LoginProfile {
        match LOGIN_PROFILES.iter().find(|p| p.kind == *self) {
            Some(profile) => profile,
            // Every kind has a row; see `test_every_kind_has_a_profile`.
            None => &LOGIN_PROFILES[0],
        }
    }
}

impl std::fmt::Display for LoginKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl LoginProfile {
    pub fn admits(&self, roles: &[String]) -> bool {
        match self.allowed_roles {
            None => true,
            Some(allowed) => super::role::has_any_role(roles, allowed),
        }
    }
}

/// Username/password pair from a login body. Both are optional on the wire
/// so that missing fields surface as a validation error, not a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    /// Both fields present and non-empty.
    pub fn parts(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().map(str::trim).filter(|u| !u.is_empty())?;
        let password = self.password.as_deref().filter(|p| !p.is_empty())?;
        Some((username, password))
    }
}

/// Path parameters of a login request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginScope {
    /// Tenant name for tenant-scoped logins, company name for company login.
    pub name: Option<String>,
    /// Sub-group of the god login. Informational only.
    pub sub_group: Option<String>,
}

impl LoginScope {
    pub fn global() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            sub_group: None,
        }
    }

    pub fn with_sub_group(name: impl Into<String>, sub_group: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            sub_group: Some(sub_group.into()),
        }
    }
}
