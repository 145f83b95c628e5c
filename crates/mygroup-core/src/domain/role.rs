//! Role names and the role-to-dashboard table

use serde::{Deserialize, Serialize};

use mygroup_shared::constants::FALLBACK_DASHBOARD_ROUTE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Groups,
    Labor,
    Client,
    Corporate,
    HeadOffice,
    Regional,
    Branch,
    ClientGod,
    Partner,
    Reporter,
}

impl Role {
    pub const ALL: [Role; 11] = [
        Role::Admin,
        Role::Groups,
        Role::Labor,
        Role::Client,
        Role::Corporate,
        Role::HeadOffice,
        Role::Regional,
        Role::Branch,
        Role::ClientGod,
        Role::Partner,
        Role::Reporter,
    ];

    /// Callers allowed past the administrator gate and the ownership override.
    pub const ADMINISTRATORS: &'static [Role] = &[Role::Admin, Role::Groups];
    pub const CORPORATE: &'static [Role] = &[Role::Corporate, Role::HeadOffice, Role::Regional, Role::Branch];
    pub const CLIENTS: &'static [Role] = &[Role::Client, Role::ClientGod];
    pub const PARTNERS: &'static [Role] = &[Role::Partner];
    pub const REPORTERS: &'static [Role] = &[Role::Reporter];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Groups => "groups",
            Role::Labor => "labor",
            Role::Client => "client",
            Role::Corporate => "corporate",
            Role::HeadOffice => "head_office",
            Role::Regional => "regional",
            Role::Branch => "branch",
            Role::ClientGod => "client_god",
            Role::Partner => "partner",
            Role::Reporter => "reporter",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Role::ALL.iter().copied().find(|role| role.as_str() == s)
    }

    pub fn dashboard_route(&self) -> &'static str {
        match self {
            Role::Admin | Role::Groups => "/dashboard/admin",
            Role::Client | Role::ClientGod => "/dashboard/client",
            Role::Corporate => "/dashboard/corporate",
            Role::HeadOffice | Role::Regional | Role::Branch => "/dashboard/franchise",
            Role::Labor => "/dashboard/labor",
            Role::Partner => "/dashboard/partner",
            Role::Reporter => "/dashboard/reporter",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dashboard for the primary (first) role; users without roles land on the
/// client dashboard, unknown role names on the generic one.
pub fn dashboard_route_for(roles: &[String]) -> &'static str {
    match roles.first() {
        None => Role::Client.dashboard_route(),
        Some(primary) => Role::parse(primary)
            .map(|role| role.dashboard_route())
            .unwrap_or(FALLBACK_DASHBOARD_ROUTE),
    }
}

pub fn has_any_role(roles: &[String], allowed: &[Role]) -> bool {
    roles
        .iter()
        .any(|name| allowed.iter().any(|role| role.as_str() == name))
}
