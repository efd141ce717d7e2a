//! Role catalogue: per-role metadata and default permission sets.
//!
//! | Role        | Level | Description                                              |
//! |-------------|-------|----------------------------------------------------------|
//! | admin       | 1     | Operates the whole system; no access to mailbox content  |
//! | distributor | 2     | Runs a dealer network and its clients                    |
//! | dealer      | 3     | Manages its own client organizations                     |
//! | client      | 4     | Administers the users of a single client organization    |
//! | end_user    | 5     | Owns mailboxes; the only role that sees email            |
//!
//! The catalogue is built once per process and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use super::models::{Permission, Role};

static CATALOGUE: OnceLock<RoleCatalogue> = OnceLock::new();

static CRUD: [&str; 4] = ["create", "read", "update", "delete"];

/// Metadata and granted permissions for one known role.
#[derive(Debug, Clone, Serialize)]
pub struct RoleDefinition {
    pub role: Role,
    pub level: u8,
    pub display_name: &'static str,
    pub description: &'static str,
    pub permissions: BTreeSet<Permission>,
}

impl RoleDefinition {
    fn build(role: Role, level: u8) -> Self {
        Self {
            role,
            level,
            display_name: role.display_name(),
            description: description(role),
            permissions: default_permissions(role),
        }
    }

    pub fn has_permission(&self, permission: &Permission) -> bool {
        self.permissions.contains(permission)
    }
}

/// Immutable lookup table from role to its definition.
#[derive(Debug)]
pub struct RoleCatalogue {
    definitions: BTreeMap<Role, RoleDefinition>,
}

impl RoleCatalogue {
    fn build() -> Self {
        let definitions = Role::ALL
            .into_iter()
            .filter_map(|role| role.level().map(|level| (role, RoleDefinition::build(role, level))))
            .collect();
        Self { definitions }
    }

    /// `None` for `Role::Unknown`.
    pub fn get(&self, role: Role) -> Option<&RoleDefinition> {
        self.definitions.get(&role)
    }

    pub fn has_permission(&self, role: Role, permission: &Permission) -> bool {
        self.get(role)
            .map_or(false, |def| def.has_permission(permission))
    }

    /// Definitions in authority order, admin first.
    pub fn iter(&self) -> impl Iterator<Item = &RoleDefinition> {
        self.definitions.values()
    }
}

/// The process-wide role catalogue.
pub fn catalogue() -> &'static RoleCatalogue {
    CATALOGUE.get_or_init(RoleCatalogue::build)
}

fn description(role: Role) -> &'static str {
    match role {
        Role::Admin => "System-wide organization and settings management; no email access",
        Role::Distributor => "Manage the dealer network and its client organizations",
        Role::Dealer => "Manage client organizations",
        Role::Client => "Manage the users of a client organization",
        Role::EndUser => "Back up and browse own email accounts",
        Role::Unknown => "Unrecognized role",
    }
}

fn crud(resource: &str) -> impl Iterator<Item = Permission> + '_ {
    CRUD.iter().map(move |action| Permission::new(resource, *action))
}

fn perms<'a>(list: &'a [(&'static str, &'static str)]) -> impl Iterator<Item = Permission> + 'a {
    list.iter().map(|(r, a)| Permission::new(*r, *a))
}

/// Default permission set granted to `role`.
fn default_permissions(role: Role) -> BTreeSet<Permission> {
    let mut set = BTreeSet::new();
    match role {
        Role::Admin => {
            set.insert(Permission::new("system", "manage"));
            for resource in ["users", "organizations", "distributors", "dealers", "clients"] {
                set.extend(crud(resource));
            }
            set.extend(perms(&[
                ("emails", "read"),
                ("emails", "manage"),
                ("reports", "view"),
                ("settings", "manage"),
            ]));
        }
        Role::Distributor => {
            for resource in ["dealers", "clients", "users"] {
                set.extend(crud(resource));
            }
            set.extend(perms(&[
                ("organizations", "read"),
                ("organizations", "update"),
                ("reports", "view"),
            ]));
        }
        Role::Dealer => {
            for resource in ["clients", "users"] {
                set.extend(crud(resource));
            }
            set.extend(perms(&[
                ("organizations", "read"),
                ("organizations", "update"),
                ("reports", "view"),
            ]));
        }
        Role::Client => {
            set.extend(crud("users"));
            set.extend(perms(&[
                ("emails", "read"),
                ("emails", "manage"),
                ("organizations", "read"),
                ("organizations", "update"),
                ("reports", "view"),
            ]));
        }
        Role::EndUser => {
            set.extend(perms(&[("emails", "read"), ("emails", "manage")]));
            set.extend(crud("accounts"));
        }
        Role::Unknown => {}
    }
    set
}

// ═══════════════════════════════════════════════════════════════════════════════
// Level and dashboard checks
// ═══════════════════════════════════════════════════════════════════════════════

/// True when `role` sits at `required` or above (numerically at or below).
pub fn has_role_level(role: Role, required: u8) -> bool {
    role.level().map_or(false, |level| level <= required)
}

pub fn can_view_system_settings(role: Role) -> bool {
    has_role_level(role, 1)
}

/// The dashboards a session may be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DashboardKind {
    Admin,
    Distributor,
    Dealer,
    Client,
    EndUser,
}

impl DashboardKind {
    /// Parse a dashboard name; unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "admin" => Some(Self::Admin),
            "distributor" => Some(Self::Distributor),
            "dealer" => Some(Self::Dealer),
            "client" => Some(Self::Client),
            "end-user" => Some(Self::EndUser),
            _ => None,
        }
    }
}

/// Whether `role` may open the given dashboard. Higher roles can look at the
/// dashboards of the tiers they manage; every known role may open the
/// end-user dashboard.
pub fn can_access_dashboard(role: Role, dashboard: DashboardKind) -> bool {
    if !role.is_known() {
        return false;
    }
    match dashboard {
        DashboardKind::Admin => role == Role::Admin,
        DashboardKind::Distributor => has_role_level(role, 2),
        DashboardKind::Dealer => has_role_level(role, 3),
        DashboardKind::Client => has_role_level(role, 4),
        DashboardKind::EndUser => true,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Permission {
        Permission::parse(s).unwrap()
    }

    #[test]
    fn test_catalogue_covers_known_roles() {
        let cat = catalogue();
        assert_eq!(cat.iter().count(), 5);
        assert!(cat.get(Role::Unknown).is_none());
        let order: Vec<Role> = cat.iter().map(|d| d.role).collect();
        assert_eq!(order, Role::ALL.to_vec());
    }

    #[test]
    fn test_admin_permissions() {
        let cat = catalogue();
        assert!(cat.has_permission(Role::Admin, &p("system.manage")));
        assert!(cat.has_permission(Role::Admin, &p("distributors.delete")));
        assert!(cat.has_permission(Role::Admin, &p("settings.manage")));
        assert!(!cat.has_permission(Role::Admin, &p("accounts.create")));
    }

    #[test]
    fn test_distributor_permissions() {
        let cat = catalogue();
        assert!(cat.has_permission(Role::Distributor, &p("dealers.create")));
        assert!(cat.has_permission(Role::Distributor, &p("clients.delete")));
        assert!(!cat.has_permission(Role::Distributor, &p("organizations.create")));
        assert!(!cat.has_permission(Role::Distributor, &p("emails.read")));
    }

    #[test]
    fn test_dealer_permissions() {
        let cat = catalogue();
        assert!(cat.has_permission(Role::Dealer, &p("clients.create")));
        assert!(!cat.has_permission(Role::Dealer, &p("dealers.create")));
        assert!(cat.has_permission(Role::Dealer, &p("reports.view")));
    }

    #[test]
    fn test_client_and_end_user_permissions() {
        let cat = catalogue();
        assert!(cat.has_permission(Role::Client, &p("users.update")));
        assert!(cat.has_permission(Role::Client, &p("emails.manage")));
        assert!(!cat.has_permission(Role::Client, &p("clients.create")));

        assert!(cat.has_permission(Role::EndUser, &p("accounts.delete")));
        assert!(cat.has_permission(Role::EndUser, &p("emails.read")));
        assert!(!cat.has_permission(Role::EndUser, &p("users.read")));
        assert!(!cat.has_permission(Role::EndUser, &p("reports.view")));
    }

    #[test]
    fn test_unknown_role_has_nothing() {
        assert!(!catalogue().has_permission(Role::Unknown, &p("emails.read")));
    }

    #[test]
    fn test_has_role_level() {
        assert!(has_role_level(Role::Admin, 4));
        assert!(has_role_level(Role::Client, 4));
        assert!(!has_role_level(Role::EndUser, 4));
        assert!(!has_role_level(Role::Unknown, 5));
        assert!(can_view_system_settings(Role::Admin));
        assert!(!can_view_system_settings(Role::Distributor));
    }

    #[test]
    fn test_dashboard_access() {
        assert!(can_access_dashboard(Role::Admin, DashboardKind::Admin));
        assert!(!can_access_dashboard(Role::Distributor, DashboardKind::Admin));
        assert!(can_access_dashboard(Role::Admin, DashboardKind::Client));
        assert!(can_access_dashboard(Role::Dealer, DashboardKind::Client));
        assert!(!can_access_dashboard(Role::Client, DashboardKind::Dealer));
        assert!(can_access_dashboard(Role::EndUser, DashboardKind::EndUser));
        assert!(!can_access_dashboard(Role::EndUser, DashboardKind::Client));
        assert!(!can_access_dashboard(Role::Unknown, DashboardKind::EndUser));
    }

    #[test]
    fn test_dashboard_kind_parse() {
        assert_eq!(DashboardKind::parse("end-user"), Some(DashboardKind::EndUser));
        assert_eq!(DashboardKind::parse("end_user"), None);
        assert_eq!(DashboardKind::parse("ops"), None);
    }
}
