//! RBAC data models: roles, organization types, creation options, and
//! permission strings.
//!
//! Roles and organization types arrive as plain strings from the identity
//! store. They are closed enums here, each with an explicit `Unknown`
//! variant. [`Role::decode`] and [`OrganizationType::decode`] are total and
//! send anything unrecognised to `Unknown`, which every predicate treats as
//! the most restrictive case. Strict parsing is available through `FromStr`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors raised by strict parsing of RBAC values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RbacError {
    #[error("Unknown role: {0:?}")]
    UnknownRole(String),

    #[error("Unknown organization type: {0:?}")]
    UnknownOrganizationType(String),

    #[error("Invalid permission {0:?}, expected `resource.action`")]
    InvalidPermission(String),
}

// ═══════════════════════════════════════════════════════════════════════════════
// Role
// ═══════════════════════════════════════════════════════════════════════════════

/// A user's position in the access hierarchy.
///
/// Authority decreases from `Admin` to `Client`. `EndUser` is a terminal leaf
/// with its own capability set: it is the only role with email access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Role {
    Admin,
    Distributor,
    Dealer,
    Client,
    EndUser,
    /// Any role string outside the known set.
    Unknown,
}

impl Role {
    /// The five known roles, highest authority first.
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Distributor,
        Role::Dealer,
        Role::Client,
        Role::EndUser,
    ];

    /// Decode a role name. Never fails: unrecognised input becomes `Unknown`.
    pub fn decode(name: &str) -> Self {
        match name {
            "admin" => Self::Admin,
            "distributor" => Self::Distributor,
            "dealer" => Self::Dealer,
            "client" => Self::Client,
            "end_user" => Self::EndUser,
            _ => Self::Unknown,
        }
    }

    /// Wire name of the role.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Distributor => "distributor",
            Self::Dealer => "dealer",
            Self::Client => "client",
            Self::EndUser => "end_user",
            Self::Unknown => "unknown",
        }
    }

    /// Privilege level; lower numbers carry more authority.
    pub const fn level(&self) -> Option<u8> {
        match self {
            Self::Admin => Some(1),
            Self::Distributor => Some(2),
            Self::Dealer => Some(3),
            Self::Client => Some(4),
            Self::EndUser => Some(5),
            Self::Unknown => None,
        }
    }

    /// Human-readable role name.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Admin => "System Administrator",
            Self::Distributor => "Distributor",
            Self::Dealer => "Dealer",
            Self::Client => "Client Administrator",
            Self::EndUser => "End User",
            Self::Unknown => "Unknown",
        }
    }

    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::decode(s) {
            Self::Unknown => Err(RbacError::UnknownRole(s.to_string())),
            role => Ok(role),
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Self::decode(s)
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Self::decode(&s)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Organization Type
// ═══════════════════════════════════════════════════════════════════════════════

/// Classification of a node in the organization tree
/// `system → distributor → dealer → client`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum OrganizationType {
    /// Root of the tree. Never created through the permission model.
    System,
    Distributor,
    Dealer,
    Client,
    /// Any organization type string outside the known set.
    Unknown,
}

impl OrganizationType {
    /// The four known organization types, root first.
    pub const ALL: [OrganizationType; 4] = [
        OrganizationType::System,
        OrganizationType::Distributor,
        OrganizationType::Dealer,
        OrganizationType::Client,
    ];

    /// Decode an organization type. Never fails: unrecognised input becomes
    /// `Unknown`.
    pub fn decode(name: &str) -> Self {
        match name {
            "system" => Self::System,
            "distributor" => Self::Distributor,
            "dealer" => Self::Dealer,
            "client" => Self::Client,
            _ => Self::Unknown,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Distributor => "distributor",
            Self::Dealer => "dealer",
            Self::Client => "client",
            Self::Unknown => "unknown",
        }
    }

    /// Label shown in selection lists.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::System => "System",
            Self::Distributor => "Distributor",
            Self::Dealer => "Dealer",
            Self::Client => "Client",
            Self::Unknown => "Unknown",
        }
    }

    /// The organization type one level up the tree.
    pub const fn parent(&self) -> Option<OrganizationType> {
        match self {
            Self::Distributor => Some(Self::System),
            Self::Dealer => Some(Self::Distributor),
            Self::Client => Some(Self::Dealer),
            Self::System | Self::Unknown => None,
        }
    }

    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for OrganizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrganizationType {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::decode(s) {
            Self::Unknown => Err(RbacError::UnknownOrganizationType(s.to_string())),
            org_type => Ok(org_type),
        }
    }
}

impl From<&str> for OrganizationType {
    fn from(s: &str) -> Self {
        Self::decode(s)
    }
}

impl From<String> for OrganizationType {
    fn from(s: String) -> Self {
        Self::decode(&s)
    }
}

/// A selectable organization type, as offered by creation forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrganizationTypeOption {
    pub value: OrganizationType,
    pub label: &'static str,
}

impl OrganizationTypeOption {
    pub const fn of(value: OrganizationType) -> Self {
        Self {
            value,
            label: value.display_name(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Permission
// ═══════════════════════════════════════════════════════════════════════════════

/// A permission names an action on a resource type.
///
/// Permissions use the format `resource.action`, for example:
/// - `users.create`
/// - `organizations.read`
/// - `emails.manage`
/// - `settings.manage`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Permission {
    /// The resource type (e.g., "users", "dealers", "emails").
    pub resource: String,
    /// The action (e.g., "create", "read", "manage", "view").
    pub action: String,
}

impl Permission {
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
        }
    }

    /// Parse `"resource.action"`. Both halves must be non-empty and the
    /// action may not contain another separator.
    pub fn parse(s: &str) -> Result<Self, RbacError> {
        match s.split_once('.') {
            Some((resource, action))
                if !resource.is_empty() && !action.is_empty() && !action.contains('.') =>
            {
                Ok(Self::new(resource, action))
            }
            _ => Err(RbacError::InvalidPermission(s.to_string())),
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.resource, self.action)
    }
}

impl FromStr for Permission {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Permission> for String {
    fn from(p: Permission) -> Self {
        p.to_string()
    }
}

impl TryFrom<String> for Permission {
    type Error = RbacError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_decode_known() {
        for role in Role::ALL {
            assert_eq!(Role::decode(role.as_str()), role);
        }
    }

    #[test]
    fn test_role_decode_falls_back_to_unknown() {
        assert_eq!(Role::decode(""), Role::Unknown);
        assert_eq!(Role::decode("Admin"), Role::Unknown);
        assert_eq!(Role::decode(" admin"), Role::Unknown);
        assert_eq!(Role::decode("superuser"), Role::Unknown);
        assert_eq!(Role::decode("unknown"), Role::Unknown);
    }

    #[test]
    fn test_role_from_str_is_strict() {
        assert_eq!("dealer".parse::<Role>().unwrap(), Role::Dealer);
        assert_eq!(
            "root".parse::<Role>(),
            Err(RbacError::UnknownRole("root".to_string()))
        );
    }

    #[test]
    fn test_role_levels() {
        assert_eq!(Role::Admin.level(), Some(1));
        assert_eq!(Role::EndUser.level(), Some(5));
        assert_eq!(Role::Unknown.level(), None);
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::EndUser).unwrap(), "\"end_user\"");
        let role: Role = serde_json::from_str("\"distributor\"").unwrap();
        assert_eq!(role, Role::Distributor);
        let role: Role = serde_json::from_str("\"godmode\"").unwrap();
        assert_eq!(role, Role::Unknown);
    }

    #[test]
    fn test_organization_type_parents_follow_tree() {
        assert_eq!(OrganizationType::System.parent(), None);
        assert_eq!(
            OrganizationType::Distributor.parent(),
            Some(OrganizationType::System)
        );
        assert_eq!(
            OrganizationType::Dealer.parent(),
            Some(OrganizationType::Distributor)
        );
        assert_eq!(
            OrganizationType::Client.parent(),
            Some(OrganizationType::Dealer)
        );
        assert_eq!(OrganizationType::Unknown.parent(), None);
    }

    #[test]
    fn test_organization_type_decode() {
        assert_eq!(OrganizationType::decode("system"), OrganizationType::System);
        assert_eq!(OrganizationType::decode("tenant"), OrganizationType::Unknown);
        assert!("end_user".parse::<OrganizationType>().is_err());
    }

    #[test]
    fn test_option_label() {
        let opt = OrganizationTypeOption::of(OrganizationType::Dealer);
        assert_eq!(opt.label, "Dealer");
        let json = serde_json::to_value(opt).unwrap();
        assert_eq!(json, serde_json::json!({"value": "dealer", "label": "Dealer"}));
    }

    #[test]
    fn test_permission_parse() {
        let perm = Permission::parse("users.create").unwrap();
        assert_eq!(perm.resource, "users");
        assert_eq!(perm.action, "create");
        assert_eq!(perm.to_string(), "users.create");

        assert!(Permission::parse("invalid").is_err());
        assert!(Permission::parse(".read").is_err());
        assert!(Permission::parse("users.").is_err());
        assert!(Permission::parse("a.b.c").is_err());
    }

    #[test]
    fn test_permission_serde_as_string() {
        let perm = Permission::new("emails", "read");
        assert_eq!(serde_json::to_string(&perm).unwrap(), "\"emails.read\"");
        let back: Permission = serde_json::from_str("\"reports.view\"").unwrap();
        assert_eq!(back, Permission::new("reports", "view"));
        assert!(serde_json::from_str::<Permission>("\"bogus\"").is_err());
    }
}
