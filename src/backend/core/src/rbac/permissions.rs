//! Role and organization-type permission predicates.
//!
//! Every function here is pure and total. Inputs outside the known roles or
//! organization types (`Role::Unknown`, `OrganizationType::Unknown`) land in
//! the most restrictive branch: `false`, an empty list, or `/dashboard`.
//!
//! | Role        | Creates                     | Manages orgs | Manages users | Emails |
//! |-------------|-----------------------------|--------------|---------------|--------|
//! | admin       | any type                    | yes          | yes           | no     |
//! | distributor | dealer, client              | yes          | yes           | no     |
//! | dealer      | client                      | yes          | yes           | no     |
//! | client      | -                           | no           | yes           | no     |
//! | end_user    | -                           | no           | no            | yes    |

use super::models::{OrganizationType, OrganizationTypeOption, Role};

/// Candidate types offered on creation forms, in display order.
static CREATABLE_TYPES: [OrganizationType; 3] = [
    OrganizationType::Distributor,
    OrganizationType::Dealer,
    OrganizationType::Client,
];

const ORGANIZATION_MANAGERS: [Role; 3] = [Role::Admin, Role::Distributor, Role::Dealer];

const USER_MANAGERS: [Role; 4] = [Role::Admin, Role::Distributor, Role::Dealer, Role::Client];

const NETWORK_MANAGERS: [Role; 2] = [Role::Distributor, Role::Dealer];

/// Check whether `role` may create an organization of `target`.
pub fn can_create_organization(role: Role, target: OrganizationType) -> bool {
    match role {
        // Any type under any parent.
        Role::Admin => true,
        Role::Distributor => matches!(
            target,
            OrganizationType::Dealer | OrganizationType::Client
        ),
        Role::Dealer => target == OrganizationType::Client,
        Role::Client | Role::EndUser | Role::Unknown => false,
    }
}

pub fn can_manage_organizations(role: Role) -> bool {
    ORGANIZATION_MANAGERS.contains(&role)
}

pub fn can_manage_users(role: Role) -> bool {
    USER_MANAGERS.contains(&role)
}

/// Only end users may reach email content or email accounts.
pub fn can_access_emails(role: Role) -> bool {
    role == Role::EndUser
}

/// Organization types `role` can create, in the fixed order
/// distributor, dealer, client.
pub fn get_available_organization_types(role: Role) -> Vec<OrganizationTypeOption> {
    CREATABLE_TYPES
        .iter()
        .copied()
        .filter(|&t| can_create_organization(role, t))
        .map(OrganizationTypeOption::of)
        .collect()
}

/// Organization types that may be placed directly under `parent`.
pub fn get_allowed_sub_organization_types(
    parent: OrganizationType,
) -> Vec<OrganizationTypeOption> {
    let children: &[OrganizationType] = match parent {
        OrganizationType::System => &CREATABLE_TYPES,
        OrganizationType::Distributor => &CREATABLE_TYPES[1..],
        OrganizationType::Dealer => &CREATABLE_TYPES[2..],
        OrganizationType::Client | OrganizationType::Unknown => &[],
    };
    children
        .iter()
        .copied()
        .map(OrganizationTypeOption::of)
        .collect()
}

pub fn can_access_admin_panel(role: Role) -> bool {
    role == Role::Admin
}

pub fn can_access_network_management(role: Role) -> bool {
    NETWORK_MANAGERS.contains(&role)
}

/// Client-only user management screens.
///
/// Narrower than [`can_manage_users`], which also admits admin, distributor,
/// and dealer. The two predicates are kept separate on purpose.
pub fn can_access_user_management(role: Role) -> bool {
    role == Role::Client
}

/// Landing route after login.
pub fn get_default_dashboard_path(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin/dashboard",
        Role::Distributor => "/distributor/dashboard",
        Role::Dealer => "/dealer/dashboard",
        Role::Client => "/client/dashboard",
        Role::EndUser | Role::Unknown => "/dashboard",
    }
}

pub fn should_show_email_menu(role: Role) -> bool {
    can_access_emails(role)
}

pub fn should_show_organization_menu(role: Role) -> bool {
    // The admin clause is already covered by can_manage_organizations.
    can_manage_organizations(role) || role == Role::Admin
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
