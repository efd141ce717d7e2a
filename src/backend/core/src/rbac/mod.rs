//! Role-based access control for the email backup console.
//!
//! This module provides:
//! - **Models**: `Role`, `OrganizationType`, creation options, and permission strings
//! - **Permissions**: pure predicates answering what a role may create, manage, and see
//! - **Roles**: the immutable role catalogue with levels and permission sets
//! - **Session**: the caller identity handed over by the authentication layer
//! - **Policy Engine**: evaluates route requirements against a session
//! - **Authorization Middleware**: Axum layer for request-level requirement checks
//!
//! # Usage
//!
//! ```rust
//! use mailvault_core::rbac::{self, OrganizationType, Role};
//!
//! let role = Role::decode("dealer");
//! assert!(rbac::can_create_organization(role, OrganizationType::Client));
//! assert!(!rbac::can_access_emails(role));
//! assert_eq!(rbac::get_default_dashboard_path(role), "/dealer/dashboard");
//!
//! // Anything outside the known roles fails closed.
//! let stranger = Role::decode("superuser");
//! assert!(rbac::get_available_organization_types(stranger).is_empty());
//! ```

pub mod middleware;
pub mod models;
pub mod permissions;
pub mod policy;
pub mod roles;
pub mod session;

pub use middleware::{RbacContext, RequireAccessLayer, RequireAccessService};
pub use models::{OrganizationType, OrganizationTypeOption, Permission, RbacError, Role};
pub use permissions::{
    can_access_admin_panel, can_access_emails, can_access_network_management,
    can_access_user_management, can_create_organization, can_manage_organizations,
    can_manage_users, get_allowed_sub_organization_types, get_available_organization_types,
    get_default_dashboard_path, should_show_email_menu, should_show_organization_menu,
};
pub use policy::{PolicyDecision, PolicyEngine, PolicyError, Requirement};
pub use roles::{
    can_access_dashboard, can_view_system_settings, catalogue, has_role_level, DashboardKind,
    RoleCatalogue, RoleDefinition,
};
pub use session::Session;
