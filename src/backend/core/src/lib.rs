#![allow(clippy::result_large_err)]
//! # Mailvault Core
//!
//! Access control for the multi-tenant email backup console.
//!
//! ## Architecture
//!
//! - **RBAC**: Role and organization-type decoding, capability predicates, the role catalogue,
//!   and a policy engine
//! - **Guard Layer**: Axum layer that enforces policy requirements on API routes
//! - **Navigation**: Route guard decisions and per-role sidebar menus for the web console
//! - **Telemetry**: Structured logging and metric names
//! - **Config**: File and environment based configuration

pub mod config;
pub mod error;
pub mod navigation;
pub mod rbac;
pub mod telemetry;

pub use error::{ErrorCode, ErrorSeverity, MailvaultError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, RoutingConfig};
    pub use crate::error::{ErrorCode, ErrorSeverity, MailvaultError, Result};
    pub use crate::navigation::{active_item, menu_for, MenuEntry, RouteDecision, RouteGuard};
    pub use crate::rbac::{
        OrganizationType, OrganizationTypeOption, Permission, PolicyDecision, PolicyEngine,
        PolicyError, RbacContext, RbacError, RequireAccessLayer, Requirement, Role, Session,
    };
    pub use crate::telemetry::{init_logging, LogFormat, LoggingConfig};
}
