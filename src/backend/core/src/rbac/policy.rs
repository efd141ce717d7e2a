//! Policy engine for evaluating route and action requirements.
//!
//! The policy engine answers the question:
//! "Does this session satisfy requirement R?"
//!
//! Requirements mirror the guards placed in front of protected routes: a
//! minimum role level, an exact role, a set of admitted roles, a named
//! permission, or membership of an organization type. A session whose role
//! does not decode to a known role is denied every requirement.

use metrics::counter;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

use super::models::{OrganizationType, Permission, Role};
use super::roles::{catalogue, has_role_level, RoleCatalogue};
use super::session::Session;
use crate::telemetry::metrics::ACCESS_DENIED_TOTAL;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from the policy engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("User not authenticated")]
    Unauthenticated,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Decision
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of a policy evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyDecision {
    /// The action is allowed.
    Allow,
    /// The action is denied, with a reason.
    Deny(String),
}

impl PolicyDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Deny(_))
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allow => None,
            Self::Deny(reason) => Some(reason),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Requirement
// ═══════════════════════════════════════════════════════════════════════════════

/// A condition a session must satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Requirement {
    /// Role level at or above this one (numerically at or below).
    MinLevel(u8),
    /// Exactly this role.
    Role(Role),
    /// Any of these roles.
    AnyRole(Vec<Role>),
    /// A `resource.action` permission from the role catalogue.
    Permission(Permission),
    /// Membership of an organization of this type.
    OrganizationType(OrganizationType),
}

impl Requirement {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MinLevel(_) => "min_level",
            Self::Role(_) => "role",
            Self::AnyRole(_) => "any_role",
            Self::Permission(_) => "permission",
            Self::OrganizationType(_) => "organization_type",
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinLevel(level) => write!(f, "role level <= {}", level),
            Self::Role(role) => write!(f, "role {}", role),
            Self::AnyRole(roles) => {
                let names: Vec<&str> = roles.iter().map(Role::as_str).collect();
                write!(f, "one of roles [{}]", names.join(", "))
            }
            Self::Permission(p) => write!(f, "permission {}", p),
            Self::OrganizationType(t) => write!(f, "organization type {}", t),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Policy Engine
// ═══════════════════════════════════════════════════════════════════════════════

/// Evaluates requirements against sessions using the process-wide role
/// catalogue.
///
/// Holds no mutable state; clones are cheap and can be shared freely across
/// threads.
#[derive(Debug, Clone, Copy)]
pub struct PolicyEngine {
    catalogue: &'static RoleCatalogue,
}

impl PolicyEngine {
    pub fn new() -> Self {
        Self {
            catalogue: catalogue(),
        }
    }

    pub fn catalogue(&self) -> &'static RoleCatalogue {
        self.catalogue
    }

    /// Check a single requirement.
    pub fn check(&self, session: &Session, requirement: &Requirement) -> PolicyDecision {
        let role = session.role();
        let decision = self.evaluate(session, role, requirement);

        match &decision {
            PolicyDecision::Allow => {
                debug!(
                    user_id = %session.user_id,
                    role = %role,
                    requirement = %requirement,
                    "Requirement satisfied"
                );
            }
            PolicyDecision::Deny(reason) => {
                debug!(
                    user_id = %session.user_id,
                    role = %role,
                    requirement = %requirement,
                    reason = %reason,
                    "Requirement not satisfied"
                );
                counter!(
                    ACCESS_DENIED_TOTAL,
                    "requirement" => requirement.kind(),
                    "role" => role.as_str(),
                )
                .increment(1);
            }
        }

        decision
    }

    fn evaluate(&self, session: &Session, role: Role, requirement: &Requirement) -> PolicyDecision {
        if !role.is_known() {
            return PolicyDecision::Deny(format!(
                "User {} has no recognized role",
                session.user_id
            ));
        }

        let allowed = match requirement {
            Requirement::MinLevel(level) => has_role_level(role, *level),
            Requirement::Role(required) => required.is_known() && role == *required,
            Requirement::AnyRole(roles) => roles.contains(&role),
            // Admin holds every permission and belongs to every org type.
            Requirement::Permission(permission) => {
                role == Role::Admin || self.catalogue.has_permission(role, permission)
            }
            Requirement::OrganizationType(org_type) => {
                role == Role::Admin
                    || (org_type.is_known() && session.org_type() == *org_type)
            }
        };

        if allowed {
            PolicyDecision::Allow
        } else {
            PolicyDecision::Deny(format!(
                "Role {} does not satisfy {}",
                role, requirement
            ))
        }
    }

    /// Convenience: returns `Ok(())` if allowed, `Err(PolicyError)` if denied.
    pub fn enforce(&self, session: &Session, requirement: &Requirement) -> Result<(), PolicyError> {
        match self.check(session, requirement) {
            PolicyDecision::Allow => Ok(()),
            PolicyDecision::Deny(reason) => {
                warn!(
                    user_id = %session.user_id,
                    requirement = %requirement,
                    "Access denied"
                );
                Err(PolicyError::PermissionDenied(reason))
            }
        }
    }

    /// Like [`enforce`](Self::enforce), for callers that may not have a
    /// session at all.
    pub fn authorize(
        &self,
        session: Option<&Session>,
        requirement: &Requirement,
    ) -> Result<(), PolicyError> {
        match session {
            Some(session) => self.enforce(session, requirement),
            None => Err(PolicyError::Unauthenticated),
        }
    }

    /// Returns `Allow` only if ALL requirements are satisfied.
    pub fn check_all(&self, session: &Session, requirements: &[Requirement]) -> PolicyDecision {
        for requirement in requirements {
            let decision = self.check(session, requirement);
            if decision.is_denied() {
                return decision;
            }
        }
        PolicyDecision::Allow
    }

    /// Returns `Allow` if ANY requirement is satisfied. An empty list denies.
    pub fn check_any(&self, session: &Session, requirements: &[Requirement]) -> PolicyDecision {
        for requirement in requirements {
            if self.check(session, requirement).is_allowed() {
                return PolicyDecision::Allow;
            }
        }
        PolicyDecision::Deny(format!(
            "User {} does not satisfy any of the required conditions",
            session.user_id
        ))
    }
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
