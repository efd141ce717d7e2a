//! Route guard for the console's protected pages.
//!
//! Decisions are made in a fixed order: authentication, a recognized role,
//! the administrator email ban, and finally the route's admitted roles.

use metrics::counter;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::RoutingConfig;
use crate::rbac::{get_default_dashboard_path, Role, Session};
use crate::telemetry::metrics::ROUTE_DECISIONS_TOTAL;

/// Path fragments that belong to mailbox content.
const EMAIL_PATH_FRAGMENTS: [&str; 2] = ["/accounts", "/emails"];

/// Outcome of guarding a single navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum RouteDecision {
    Allow,
    RedirectToLogin {
        login_path: String,
    },
    /// The session carries no recognized role. The caller must sign in again.
    RoleUndefined,
    /// An administrator tried to open mailbox content.
    EmailAccessForbidden {
        dashboard_path: &'static str,
    },
    Denied {
        role: Role,
        allowed: Vec<Role>,
        fallback_path: String,
    },
}

impl RouteDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Where the client should navigate instead, if anywhere.
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Allow | Self::RoleUndefined => None,
            Self::RedirectToLogin { login_path } => Some(login_path),
            Self::EmailAccessForbidden { dashboard_path } => Some(dashboard_path),
            Self::Denied { fallback_path, .. } => Some(fallback_path),
        }
    }

    /// Message to show in place of the page.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Allow | Self::RedirectToLogin { .. } => None,
            Self::RoleUndefined => Some(
                "User role is undefined. Please re-login to refresh your session.".to_string(),
            ),
            Self::EmailAccessForbidden { .. } => Some(
                "Administrators are not allowed to access email functionality.".to_string(),
            ),
            Self::Denied { role, allowed, .. } => {
                let hint = if *role == Role::EndUser {
                    "Only organization managers can access this area."
                } else {
                    "Only end users can manage email accounts and view email content."
                };
                let allowed = allowed
                    .iter()
                    .map(|r| r.display_name())
                    .collect::<Vec<_>>()
                    .join(", ");
                Some(format!(
                    "You don't have the required permissions to access this page. {} \
                     Your role: {}. Required roles: {}.",
                    hint,
                    role.display_name(),
                    allowed
                ))
            }
        }
    }

    fn outcome(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::RedirectToLogin { .. } => "redirect_to_login",
            Self::RoleUndefined => "role_undefined",
            Self::EmailAccessForbidden { .. } => "email_access_forbidden",
            Self::Denied { .. } => "denied",
        }
    }
}

/// Guards page navigations against the caller's role.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    login_path: String,
    fallback_path: String,
}

impl RouteGuard {
    pub fn new(routing: &RoutingConfig) -> Self {
        Self {
            login_path: routing.login_path.clone(),
            fallback_path: routing.fallback_path.clone(),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn fallback_path(&self) -> &str {
        &self.fallback_path
    }

    /// Decide whether `session` may open `path`, a page admitting only
    /// `allowed_roles`.
    pub fn evaluate(
        &self,
        session: Option<&Session>,
        path: &str,
        allowed_roles: &[Role],
    ) -> RouteDecision {
        let decision = self.decide(session, path, allowed_roles);
        let user_id = session.map_or("", |s| s.user_id.as_str());

        match &decision {
            RouteDecision::Allow => {
                debug!(user_id = %user_id, path = %path, "Route access granted");
            }
            RouteDecision::RedirectToLogin { .. } => {
                debug!(path = %path, "Redirecting unauthenticated caller to login");
            }
            RouteDecision::RoleUndefined => {
                warn!(user_id = %user_id, path = %path, "Session has no recognized role");
            }
            RouteDecision::EmailAccessForbidden { .. } => {
                warn!(
                    user_id = %user_id,
                    path = %path,
                    "Administrator attempted to access email functionality"
                );
            }
            RouteDecision::Denied { role, allowed, .. } => {
                warn!(
                    user_id = %user_id,
                    role = %role,
                    allowed = ?allowed,
                    path = %path,
                    "Route access denied"
                );
            }
        }

        counter!(ROUTE_DECISIONS_TOTAL, "outcome" => decision.outcome()).increment(1);
        decision
    }

    fn decide(
        &self,
        session: Option<&Session>,
        path: &str,
        allowed_roles: &[Role],
    ) -> RouteDecision {
        let Some(session) = session else {
            return RouteDecision::RedirectToLogin {
                login_path: self.login_path.clone(),
            };
        };

        let role = session.role();
        if !role.is_known() {
            return RouteDecision::RoleUndefined;
        }

        if role == Role::Admin && is_email_path(path) {
            return RouteDecision::EmailAccessForbidden {
                dashboard_path: get_default_dashboard_path(role),
            };
        }

        if !allowed_roles.contains(&role) {
            return RouteDecision::Denied {
                role,
                allowed: allowed_roles.to_vec(),
                fallback_path: self.fallback_path.clone(),
            };
        }

        RouteDecision::Allow
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(&RoutingConfig::default())
    }
}

/// Only the path component counts; query and fragment are ignored.
fn is_email_path(path: &str) -> bool {
    let pathname = path.split(['?', '#']).next().unwrap_or_default();
    EMAIL_PATH_FRAGMENTS
        .iter()
        .any(|fragment| pathname.contains(fragment))
}
