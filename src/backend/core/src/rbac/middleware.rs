//! Axum layer that gates routes on a policy requirement.
//!
//! The layer reads the [`Session`] placed in request extensions by the
//! authentication layer in front of it and asks the [`PolicyEngine`] whether
//! the session satisfies the route's [`Requirement`].

use axum::{
    body::Body,
    extract::{FromRequestParts, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use futures::future::BoxFuture;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::warn;

use super::models::Role;
use super::policy::{PolicyEngine, PolicyError, Requirement};
use super::session::Session;
use crate::error::MailvaultError;

// ═══════════════════════════════════════════════════════════════════════════════
// RBAC Context (extracted in handlers)
// ═══════════════════════════════════════════════════════════════════════════════

/// Authorization outcome recorded for downstream handlers.
///
/// Inserted into request extensions by [`RequireAccessService`] once the
/// requirement has been satisfied.
#[derive(Debug, Clone)]
pub struct RbacContext {
    pub user_id: String,
    pub role: Role,
    /// Organization scope for listings; `None` means unrestricted.
    pub organization_filter: Option<String>,
    pub satisfied: Requirement,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for RbacContext
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RbacContext>()
            .cloned()
            .ok_or_else(|| MailvaultError::missing_context().into_response())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tower Layer
// ═══════════════════════════════════════════════════════════════════════════════

/// Layer that wraps services with requirement enforcement.
///
/// # Example
///
/// ```rust,ignore
/// use mailvault_core::rbac::{PolicyEngine, RequireAccessLayer, Requirement, Role};
///
/// let app = Router::new()
///     .route("/admin/organizations", get(list_organizations))
///     .layer(RequireAccessLayer::new(PolicyEngine::new(), Requirement::Role(Role::Admin)));
/// ```
#[derive(Clone)]
pub struct RequireAccessLayer {
    engine: PolicyEngine,
    requirement: Requirement,
}

impl RequireAccessLayer {
    pub fn new(engine: PolicyEngine, requirement: Requirement) -> Self {
        Self { engine, requirement }
    }

    /// Admit only the listed roles.
    pub fn roles(engine: PolicyEngine, roles: impl IntoIterator<Item = Role>) -> Self {
        Self::new(engine, Requirement::AnyRole(roles.into_iter().collect()))
    }

    pub fn requirement(&self) -> &Requirement {
        &self.requirement
    }
}

impl<S> Layer<S> for RequireAccessLayer {
    type Service = RequireAccessService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequireAccessService {
            inner,
            engine: self.engine,
            requirement: self.requirement.clone(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tower Service
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct RequireAccessService<S> {
    inner: S,
    engine: PolicyEngine,
    requirement: Requirement,
}

impl<S> Service<Request<Body>> for RequireAccessService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        let engine = self.engine;
        let requirement = self.requirement.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let session = match request.extensions().get::<Session>().cloned() {
                Some(session) => session,
                None => {
                    return Ok(MailvaultError::from(PolicyError::Unauthenticated).into_response());
                }
            };

            let role = session.role();
            let decision = engine.check(&session, &requirement);

            if let Some(reason) = decision.reason() {
                warn!(
                    user_id = %session.user_id,
                    role = %role,
                    requirement = %requirement,
                    path = %request.uri().path(),
                    "Route access denied"
                );
                return Ok(MailvaultError::forbidden(reason.to_string())
                    .with_context("required", &requirement)
                    .with_context("user_role", role)
                    .into_response());
            }

            let rbac_ctx = RbacContext {
                user_id: session.user_id.clone(),
                role,
                organization_filter: session.organization_filter().map(str::to_string),
                satisfied: requirement,
            };
            request.extensions_mut().insert(rbac_ctx);

            inner.call(request).await
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_constructor() {
        let layer =
            RequireAccessLayer::roles(PolicyEngine::new(), [Role::Distributor, Role::Dealer]);
        assert_eq!(
            layer.requirement(),
            &Requirement::AnyRole(vec![Role::Distributor, Role::Dealer])
        );
    }

    #[test]
    fn test_rbac_context_creation() {
        let ctx = RbacContext {
            user_id: "alice".to_string(),
            role: Role::Client,
            organization_filter: Some("org1".to_string()),
            satisfied: Requirement::Role(Role::Client),
        };
        assert_eq!(ctx.role, Role::Client);
        assert_eq!(ctx.organization_filter.as_deref(), Some("org1"));
    }
}
