//! Identity of the caller as seen by the access-control layer.
//!
//! A `Session` carries the claims an upstream authentication layer has
//! already verified. Nothing here validates tokens; the role and
//! organization type are decoded on access so that an unexpected value can
//! only ever fail closed.

use serde::{Deserialize, Serialize};

use super::models::{OrganizationType, Role};

/// Verified identity claims for the current request or UI session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    #[serde(default)]
    pub email: String,
    /// Raw role name. Absent or empty decodes to `Role::Unknown`.
    #[serde(default)]
    pub role_name: Option<String>,
    /// Level as claimed by the token issuer. Informational only: policy
    /// checks derive the level from `role_name`.
    #[serde(default)]
    pub role_level: Option<u8>,
    #[serde(default)]
    pub organization_id: String,
    #[serde(default)]
    pub org_type: Option<String>,
}

impl Session {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role_name: Some(role.as_str().to_string()),
            role_level: role.level(),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_organization(
        mut self,
        organization_id: impl Into<String>,
        org_type: OrganizationType,
    ) -> Self {
        self.organization_id = organization_id.into();
        self.org_type = Some(org_type.as_str().to_string());
        self
    }

    /// The caller's role. A missing role is `Unknown`, never `EndUser`.
    pub fn role(&self) -> Role {
        self.role_name
            .as_deref()
            .map_or(Role::Unknown, Role::decode)
    }

    pub fn org_type(&self) -> OrganizationType {
        self.org_type
            .as_deref()
            .map_or(OrganizationType::Unknown, OrganizationType::decode)
    }

    /// Organization scope to apply to listings. Admin sees every
    /// organization; everyone else is pinned to their own.
    pub fn organization_filter(&self) -> Option<&str> {
        if self.role() == Role::Admin {
            None
        } else {
            Some(self.organization_id.as_str())
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_from_claims_json() {
        let json = serde_json::json!({
            "user_id": "u-1",
            "email": "dealer@example.com",
            "role_name": "dealer",
            "role_level": 3,
            "organization_id": "org-9",
            "org_type": "dealer",
        });
        let session: Session = serde_json::from_value(json).unwrap();
        assert_eq!(session.role(), Role::Dealer);
        assert_eq!(session.org_type(), OrganizationType::Dealer);
        assert_eq!(session.organization_filter(), Some("org-9"));
    }

    #[test]
    fn test_missing_role_is_unknown() {
        let session: Session =
            serde_json::from_value(serde_json::json!({"user_id": "u-2"})).unwrap();
        assert_eq!(session.role(), Role::Unknown);
        assert_eq!(session.org_type(), OrganizationType::Unknown);

        let mut empty = Session::new("u-3", Role::EndUser);
        empty.role_name = Some(String::new());
        assert_eq!(empty.role(), Role::Unknown);
    }

    #[test]
    fn test_admin_is_not_scoped() {
        let admin = Session::new("root", Role::Admin)
            .with_organization("sys", OrganizationType::System);
        assert_eq!(admin.organization_filter(), None);
    }

    #[test]
    fn test_builder_sets_level() {
        let session = Session::new("u-4", Role::Client).with_email("c@example.com");
        assert_eq!(session.role_level, Some(4));
        assert_eq!(session.email, "c@example.com");
    }
}
