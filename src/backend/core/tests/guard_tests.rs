//! Tests for console navigation: route guarding and sidebar menus.
//!
//! Tests cover:
//! - Decision order of the route guard
//! - Redirect targets from configuration
//! - Menus agreeing with the capability predicates

use mailvault_core::config::{Config, RoutingConfig};
use mailvault_core::navigation::{active_item, menu_for, MenuEntry, RouteDecision, RouteGuard};
use mailvault_core::rbac::{can_access_emails, OrganizationType, Role, Session};

fn session(role: Role) -> Session {
    Session::new(format!("{}-1", role), role).with_organization("org-1", OrganizationType::Client)
}

// ============================================================================
// Route Guard
// ============================================================================

#[test]
fn test_guard_decision_order() {
    let guard = RouteGuard::default();

    // No session beats everything, even an empty admitted list.
    assert!(matches!(
        guard.evaluate(None, "/emails", &[]),
        RouteDecision::RedirectToLogin { .. }
    ));

    // A blank role is undefined before any path rule applies.
    let mut blank = session(Role::Admin);
    blank.role_name = Some(String::new());
    assert_eq!(
        guard.evaluate(Some(&blank), "/emails", &[]),
        RouteDecision::RoleUndefined
    );

    // The admin email ban applies even when admin is admitted.
    let admin = session(Role::Admin);
    assert!(matches!(
        guard.evaluate(Some(&admin), "/accounts/7", &Role::ALL),
        RouteDecision::EmailAccessForbidden { .. }
    ));
}

#[test]
fn test_admin_email_ban_ignores_query_and_fragment() {
    let guard = RouteGuard::default();
    let admin = session(Role::Admin);

    let decision = guard.evaluate(Some(&admin), "/admin/dashboard?next=/emails", &[Role::Admin]);
    assert_eq!(decision, RouteDecision::Allow);
    assert_eq!(decision.redirect_target(), None);

    assert!(guard
        .evaluate(Some(&admin), "/admin/organizations#/accounts", &[Role::Admin])
        .is_allowed());

    // The path itself still trips the ban, whatever follows it.
    assert!(matches!(
        guard.evaluate(Some(&admin), "/emails?folder=INBOX", &Role::ALL),
        RouteDecision::EmailAccessForbidden { .. }
    ));
}

#[test]
fn test_admin_outside_email_paths() {
    let guard = RouteGuard::default();
    let admin = session(Role::Admin);

    assert!(guard
        .evaluate(Some(&admin), "/admin/organizations", &[Role::Admin])
        .is_allowed());
    assert_eq!(
        guard.evaluate(Some(&admin), "/client/users", &[Role::Client]),
        RouteDecision::Denied {
            role: Role::Admin,
            allowed: vec![Role::Client],
            fallback_path: "/dashboard".to_string(),
        }
    );
}

#[test]
fn test_email_routes_only_admit_end_users() {
    let guard = RouteGuard::default();
    for role in Role::ALL {
        let decision = guard.evaluate(Some(&session(role)), "/emails", &[Role::EndUser]);
        assert_eq!(decision.is_allowed(), can_access_emails(role), "{}", role);
    }
}

#[test]
fn test_guard_uses_configured_paths() {
    let config = Config {
        routing: RoutingConfig {
            login_path: "/auth/login".to_string(),
            fallback_path: "/home".to_string(),
        },
        ..Config::default()
    };
    let guard = RouteGuard::new(&config.routing);

    assert_eq!(guard.login_path(), "/auth/login");
    assert_eq!(
        guard.evaluate(None, "/dealer/clients", &[Role::Dealer]).redirect_target(),
        Some("/auth/login")
    );
    assert_eq!(
        guard
            .evaluate(Some(&session(Role::EndUser)), "/dealer/clients", &[Role::Dealer])
            .redirect_target(),
        Some("/home")
    );
}

#[test]
fn test_decision_serializes_tagged() {
    let guard = RouteGuard::default();
    let json = serde_json::to_value(guard.evaluate(None, "/", &[])).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"decision": "redirect_to_login", "login_path": "/login"})
    );
}

// ============================================================================
// Menus
// ============================================================================

#[test]
fn test_every_menu_item_is_reachable_by_its_role() {
    let guard = RouteGuard::default();
    for role in Role::ALL {
        let session = session(role);
        for entry in menu_for(role) {
            if let MenuEntry::Item { path, .. } = entry {
                let decision = guard.evaluate(Some(&session), path, &[role]);
                assert!(decision.is_allowed(), "{} cannot open its own {}", role, path);
            }
        }
    }
}

#[test]
fn test_menu_starts_with_role_dashboard() {
    for role in Role::ALL {
        match menu_for(role).first() {
            Some(MenuEntry::Item { id, path, .. }) => {
                assert_eq!(*id, "dashboard");
                assert_eq!(*path, mailvault_core::rbac::get_default_dashboard_path(role));
            }
            other => panic!("unexpected first entry for {}: {:?}", role, other),
        }
    }
}

#[test]
fn test_groups_are_preceded_by_separators() {
    for role in Role::ALL {
        let menu = menu_for(role);
        for (i, entry) in menu.iter().enumerate() {
            if matches!(entry, MenuEntry::Group { .. }) {
                assert_eq!(menu[i - 1], MenuEntry::Separator);
            }
        }
    }
}

#[test]
fn test_active_item_tracks_menu() {
    assert_eq!(active_item(Role::Admin, "/admin/dashboard"), Some("dashboard"));
    assert_eq!(active_item(Role::Admin, "/admin/create-organization"), Some("create-organization"));
    assert_eq!(active_item(Role::EndUser, "/emails?folder=Deleted+Items"), Some("trash"));
    assert_eq!(active_item(Role::EndUser, "/email-showcase"), Some("showcase"));
    assert_eq!(active_item(Role::Dealer, "/unknown/page"), None);
}
