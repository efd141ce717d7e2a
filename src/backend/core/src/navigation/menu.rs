//! Sidebar menu per role.
//!
//! Every item carries a gate tied to one of the capability predicates, so a
//! role only ever sees entries it is allowed to open. Unknown roles get an
//! empty menu.

use serde::Serialize;
use tracing::warn;

use crate::rbac::{
    can_access_user_management, get_default_dashboard_path, should_show_email_menu,
    should_show_organization_menu, Role,
};

/// One rendered sidebar row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MenuEntry {
    Item {
        id: &'static str,
        label: &'static str,
        path: &'static str,
    },
    Separator,
    Group {
        label: &'static str,
    },
}

impl MenuEntry {
    pub fn id(&self) -> Option<&'static str> {
        match *self {
            Self::Item { id, .. } => Some(id),
            Self::Separator | Self::Group { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate {
    Always,
    Organizations,
    Users,
    Email,
}

impl Gate {
    fn admits(self, role: Role) -> bool {
        match self {
            Gate::Always => true,
            Gate::Organizations => should_show_organization_menu(role),
            Gate::Users => can_access_user_management(role),
            Gate::Email => should_show_email_menu(role),
        }
    }
}

struct Entry {
    gate: Gate,
    id: &'static str,
    label: &'static str,
    path: &'static str,
}

struct Section {
    group: &'static str,
    entries: &'static [Entry],
}

const fn entry(gate: Gate, id: &'static str, label: &'static str, path: &'static str) -> Entry {
    Entry {
        gate,
        id,
        label,
        path,
    }
}

static ADMIN_MENU: &[Section] = &[
    Section {
        group: "SYSTEM ADMINISTRATION",
        entries: &[
            entry(Gate::Organizations, "organizations", "Organizations", "/admin/organizations"),
            entry(
                Gate::Organizations,
                "create-organization",
                "Create Organization",
                "/admin/create-organization",
            ),
        ],
    },
    Section {
        group: "SETTINGS",
        entries: &[entry(Gate::Always, "settings", "System Settings", "/settings")],
    },
];

static DISTRIBUTOR_MENU: &[Section] = &[
    Section {
        group: "NETWORK MANAGEMENT",
        entries: &[
            entry(Gate::Organizations, "network", "My Network", "/distributor/network"),
            entry(Gate::Organizations, "add-dealer", "Add Dealer", "/distributor/add-dealer"),
            entry(Gate::Organizations, "add-client", "Add Client", "/distributor/add-client"),
            entry(
                Gate::Organizations,
                "network-statistics",
                "Network Statistics",
                "/distributor/statistics",
            ),
        ],
    },
    Section {
        group: "REPORTS",
        entries: &[entry(Gate::Always, "reports", "Network Reports", "/distributor/reports")],
    },
    Section {
        group: "SETTINGS",
        entries: &[entry(Gate::Always, "settings", "Settings", "/settings")],
    },
];

static DEALER_MENU: &[Section] = &[
    Section {
        group: "CLIENT MANAGEMENT",
        entries: &[
            entry(Gate::Organizations, "clients", "My Clients", "/dealer/clients"),
            entry(Gate::Organizations, "add-client", "Add Client", "/dealer/add-client"),
        ],
    },
    Section {
        group: "REPORTS",
        entries: &[entry(Gate::Always, "reports", "Client Reports", "/dealer/reports")],
    },
    Section {
        group: "SETTINGS",
        entries: &[entry(Gate::Always, "settings", "Settings", "/settings")],
    },
];

static CLIENT_MENU: &[Section] = &[
    Section {
        group: "USER MANAGEMENT",
        entries: &[
            entry(Gate::Users, "users", "User Management", "/client/users"),
            entry(Gate::Users, "add-user", "Add User", "/client/add-user"),
        ],
    },
    Section {
        group: "REPORTS",
        entries: &[entry(Gate::Always, "reports", "User Reports", "/client/reports")],
    },
    Section {
        group: "SETTINGS",
        entries: &[entry(Gate::Always, "settings", "Settings", "/settings")],
    },
];

static END_USER_MENU: &[Section] = &[
    Section {
        group: "EMAIL MANAGEMENT",
        entries: &[
            entry(Gate::Email, "emails", "Emails", "/emails"),
            entry(Gate::Email, "accounts", "Email Accounts", "/accounts"),
        ],
    },
    Section {
        group: "FOLDERS",
        entries: &[
            entry(Gate::Email, "inbox", "Inbox", "/emails?folder=INBOX"),
            entry(Gate::Email, "sent", "Sent Items", "/emails?folder=Sent Items"),
            entry(Gate::Email, "archive", "Archive", "/emails?folder=Archive"),
            entry(Gate::Email, "trash", "Deleted Items", "/emails?folder=Deleted Items"),
        ],
    },
    Section {
        group: "SETTINGS",
        entries: &[
            entry(Gate::Always, "settings", "Settings", "/settings"),
            entry(Gate::Email, "showcase", "Email Showcase", "/email-showcase"),
        ],
    },
];

fn sections_for(role: Role) -> &'static [Section] {
    match role {
        Role::Admin => ADMIN_MENU,
        Role::Distributor => DISTRIBUTOR_MENU,
        Role::Dealer => DEALER_MENU,
        Role::Client => CLIENT_MENU,
        Role::EndUser => END_USER_MENU,
        Role::Unknown => &[],
    }
}

/// Sidebar entries for `role`, dashboard first.
pub fn menu_for(role: Role) -> Vec<MenuEntry> {
    if !role.is_known() {
        warn!(role = %role, "No menu for unrecognized role");
        return Vec::new();
    }

    let mut menu = vec![MenuEntry::Item {
        id: "dashboard",
        label: "Dashboard",
        path: get_default_dashboard_path(role),
    }];

    for section in sections_for(role) {
        let visible: Vec<_> = section
            .entries
            .iter()
            .filter(|e| e.gate.admits(role))
            .map(|e| MenuEntry::Item {
                id: e.id,
                label: e.label,
                path: e.path,
            })
            .collect();
        if visible.is_empty() {
            continue;
        }
        menu.push(MenuEntry::Separator);
        menu.push(MenuEntry::Group {
            label: section.group,
        });
        menu.extend(visible);
    }

    menu
}

/// Menu id to highlight for `path` (which may carry a `?folder=` query).
///
/// Returns `None` when the matching item is not part of the role's menu.
pub fn active_item(role: Role, path: &str) -> Option<&'static str> {
    let (pathname, query) = path.split_once('?').unwrap_or((path, ""));
    let candidate = match_path(pathname, query)?;

    menu_for(role)
        .iter()
        .filter_map(MenuEntry::id)
        .find(|id| *id == candidate)
}

fn match_path(pathname: &str, query: &str) -> Option<&'static str> {
    const DASHBOARDS: [&str; 5] = [
        "/dashboard",
        "/admin/dashboard",
        "/distributor/dashboard",
        "/dealer/dashboard",
        "/client/dashboard",
    ];
    const PREFIXED: [(&str, &str); 13] = [
        ("/admin/organizations", "organizations"),
        ("/admin/create-organization", "create-organization"),
        ("/distributor/network", "network"),
        ("/distributor/add-dealer", "add-dealer"),
        ("/distributor/add-client", "add-client"),
        ("/distributor/statistics", "network-statistics"),
        ("/distributor/reports", "reports"),
        ("/dealer/clients", "clients"),
        ("/dealer/add-client", "add-client"),
        ("/dealer/reports", "reports"),
        ("/client/users", "users"),
        ("/client/add-user", "add-user"),
        ("/client/reports", "reports"),
    ];

    if DASHBOARDS.contains(&pathname) {
        return Some("dashboard");
    }
    if let Some((_, id)) = PREFIXED.iter().find(|(prefix, _)| pathname.contains(prefix)) {
        return Some(*id);
    }
    if pathname.contains("/accounts") {
        return Some("accounts");
    }
    if pathname.contains("/emails") {
        let folder = folder_param(query);
        return Some(match folder.as_deref() {
            Some("INBOX") => "inbox",
            Some("Sent Items") => "sent",
            Some("Archive") => "archive",
            Some("Deleted Items") => "trash",
            _ => "emails",
        });
    }
    if pathname.contains("/settings") {
        return Some("settings");
    }
    if pathname.contains("/email-showcase") {
        return Some("showcase");
    }
    None
}

fn folder_param(query: &str) -> Option<String> {
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("folder="))
        .map(|value| value.replace("%20", " ").replace('+', " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(role: Role) -> Vec<&'static str> {
        menu_for(role).iter().filter_map(MenuEntry::id).collect()
    }

    #[test]
    fn test_admin_menu() {
        assert_eq!(
            ids(Role::Admin),
            vec!["dashboard", "organizations", "create-organization", "settings"]
        );
        assert_eq!(
            menu_for(Role::Admin)[0],
            MenuEntry::Item {
                id: "dashboard",
                label: "Dashboard",
                path: "/admin/dashboard"
            }
        );
    }

    #[test]
    fn test_only_end_user_sees_email_items() {
        for role in Role::ALL {
            let has_email = ids(role).iter().any(|id| *id == "emails" || *id == "accounts");
            assert_eq!(has_email, role == Role::EndUser, "{}", role);
        }
    }

    #[test]
    fn test_end_user_menu_layout() {
        let menu = menu_for(Role::EndUser);
        assert_eq!(menu[1], MenuEntry::Separator);
        assert_eq!(
            menu[2],
            MenuEntry::Group {
                label: "EMAIL MANAGEMENT"
            }
        );
        assert_eq!(
            ids(Role::EndUser),
            vec![
                "dashboard", "emails", "accounts", "inbox", "sent", "archive", "trash",
                "settings", "showcase"
            ]
        );
    }

    #[test]
    fn test_management_menus() {
        assert_eq!(
            ids(Role::Distributor),
            vec![
                "dashboard",
                "network",
                "add-dealer",
                "add-client",
                "network-statistics",
                "reports",
                "settings"
            ]
        );
        assert_eq!(
            ids(Role::Dealer),
            vec!["dashboard", "clients", "add-client", "reports", "settings"]
        );
        assert_eq!(
            ids(Role::Client),
            vec!["dashboard", "users", "add-user", "reports", "settings"]
        );
    }

    #[test]
    fn test_unknown_role_has_no_menu() {
        assert!(menu_for(Role::Unknown).is_empty());
        assert_eq!(active_item(Role::Unknown, "/dashboard"), None);
    }

    #[test]
    fn test_active_item() {
        assert_eq!(active_item(Role::Dealer, "/dealer/dashboard"), Some("dashboard"));
        assert_eq!(active_item(Role::Dealer, "/dealer/clients/42"), Some("clients"));
        assert_eq!(
            active_item(Role::Distributor, "/distributor/statistics"),
            Some("network-statistics")
        );
        assert_eq!(active_item(Role::EndUser, "/emails?folder=Sent%20Items"), Some("sent"));
        assert_eq!(active_item(Role::EndUser, "/emails?page=2&folder=INBOX"), Some("inbox"));
        assert_eq!(active_item(Role::EndUser, "/emails"), Some("emails"));
        assert_eq!(active_item(Role::Client, "/settings"), Some("settings"));
    }

    #[test]
    fn test_active_item_outside_menu() {
        assert_eq!(active_item(Role::Admin, "/emails"), None);
        assert_eq!(active_item(Role::EndUser, "/admin/organizations"), None);
    }

    #[test]
    fn test_menu_serializes_tagged() {
        let json = serde_json::to_value(menu_for(Role::Client)).unwrap();
        assert_eq!(json[0]["type"], "item");
        assert_eq!(json[1], serde_json::json!({"type": "separator"}));
        assert_eq!(json[2], serde_json::json!({"type": "group", "label": "USER MANAGEMENT"}));
    }
}
