//! Capability matrix: every role against every predicate.

use anyhow::Result;
use clap::Args;
use mailvault_core::rbac::{
    self, can_access_admin_panel, can_access_emails, can_access_network_management,
    can_access_user_management, can_manage_organizations, can_manage_users,
    get_available_organization_types, get_default_dashboard_path, Role,
};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct MatrixArgs {
    /// Include a row for unrecognized roles
    #[arg(long)]
    include_unknown: bool,
}

#[derive(Debug, Serialize, Tabled)]
pub struct MatrixRow {
    #[tabled(rename = "Role")]
    role: Role,
    #[tabled(rename = "Creates")]
    creates: String,
    #[tabled(rename = "Orgs", display_with = "output::flag")]
    manage_organizations: bool,
    #[tabled(rename = "Users", display_with = "output::flag")]
    manage_users: bool,
    #[tabled(rename = "Emails", display_with = "output::flag")]
    emails: bool,
    #[tabled(rename = "Admin Panel", display_with = "output::flag")]
    admin_panel: bool,
    #[tabled(rename = "Network", display_with = "output::flag")]
    network_management: bool,
    #[tabled(rename = "User Mgmt", display_with = "output::flag")]
    user_management: bool,
    #[tabled(rename = "Dashboard")]
    dashboard: &'static str,
}

impl MatrixRow {
    pub fn for_role(role: Role) -> Self {
        let creates = get_available_organization_types(role)
            .iter()
            .map(|option| option.value.as_str())
            .collect::<Vec<_>>();

        Self {
            role,
            creates: if creates.is_empty() {
                "-".to_string()
            } else {
                creates.join(", ")
            },
            manage_organizations: can_manage_organizations(role),
            manage_users: can_manage_users(role),
            emails: can_access_emails(role),
            admin_panel: can_access_admin_panel(role),
            network_management: can_access_network_management(role),
            user_management: can_access_user_management(role),
            dashboard: get_default_dashboard_path(role),
        }
    }
}

pub fn rows(include_unknown: bool) -> Vec<MatrixRow> {
    let mut roles = Role::ALL.to_vec();
    if include_unknown {
        roles.push(Role::Unknown);
    }
    roles.into_iter().map(MatrixRow::for_role).collect()
}

pub fn execute(args: MatrixArgs, format: OutputFormat) -> Result<()> {
    let rows = rows(args.include_unknown);
    if format == OutputFormat::Table {
        output::print_header("Capability Matrix");
    }
    output::print_list(&rows, format)?;

    if format == OutputFormat::Table {
        let hidden = Role::ALL
            .iter()
            .filter(|&&role| !rbac::should_show_email_menu(role))
            .count();
        output::print_info(&format!(
            "Email menu hidden for {} of {} roles",
            hidden,
            Role::ALL.len()
        ));
    }
    Ok(())
}
