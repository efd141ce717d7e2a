//! Capability profile for a single role.

use anyhow::Result;
use clap::Args;
use mailvault_core::rbac::{
    catalogue, get_available_organization_types, get_default_dashboard_path,
    should_show_email_menu, should_show_organization_menu, OrganizationType, Role,
};
use serde::Serialize;

use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct RoleArgs {
    /// Role name as stored on the user record (e.g. `dealer`)
    role: String,
}

#[derive(Debug, Serialize)]
pub struct RoleProfile {
    role: Role,
    display_name: &'static str,
    level: Option<u8>,
    description: Option<&'static str>,
    dashboard: &'static str,
    creatable_types: Vec<OrganizationType>,
    email_menu: bool,
    organization_menu: bool,
    permissions: Vec<String>,
}

impl RoleProfile {
    pub fn build(role: Role) -> Self {
        let definition = catalogue().get(role);
        Self {
            role,
            display_name: role.display_name(),
            level: role.level(),
            description: definition.map(|d| d.description),
            dashboard: get_default_dashboard_path(role),
            creatable_types: get_available_organization_types(role)
                .into_iter()
                .map(|option| option.value)
                .collect(),
            email_menu: should_show_email_menu(role),
            organization_menu: should_show_organization_menu(role),
            permissions: definition
                .map(|d| d.permissions.iter().map(ToString::to_string).collect())
                .unwrap_or_default(),
        }
    }
}

pub fn execute(args: RoleArgs, format: OutputFormat) -> Result<()> {
    let role = Role::decode(&args.role);
    let profile = RoleProfile::build(role);

    if format != OutputFormat::Table {
        return output::print_item(&profile, format);
    }

    output::print_header(&format!("Role: {}", profile.display_name));
    output::print_detail("Name", profile.role.as_str());
    output::print_detail(
        "Level",
        &profile.level.map_or_else(|| "-".to_string(), |l| l.to_string()),
    );
    if let Some(description) = profile.description {
        output::print_detail("Description", description);
    }
    output::print_detail("Dashboard", profile.dashboard);
    output::print_detail(
        "Creates",
        &profile
            .creatable_types
            .iter()
            .map(OrganizationType::as_str)
            .collect::<Vec<_>>()
            .join(", "),
    );
    output::print_detail("Email menu", &output::flag(&profile.email_menu));
    output::print_detail("Organization menu", &output::flag(&profile.organization_menu));
    output::print_detail("Permissions", &profile.permissions.join(", "));

    if !role.is_known() {
        output::print_error(&format!(
            "{:?} is not a recognized role; every capability is denied",
            args.role
        ));
    }
    Ok(())
}
