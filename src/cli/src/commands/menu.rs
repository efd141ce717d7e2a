//! Sidebar entries for a role.

use anyhow::Result;
use clap::Args;
use mailvault_core::navigation::{active_item, menu_for, MenuEntry};
use mailvault_core::rbac::Role;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct MenuArgs {
    /// Role name
    role: String,

    /// Mark the entry this path highlights
    #[arg(short, long)]
    path: Option<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct MenuRow {
    #[tabled(rename = "")]
    marker: &'static str,
    #[tabled(rename = "Id")]
    id: &'static str,
    #[tabled(rename = "Label")]
    label: &'static str,
    #[tabled(rename = "Path")]
    path: &'static str,
}

fn rows(entries: &[MenuEntry], active: Option<&str>) -> Vec<MenuRow> {
    entries
        .iter()
        .filter_map(|entry| match *entry {
            MenuEntry::Item { id, label, path } => Some(MenuRow {
                marker: if active == Some(id) { ">" } else { "" },
                id,
                label,
                path,
            }),
            MenuEntry::Group { label } => Some(MenuRow {
                marker: "",
                id: "",
                label,
                path: "",
            }),
            MenuEntry::Separator => None,
        })
        .collect()
}

pub fn execute(args: MenuArgs, format: OutputFormat) -> Result<()> {
    let role = Role::decode(&args.role);
    let entries = menu_for(role);
    let active = args.path.as_deref().and_then(|p| active_item(role, p));

    match format {
        OutputFormat::Table => {
            output::print_header(&format!("Menu: {}", role.display_name()));
            output::print_list(&rows(&entries, active), format)
        }
        // Structured output keeps separators so clients can render as-is.
        OutputFormat::Json | OutputFormat::Yaml => output::print_item(&entries, format),
    }
}
