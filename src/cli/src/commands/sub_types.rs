//! Organization types allowed beneath a parent.

use anyhow::Result;
use clap::Args;
use mailvault_core::rbac::{get_allowed_sub_organization_types, OrganizationType};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct SubTypesArgs {
    /// Type of the parent organization (e.g. `distributor`)
    parent: String,
}

#[derive(Debug, Serialize, Tabled)]
struct SubTypeRow {
    #[tabled(rename = "Value")]
    value: OrganizationType,
    #[tabled(rename = "Label")]
    label: &'static str,
}

pub fn execute(args: SubTypesArgs, format: OutputFormat) -> Result<()> {
    let parent = OrganizationType::decode(&args.parent);
    let rows: Vec<SubTypeRow> = get_allowed_sub_organization_types(parent)
        .into_iter()
        .map(|option| SubTypeRow {
            value: option.value,
            label: option.label,
        })
        .collect();

    if format == OutputFormat::Table {
        output::print_header(&format!("Allowed under {}", parent.display_name()));
    }
    output::print_list(&rows, format)
}
