//! Single creation decision. Exits non-zero when denied.

use anyhow::Result;
use clap::Args;
use mailvault_core::rbac::{can_create_organization, OrganizationType, Role};
use serde::Serialize;
use tracing::debug;

use super::Verdict;
use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct CanCreateArgs {
    /// Role of the acting user
    role: String,

    /// Organization type to create
    org_type: String,
}

#[derive(Debug, Serialize)]
struct CreationDecision {
    role: Role,
    org_type: OrganizationType,
    allowed: bool,
}

pub fn execute(args: CanCreateArgs, format: OutputFormat) -> Result<Verdict> {
    let role = Role::decode(&args.role);
    let org_type = OrganizationType::decode(&args.org_type);
    let allowed = can_create_organization(role, org_type);
    debug!(role = %role, org_type = %org_type, allowed, "Creation decision");

    let decision = CreationDecision {
        role,
        org_type,
        allowed,
    };

    match format {
        OutputFormat::Table => {
            let msg = format!("{} creating {}", args.role, args.org_type);
            if allowed {
                output::print_success(&msg);
            } else {
                output::print_denied(&msg);
            }
        }
        OutputFormat::Json | OutputFormat::Yaml => output::print_item(&decision, format)?,
    }

    Ok(Verdict::from(allowed))
}
