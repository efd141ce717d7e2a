//! Route guard decision for a page path.

use anyhow::Result;
use clap::Args;
use mailvault_core::navigation::{RouteDecision, RouteGuard};
use mailvault_core::rbac::{Role, Session};

use super::Verdict;
use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct GuardArgs {
    /// Page path, e.g. `/dealer/clients`
    path: String,

    /// Role of the signed-in user. Omit to evaluate an anonymous visit.
    #[arg(short, long)]
    role: Option<String>,

    /// Roles the page admits
    #[arg(short, long = "allow", value_name = "ROLE", num_args = 1..)]
    allowed: Vec<String>,
}

fn session_for(raw_role: &str) -> Session {
    Session {
        user_id: "cli".to_string(),
        role_name: Some(raw_role.to_string()),
        role_level: Role::decode(raw_role).level(),
        ..Session::default()
    }
}

pub fn execute(args: GuardArgs, guard: &RouteGuard, format: OutputFormat) -> Result<Verdict> {
    let session = args.role.as_deref().map(session_for);
    let allowed: Vec<Role> = args.allowed.iter().map(|r| Role::decode(r)).collect();
    let decision = guard.evaluate(session.as_ref(), &args.path, &allowed);

    match format {
        OutputFormat::Table => {
            match &decision {
                RouteDecision::Allow => output::print_success(&args.path),
                RouteDecision::RedirectToLogin { login_path } => {
                    output::print_denied(&format!("not signed in, redirect to {}", login_path));
                }
                other => {
                    output::print_denied(&other.message().unwrap_or_default());
                    if let Some(target) = other.redirect_target() {
                        output::print_detail("Redirect", target);
                    }
                }
            }
        }
        OutputFormat::Json | OutputFormat::Yaml => output::print_item(&decision, format)?,
    }

    Ok(Verdict::from(decision.is_allowed()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_keeps_raw_role() {
        let session = session_for("superuser");
        assert_eq!(session.role_name.as_deref(), Some("superuser"));
        assert_eq!(session.role(), Role::Unknown);
        assert_eq!(session.role_level, None);
    }

    #[test]
    fn test_cli_session_through_guard() {
        let guard = RouteGuard::default();
        let session = session_for("admin");
        let decision = guard.evaluate(Some(&session), "/emails", &[Role::Admin]);
        assert!(matches!(decision, RouteDecision::EmailAccessForbidden { .. }));
    }
}
