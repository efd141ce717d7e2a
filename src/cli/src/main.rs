//! Mailvault CLI - inspect the console's role-based access decisions.
//!
//! Every answer comes from the same evaluator the web console and API use,
//! so the commands double as a quick audit of what each role can reach.

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mailvault_core::config::Config;
use mailvault_core::navigation::RouteGuard;
use mailvault_core::telemetry::{describe_metrics, init_logging, LogFormat, LogWriter};

use commands::{can_create, guard, matrix, menu, role, sub_types, Verdict};
use output::OutputFormat;

/// Mailvault - role-based access for the email backup console
#[derive(Parser)]
#[command(
    name = "mailvault",
    version = "0.1.0",
    about = "Mailvault - role-based access for the email backup console",
    long_about = "Inspect which roles may create organizations, see menus, and open console pages.",
    propagate_version = true
)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "table")]
    output: OutputFormat,

    /// Configuration file (environment variables still override it)
    #[arg(long, global = true, env = "MAILVAULT_CONFIG")]
    config: Option<PathBuf>,

    /// Log evaluator decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every role against every capability
    Matrix(matrix::MatrixArgs),

    /// Show the capability profile of one role
    Role(role::RoleArgs),

    /// Decide whether a role may create an organization type
    CanCreate(can_create::CanCreateArgs),

    /// List organization types allowed under a parent type
    SubTypes(sub_types::SubTypesArgs),

    /// Show the sidebar menu of a role
    Menu(menu::MenuArgs),

    /// Evaluate the route guard for a page
    Guard(guard::GuardArgs),
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            let path = path.to_str().context("config path is not valid UTF-8")?;
            Config::from_file(path).with_context(|| format!("failed to load {}", path))
        }
        None => Config::load().context("failed to load configuration from environment"),
    }
}

fn run(cli: Cli) -> Result<Verdict> {
    let mut config = load_config(cli.config.as_ref())?;

    if cli.verbose {
        config.logging.level = "debug".to_string();
        config.logging.format = LogFormat::Compact;
        config.logging.writer = LogWriter::Stderr;
        init_logging(&config.logging)?;
        describe_metrics();
    }

    let format = cli.output;
    match cli.command {
        Commands::Matrix(args) => matrix::execute(args, format).map(|_| Verdict::Allowed),
        Commands::Role(args) => role::execute(args, format).map(|_| Verdict::Allowed),
        Commands::CanCreate(args) => can_create::execute(args, format),
        Commands::SubTypes(args) => sub_types::execute(args, format).map(|_| Verdict::Allowed),
        Commands::Menu(args) => menu::execute(args, format).map(|_| Verdict::Allowed),
        Commands::Guard(args) => {
            let guard = RouteGuard::new(&config.routing);
            guard::execute(args, &guard, format)
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(cli) {
        Ok(Verdict::Allowed) => {}
        Ok(Verdict::Denied) => std::process::exit(1),
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            std::process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_guard() {
        let cli = Cli::try_parse_from([
            "mailvault",
            "-o",
            "json",
            "guard",
            "/emails",
            "--role",
            "end_user",
            "--allow",
            "end_user",
            "client",
        ])
        .unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Guard(_)));
    }

    #[test]
    fn test_parse_can_create() {
        let cli = Cli::try_parse_from(["mailvault", "can-create", "dealer", "client"]).unwrap();
        assert!(matches!(cli.command, Commands::CanCreate(_)));
    }
}
