use crate::cli::args::Args;
use crate::cli::commands::CommandDefinition;
use crate::cli::context::CliContext;
use crate::cli::output;
use crate::errors::FleetResult;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("version", "Show build information", "version", cmd_version),
        // Handled before a context is opened; the entry keeps it in the usage list.
        CommandDefinition::new("help", "Show this message", "help", cmd_help),
    ]
}

fn cmd_version(context: &CliContext, _args: &Args) -> FleetResult<()> {
    let meta = build_info::current();
    output::section(format!("fleet_core {}", meta.version));
    output::field("Commit", format!("{} ({})", meta.git_hash, meta.git_status), 10);
    output::field("Built", meta.timestamp, 10);
    output::field("Target", meta.target, 10);
    output::field("Profile", meta.profile, 10);
    output::field("Rustc", meta.rustc, 10);
    output::field("Data", context.data_dir.display(), 10);
    Ok(())
}

fn cmd_help(_context: &CliContext, _args: &Args) -> FleetResult<()> {
    crate::cli::print_usage(super::registry());
    Ok(())
}
