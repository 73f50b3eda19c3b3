pub mod reports;
pub mod system;
pub mod trips;
pub mod vehicles;

use once_cell::sync::Lazy;

use crate::cli::args::Args;
use crate::cli::context::CliContext;
use crate::errors::FleetResult;

pub type CommandHandler = fn(&CliContext, &Args) -> FleetResult<()>;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

static REGISTRY: Lazy<Vec<CommandDefinition>> = Lazy::new(all_definitions);

/// Every command in usage order.
pub fn registry() -> &'static [CommandDefinition] {
    &REGISTRY
}

fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(reports::definitions());
    commands.extend(vehicles::definitions());
    commands.extend(trips::definitions());
    commands.extend(system::definitions());
    commands
}
