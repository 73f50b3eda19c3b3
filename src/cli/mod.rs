//! `fleet_core_cli`: one-shot commands over the JSON record stores.

mod args;
pub mod commands;
pub mod context;
pub mod output;

use std::env;

pub use args::Args;
pub use context::CliContext;

use crate::errors::{FleetError, FleetResult};
use commands::{registry, CommandDefinition};

/// Entry point used by the binary; reads `std::env::args`.
pub fn run_cli() -> FleetResult<()> {
    run_with_args(env::args().skip(1))
}

pub fn run_with_args<I, S>(raw: I) -> FleetResult<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = Args::parse(raw)?;
    let now = args
        .take_option("now")
        .map(|value| args::parse_instant(&value))
        .transpose()?;
    let definitions = registry();

    let Some(name) = args.shift() else {
        print_usage(definitions);
        return Ok(());
    };
    let Some(definition) = definitions.iter().find(|definition| definition.name == name) else {
        output::error(format!("Unknown command `{name}`"));
        print_usage(definitions);
        return Err(FleetError::invalid(format!("unknown command `{name}`")));
    };
    if definition.name == "help" {
        print_usage(definitions);
        return Ok(());
    }

    tracing::debug!(command = definition.name, "dispatching");
    let context = CliContext::open(now)?;
    (definition.handler)(&context, &args)
}

pub fn print_usage(definitions: &[CommandDefinition]) {
    output::section("Fleet Core");
    output::info("Usage: fleet_core_cli [--now <datetime>] <command> [args]");
    println!();
    let width = definitions
        .iter()
        .map(|definition| definition.usage.len())
        .max()
        .unwrap_or(0);
    for definition in definitions {
        println!("  {:<width$}  {}", definition.usage, definition.description);
    }
}
