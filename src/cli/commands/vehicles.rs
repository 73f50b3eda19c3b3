use crate::cli::args::{parse_id, parse_instant, Args};
use crate::cli::commands::CommandDefinition;
use crate::cli::context::CliContext;
use crate::cli::output;
use crate::domain::{resolve_date, Displayable, DateValue, OwnerType, Vehicle, VehicleStatus};
use crate::errors::{FleetError, FleetResult};
use crate::store::RecordStore;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("vehicles", "List vehicles", "vehicles", cmd_list),
        CommandDefinition::new(
            "add-vehicle",
            "Register a vehicle",
            "add-vehicle <plate> <type> <seats> [--name N] [--insurance D] [--permit D] \
             [--fuel F] [--owner self|vendor] [--status active|inactive]",
            cmd_add,
        ),
        CommandDefinition::new(
            "delete-vehicle",
            "Remove a vehicle (its trips are kept)",
            "delete-vehicle <id>",
            cmd_delete,
        ),
    ]
}

fn cmd_list(context: &CliContext, _args: &Args) -> FleetResult<()> {
    let mut vehicles = context.all_vehicles()?;
    vehicles.sort_by(|a, b| a.display_label().cmp(&b.display_label()));
    output::section(format!("Vehicles ({})", vehicles.len()));
    for vehicle in &vehicles {
        output::info(format!(
            "  {:<28} {:<10} {:>2} seats  {:<8}  insurance {}  permit {}  [{}]",
            vehicle.display_label(),
            vehicle.category,
            vehicle.seats,
            vehicle.status.to_string(),
            expiry_text(vehicle.insurance_expiry.as_ref()),
            expiry_text(vehicle.permit_expiry.as_ref()),
            vehicle.id
        ));
    }
    Ok(())
}

fn cmd_add(context: &CliContext, args: &Args) -> FleetResult<()> {
    let plate = args.required(0, "number plate")?;
    let category = args.required(1, "vehicle type")?;
    let seats_raw = args.required(2, "seat count")?;
    let seats: u32 = seats_raw.trim().parse().map_err(|_| {
        FleetError::invalid(format!("seat count must be a number, got `{seats_raw}`"))
    })?;

    let mut vehicle = Vehicle::new(plate, category, seats);
    if let Some(name) = args.option("name") {
        vehicle = vehicle.with_name(name);
    }
    if let Some(fuel) = args.option("fuel") {
        vehicle.fuel_type = fuel.to_string();
    }
    if let Some(owner) = args.parsed_option::<OwnerType>("owner")? {
        vehicle.owner_type = owner;
    }
    if let Some(status) = args.parsed_option::<VehicleStatus>("status")? {
        vehicle.status = status;
    }
    vehicle.insurance_expiry = expiry_option(args, "insurance")?;
    vehicle.permit_expiry = expiry_option(args, "permit")?;

    let label = vehicle.display_label();
    let id = context.vehicles.create(vehicle)?;
    output::success(format!("Added {label} [{id}]"));
    Ok(())
}

fn cmd_delete(context: &CliContext, args: &Args) -> FleetResult<()> {
    let id = parse_id(args.required(0, "vehicle id")?)?;
    context.vehicles.delete(&id)?;
    output::success(format!("Deleted vehicle {id}"));
    Ok(())
}

fn expiry_option(args: &Args, name: &str) -> FleetResult<Option<DateValue>> {
    args.option(name)
        .map(|raw| parse_instant(raw).map(|when| DateValue::Date(when.date())))
        .transpose()
}

fn expiry_text(value: Option<&DateValue>) -> String {
    resolve_date(value)
        .map(|when| when.format("%d %b %Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}
