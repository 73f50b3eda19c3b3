use crate::cli::args::{parse_amount, parse_date, parse_id, parse_instant, Args};
use crate::cli::commands::reports::print_trip_line;
use crate::cli::commands::CommandDefinition;
use crate::cli::context::CliContext;
use crate::cli::output;
use crate::core::filter::{filter_trips, sort_by_date_desc, TripFilter};
use crate::core::services::VehicleDirectory;
use crate::domain::{PaymentMode, PaymentStatus, Trip, TripKind, TripPatch, TripStatus};
use crate::errors::{FleetError, FleetResult};
use crate::store::RecordStore;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "trips",
            "List trips, most recent first",
            "trips [--date D] [--status S] [--vehicle ID]",
            cmd_list,
        ),
        CommandDefinition::new(
            "add-trip",
            "Book a trip",
            "add-trip <vehicle-id> <datetime> <base-rate> [--type T] [--extra N] [--advance N] \
             [--status S] [--payment P] [--mode M] [--from P] [--to D] [--notes N]",
            cmd_add,
        ),
        CommandDefinition::new(
            "set-trip-status",
            "Move a trip to another lifecycle status",
            "set-trip-status <trip-id> <status>",
            cmd_set_status,
        ),
        CommandDefinition::new("delete-trip", "Remove a trip", "delete-trip <id>", cmd_delete),
    ]
}

fn cmd_list(context: &CliContext, args: &Args) -> FleetResult<()> {
    let filter = TripFilter {
        date: args.option("date").map(parse_date).transpose()?,
        status: args.parsed_option::<TripStatus>("status")?,
        vehicle_id: args.option("vehicle").map(parse_id).transpose()?,
    };
    let mut trips = filter_trips(&context.all_trips()?, &filter);
    sort_by_date_desc(&mut trips);

    let vehicles = context.all_vehicles()?;
    let directory = VehicleDirectory::new(&vehicles);
    output::section(format!("Trips ({})", trips.len()));
    for trip in &trips {
        print_trip_line(context, &directory, trip);
    }
    Ok(())
}

fn cmd_add(context: &CliContext, args: &Args) -> FleetResult<()> {
    let vehicle_id = parse_id(args.required(0, "vehicle id")?)?;
    let when = parse_instant(args.required(1, "trip date")?)?;
    let base_rate = parse_amount(args.required(2, "base rate")?)?;
    if context.vehicles.get(&vehicle_id)?.is_none() {
        output::warning(format!("No vehicle with id {vehicle_id}; booking anyway."));
    }

    let kind = args.parsed_option::<TripKind>("type")?.unwrap_or_default();
    let mut trip = Trip::new(vehicle_id, when, kind, base_rate);
    if let Some(extra) = args.option("extra") {
        trip = trip.with_extra_charges(parse_amount(extra)?);
    }
    if let Some(advance) = args.option("advance") {
        let advance = parse_amount(advance)?;
        if advance < 0 {
            return Err(FleetError::invalid("advance cannot be negative"));
        }
        trip = trip.with_advance(advance);
    }
    if let Some(status) = args.parsed_option::<TripStatus>("status")? {
        trip = trip.with_status(status);
    }
    if let Some(payment) = args.parsed_option::<PaymentStatus>("payment")? {
        trip.payment_status = payment;
    }
    trip.payment_mode = args.parsed_option::<PaymentMode>("mode")?;
    trip = trip.with_route(
        args.option("from").unwrap_or_default(),
        args.option("to").unwrap_or_default(),
    );
    trip.notes = args.option("notes").map(str::to_string);

    let total = trip.total_amount;
    let id = context.trips.create(trip)?;
    output::success(format!("Booked trip {id} for {}", context.money(total)));
    Ok(())
}

fn cmd_set_status(context: &CliContext, args: &Args) -> FleetResult<()> {
    let id = parse_id(args.required(0, "trip id")?)?;
    let status: TripStatus = args.required(1, "status")?.parse()?;
    context.trips.update(&id, TripPatch::status(status))?;
    output::success(format!("Trip {id} is now {status}"));
    Ok(())
}

fn cmd_delete(context: &CliContext, args: &Args) -> FleetResult<()> {
    let id = parse_id(args.required(0, "trip id")?)?;
    context.trips.delete(&id)?;
    output::success(format!("Deleted trip {id}"));
    Ok(())
}
