use crate::cli::args::{parse_date, Args};
use crate::cli::commands::CommandDefinition;
use crate::cli::context::CliContext;
use crate::cli::output;
use crate::core::monitor::FleetMonitor;
use crate::core::period::{DateRange, Period};
use crate::core::services::{
    compute_expiring_vehicles, compute_period_revenue, compute_utilization_report, ExpiryAlert,
    VehicleDirectory, MAX_EXPIRY_WINDOW_DAYS,
};
use crate::domain::{Displayable, Trip};
use crate::errors::{FleetError, FleetResult};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "dashboard",
            "Today's trips, revenue and upcoming expiries",
            "dashboard",
            cmd_dashboard,
        ),
        CommandDefinition::new(
            "expiring",
            "Vehicles with insurance or permit expiring soon",
            "expiring [--days N]",
            cmd_expiring,
        ),
        CommandDefinition::new(
            "revenue",
            "Revenue for a day, ISO week or month",
            "revenue <day|week|month> [anchor]",
            cmd_revenue,
        ),
        CommandDefinition::new(
            "report",
            "Revenue and vehicle utilization between two dates",
            "report <start> <end>",
            cmd_report,
        ),
    ]
}

fn cmd_dashboard(context: &CliContext, _args: &Args) -> FleetResult<()> {
    let monitor = FleetMonitor::start(
        context.vehicles.clone(),
        context.trips.clone(),
        context.clock.clone(),
        context.config.expiry_window_days,
    )?;
    let view = monitor.current();
    let vehicles = context.all_vehicles()?;
    let directory = VehicleDirectory::new(&vehicles);

    output::section(format!("Dashboard {}", view.computed_at.format("%d %b %Y")));
    output::field("Vehicles", view.stats.total_vehicles, 16);
    output::field("Active", view.stats.active_vehicles, 16);
    output::field("Trips today", view.stats.today_trips_count, 16);
    output::field("Revenue today", context.money(view.stats.today_revenue), 16);

    if !view.stats.today_trips.is_empty() {
        output::section("Today's trips");
        for trip in &view.stats.today_trips {
            print_trip_line(context, &directory, trip);
        }
    }
    print_alerts(context, &view.expiring);
    Ok(())
}

fn cmd_expiring(context: &CliContext, args: &Args) -> FleetResult<()> {
    let days = match args.option("days") {
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|days| (1..=MAX_EXPIRY_WINDOW_DAYS).contains(days))
            .ok_or_else(|| {
                FleetError::invalid(format!(
                    "--days must be a number from 1 to {MAX_EXPIRY_WINDOW_DAYS}, got `{raw}`"
                ))
            })?,
        None => context.config.expiry_window_days,
    };
    let now = context.now();
    let alerts = compute_expiring_vehicles(&context.all_vehicles()?, now, days);
    print_alerts(context, &alerts);
    if alerts.is_empty() {
        output::success(format!("Nothing expires in the next {days} days."));
    }
    Ok(())
}

fn cmd_revenue(context: &CliContext, args: &Args) -> FleetResult<()> {
    let period: Period = args.required(0, "period (day, week or month)")?.parse()?;
    let anchor = match args.positional(1) {
        Some(anchor) => anchor.to_string(),
        None => period.default_anchor(context.now().date()),
    };
    let trips = context.all_trips()?;
    let revenue = compute_period_revenue(&trips, period, &anchor)?;
    let report = &revenue.report;

    output::section(format!("Revenue: {}", revenue.range.label));
    output::field("Trips", report.total_trips, 14);
    output::field("Completed", report.completed_trips, 14);
    output::field("Revenue", context.money(report.total_revenue), 14);
    output::field("Advance", context.money(report.total_advance), 14);
    output::field("Remaining", context.money(report.remaining_revenue), 14);
    output::field("Collectible", context.money(report.collectible_balance), 14);

    if !report.filtered_trips.is_empty() {
        let vehicles = context.all_vehicles()?;
        let directory = VehicleDirectory::new(&vehicles);
        output::section("Trips");
        for trip in &report.filtered_trips {
            print_trip_line(context, &directory, trip);
        }
    }
    Ok(())
}

fn cmd_report(context: &CliContext, args: &Args) -> FleetResult<()> {
    let start = parse_date(args.required(0, "start date")?)?;
    let end = parse_date(args.required(1, "end date")?)?;
    DateRange::full_days(start, end)?;
    let vehicles = context.all_vehicles()?;
    let report = compute_utilization_report(&context.all_trips()?, &vehicles, start, end);

    output::section(format!("Report: {}", report.range.label));
    output::field("Trips", report.total_trips, 12);
    output::field("Revenue", context.money(report.total_revenue), 12);
    output::field("Advance", context.money(report.total_advance), 12);
    output::field("Remaining", context.money(report.remaining_revenue), 12);

    output::section("Vehicle utilization");
    if report.rows.is_empty() {
        output::info("No trips in range.");
    }
    for row in &report.rows {
        output::info(format!("  {:>4}  {}", row.trips, row.label));
    }
    Ok(())
}

fn print_alerts(context: &CliContext, alerts: &[ExpiryAlert]) {
    if alerts.is_empty() {
        return;
    }
    let now = context.now();
    output::section("Expiring soon");
    for alert in alerts {
        output::warning(format!(
            "{} {} expires {} ({} days)",
            alert.vehicle.display_label(),
            alert.kind,
            alert.date.format("%d %b %Y"),
            alert.days_remaining(now)
        ));
    }
}

pub(crate) fn print_trip_line(context: &CliContext, directory: &VehicleDirectory<'_>, trip: &Trip) {
    let when = trip
        .resolved_date()
        .map(|when| when.format("%d %b %Y %H:%M").to_string())
        .unwrap_or_else(|| "undated".to_string());
    output::info(format!(
        "  {when}  {:<10} {:<9} {:>10}  balance {:<8} {}  [{}]",
        trip.status.to_string(),
        trip.trip_type.to_string(),
        context.money(trip.total_amount),
        context.money(trip.balance()),
        directory.label(&trip.vehicle_id),
        trip.id
    ));
}
