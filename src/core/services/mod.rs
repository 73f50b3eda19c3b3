//! Aggregations feeding the dashboard, revenue and report views.
//! Every function here is pure and takes its inputs by reference.

pub mod dashboard_service;
pub mod expiry_service;
pub mod revenue_service;
pub mod utilization_service;

pub use dashboard_service::{compute_dashboard_stats, DashboardStats};
pub use expiry_service::{
    compute_expiring_vehicles, ExpiryAlert, ExpiryKind, DEFAULT_EXPIRY_WINDOW_DAYS,
    MAX_EXPIRY_WINDOW_DAYS,
};
pub use revenue_service::{
    compute_period_revenue, compute_revenue_report, PeriodRevenue, RevenueReport,
};
pub use utilization_service::{
    compute_utilization_report, UtilizationReport, UtilizationRow, VehicleDirectory,
    UNKNOWN_VEHICLE_LABEL,
};
