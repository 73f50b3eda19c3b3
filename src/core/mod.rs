//! Aggregation core: money and calendar helpers, trip filters, the report
//! services and the live monitor that ties them to a store.

pub mod filter;
pub mod monitor;
pub mod money;
pub mod period;
pub mod services;
pub mod time;

pub use filter::{filter_trips, sort_by_date_desc, trips_between, TripFilter};
pub use monitor::{DashboardView, FleetMonitor};
pub use money::{format_amount, sum, DEFAULT_CURRENCY_SYMBOL};
pub use period::{date_range_for, end_of_day, start_of_day, DateRange, Period};
pub use services::*;
pub use time::{Clock, FixedClock, SystemClock};
