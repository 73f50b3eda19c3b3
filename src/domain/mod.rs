//! Pure domain models: vehicles, trips and the stored date shapes they carry.
//! No I/O happens here.

pub mod common;
pub mod date_value;
pub mod trip;
pub mod vehicle;

pub use common::{Amount, Displayable, Identifiable, RecordId};
pub use date_value::{resolve_date, DateValue, StoreTimestamp};
pub use trip::{PaymentMode, PaymentStatus, Trip, TripKind, TripPatch, TripStatus};
pub use vehicle::{OwnerType, Vehicle, VehiclePatch, VehicleStatus};
