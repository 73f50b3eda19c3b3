//! Trips: a single transport job tied to one vehicle.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::{
    lenient_amount, lenient_optional_amount, Amount, Displayable, Identifiable, RecordId,
};
use crate::domain::date_value::{lenient_date, resolve_date, DateValue};
use crate::errors::FleetError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: RecordId,
    /// Weak reference; may name a vehicle that no longer exists.
    #[serde(default)]
    pub vehicle_id: RecordId,
    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub trip_date: Option<DateValue>,
    #[serde(default)]
    pub pickup_location: String,
    #[serde(default)]
    pub drop_location: String,
    #[serde(default)]
    pub trip_type: TripKind,
    #[serde(
        default,
        deserialize_with = "lenient_optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_kms: Option<i64>,
    #[serde(
        default,
        deserialize_with = "lenient_optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_hours: Option<i64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub base_rate: Amount,
    #[serde(default, deserialize_with = "lenient_optional_amount")]
    pub extra_charges: Option<Amount>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total_amount: Amount,
    #[serde(default, deserialize_with = "lenient_optional_amount")]
    pub advance_amount: Option<Amount>,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_mode: Option<PaymentMode>,
    #[serde(default)]
    pub status: TripStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Trip {
    /// Creates a scheduled, unpaid trip whose total is the base rate.
    pub fn new(
        vehicle_id: RecordId,
        trip_date: NaiveDateTime,
        kind: TripKind,
        base_rate: Amount,
    ) -> Self {
        Self {
            id: RecordId::new(),
            vehicle_id,
            trip_date: Some(trip_date.into()),
            pickup_location: String::new(),
            drop_location: String::new(),
            trip_type: kind,
            estimated_kms: None,
            estimated_hours: None,
            base_rate,
            extra_charges: None,
            total_amount: base_rate,
            advance_amount: None,
            payment_status: PaymentStatus::Unpaid,
            payment_mode: None,
            status: TripStatus::Scheduled,
            notes: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_route(mut self, pickup: impl Into<String>, drop: impl Into<String>) -> Self {
        self.pickup_location = pickup.into();
        self.drop_location = drop.into();
        self
    }

    pub fn with_extra_charges(mut self, extra: Amount) -> Self {
        self.extra_charges = Some(extra);
        self.recompute_total();
        self
    }

    pub fn with_advance(mut self, advance: Amount) -> Self {
        self.advance_amount = Some(advance);
        self
    }

    pub fn with_status(mut self, status: TripStatus) -> Self {
        self.status = status;
        self
    }

    /// Restores `total = base + extra`.
    pub fn recompute_total(&mut self) {
        self.total_amount = self.base_rate.saturating_add(self.extra());
    }

    pub fn extra(&self) -> Amount {
        self.extra_charges.unwrap_or(0)
    }

    pub fn advance(&self) -> Amount {
        self.advance_amount.unwrap_or(0)
    }

    /// Amount still owed on this trip, never negative.
    pub fn balance(&self) -> Amount {
        self.total_amount.saturating_sub(self.advance()).max(0)
    }

    pub fn resolved_date(&self) -> Option<NaiveDateTime> {
        resolve_date(self.trip_date.as_ref())
    }

    pub fn is_completed(&self) -> bool {
        self.status == TripStatus::Completed
    }

    pub fn route_label(&self) -> String {
        format!("{} -> {}", self.pickup_location, self.drop_location)
    }
}

impl Identifiable for Trip {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Displayable for Trip {
    fn display_label(&self) -> String {
        format!("trip:{} [{}] {}", self.id, self.status, self.route_label())
    }
}

/// Partial update for a [`Trip`]. Changing the base rate or extra charges
/// recomputes the stored total.
#[derive(Debug, Clone, Default)]
pub struct TripPatch {
    pub vehicle_id: Option<RecordId>,
    pub trip_date: Option<DateValue>,
    pub pickup_location: Option<String>,
    pub drop_location: Option<String>,
    pub trip_type: Option<TripKind>,
    pub base_rate: Option<Amount>,
    pub extra_charges: Option<Amount>,
    pub advance_amount: Option<Amount>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_mode: Option<PaymentMode>,
    pub status: Option<TripStatus>,
    pub notes: Option<String>,
}

impl TripPatch {
    pub fn status(status: TripStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn apply_to(&self, trip: &mut Trip) {
        if let Some(vehicle_id) = &self.vehicle_id {
            trip.vehicle_id = vehicle_id.clone();
        }
        if let Some(date) = &self.trip_date {
            trip.trip_date = Some(date.clone());
        }
        if let Some(pickup) = &self.pickup_location {
            trip.pickup_location = pickup.clone();
        }
        if let Some(drop) = &self.drop_location {
            trip.drop_location = drop.clone();
        }
        if let Some(kind) = self.trip_type {
            trip.trip_type = kind;
        }
        if let Some(base) = self.base_rate {
            trip.base_rate = base;
        }
        if let Some(extra) = self.extra_charges {
            trip.extra_charges = Some(extra);
        }
        if self.base_rate.is_some() || self.extra_charges.is_some() {
            trip.recompute_total();
        }
        if let Some(advance) = self.advance_amount {
            trip.advance_amount = Some(advance);
        }
        if let Some(payment) = self.payment_status {
            trip.payment_status = payment;
        }
        if let Some(mode) = self.payment_mode {
            trip.payment_mode = Some(mode);
        }
        if let Some(status) = self.status {
            trip.status = status;
        }
        if let Some(notes) = &self.notes {
            trip.notes = Some(notes.clone());
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TripKind {
    #[default]
    Local,
    Outstation,
    Airport,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    /// Older records use `new` for trips that have not been scheduled yet.
    #[default]
    #[serde(alias = "new")]
    Scheduled,
    Running,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Partial,
    Paid,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    Cash,
    Upi,
    Bank,
}

impl fmt::Display for TripKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TripKind::Local => "local",
            TripKind::Outstation => "outstation",
            TripKind::Airport => "airport",
        })
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TripStatus::Scheduled => "scheduled",
            TripStatus::Running => "running",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
        })
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Paid => "paid",
        })
    }
}

impl FromStr for TripKind {
    type Err = FleetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(TripKind::Local),
            "outstation" => Ok(TripKind::Outstation),
            "airport" => Ok(TripKind::Airport),
            other => Err(FleetError::invalid(format!("unknown trip type `{other}`"))),
        }
    }
}

impl FromStr for TripStatus {
    type Err = FleetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "scheduled" | "new" => Ok(TripStatus::Scheduled),
            "running" => Ok(TripStatus::Running),
            "completed" => Ok(TripStatus::Completed),
            "cancelled" => Ok(TripStatus::Cancelled),
            other => Err(FleetError::invalid(format!("unknown trip status `{other}`"))),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = FleetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "partial" => Ok(PaymentStatus::Partial),
            "paid" => Ok(PaymentStatus::Paid),
            other => Err(FleetError::invalid(format!("unknown payment status `{other}`"))),
        }
    }
}

impl FromStr for PaymentMode {
    type Err = FleetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMode::Cash),
            "upi" => Ok(PaymentMode::Upi),
            "bank" => Ok(PaymentMode::Bank),
            other => Err(FleetError::invalid(format!("unknown payment mode `{other}`"))),
        }
    }
}
