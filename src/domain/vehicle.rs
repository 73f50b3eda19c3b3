//! Fleet vehicles and their compliance dates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::common::{Displayable, Identifiable, RecordId};
use crate::domain::date_value::{lenient_date, DateValue};
use crate::errors::FleetError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub number_plate: String,
    #[serde(rename = "type", default)]
    pub category: String,
    #[serde(default)]
    pub seats: u32,
    #[serde(default = "Vehicle::default_ac")]
    pub ac: bool,
    #[serde(default)]
    pub owner_type: OwnerType,
    #[serde(default)]
    pub fuel_type: String,
    #[serde(default)]
    pub status: VehicleStatus,
    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub insurance_expiry: Option<DateValue>,
    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub permit_expiry: Option<DateValue>,
}

impl Vehicle {
    pub fn new(number_plate: impl Into<String>, category: impl Into<String>, seats: u32) -> Self {
        Self {
            id: RecordId::new(),
            name: String::new(),
            number_plate: number_plate.into(),
            category: category.into(),
            seats,
            ac: Self::default_ac(),
            owner_type: OwnerType::default(),
            fuel_type: String::new(),
            status: VehicleStatus::Active,
            insurance_expiry: None,
            permit_expiry: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == VehicleStatus::Active
    }

    fn default_ac() -> bool {
        true
    }
}

impl Identifiable for Vehicle {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Displayable for Vehicle {
    fn display_label(&self) -> String {
        if self.name.trim().is_empty() {
            self.number_plate.clone()
        } else {
            format!("{} ({})", self.name, self.number_plate)
        }
    }
}

/// Partial update for a [`Vehicle`]. `None` leaves a field untouched; the
/// expiry fields use `Some(None)` to clear a date.
#[derive(Debug, Clone, Default)]
pub struct VehiclePatch {
    pub name: Option<String>,
    pub number_plate: Option<String>,
    pub category: Option<String>,
    pub seats: Option<u32>,
    pub ac: Option<bool>,
    pub owner_type: Option<OwnerType>,
    pub fuel_type: Option<String>,
    pub status: Option<VehicleStatus>,
    pub insurance_expiry: Option<Option<DateValue>>,
    pub permit_expiry: Option<Option<DateValue>>,
}

impl VehiclePatch {
    pub fn apply_to(&self, vehicle: &mut Vehicle) {
        if let Some(name) = &self.name {
            vehicle.name = name.clone();
        }
        if let Some(plate) = &self.number_plate {
            vehicle.number_plate = plate.clone();
        }
        if let Some(category) = &self.category {
            vehicle.category = category.clone();
        }
        if let Some(seats) = self.seats {
            vehicle.seats = seats;
        }
        if let Some(ac) = self.ac {
            vehicle.ac = ac;
        }
        if let Some(owner) = self.owner_type {
            vehicle.owner_type = owner;
        }
        if let Some(fuel) = &self.fuel_type {
            vehicle.fuel_type = fuel.clone();
        }
        if let Some(status) = self.status {
            vehicle.status = status;
        }
        if let Some(expiry) = &self.insurance_expiry {
            vehicle.insurance_expiry = expiry.clone();
        }
        if let Some(expiry) = &self.permit_expiry {
            vehicle.permit_expiry = expiry.clone();
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    #[default]
    Active,
    Inactive,
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VehicleStatus::Active => "active",
            VehicleStatus::Inactive => "inactive",
        })
    }
}

impl FromStr for VehicleStatus {
    type Err = FleetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(VehicleStatus::Active),
            "inactive" => Ok(VehicleStatus::Inactive),
            other => Err(FleetError::invalid(format!("unknown vehicle status `{other}`"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum OwnerType {
    #[default]
    #[serde(rename = "self")]
    Owned,
    #[serde(rename = "vendor")]
    Vendor,
}

impl fmt::Display for OwnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OwnerType::Owned => "self",
            OwnerType::Vendor => "vendor",
        })
    }
}

impl FromStr for OwnerType {
    type Err = FleetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "self" | "owned" => Ok(OwnerType::Owned),
            "vendor" => Ok(OwnerType::Vendor),
            other => Err(FleetError::invalid(format!("unknown owner type `{other}`"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn display_label_prefers_name_with_plate() {
        let plain = Vehicle::new("KA01AB1234", "sedan", 4);
        assert_eq!(plain.display_label(), "KA01AB1234");
        let named = plain.with_name("Dzire");
        assert_eq!(named.display_label(), "Dzire (KA01AB1234)");
    }

    #[test]
    fn deserializes_stored_document() {
        let id = RecordId::new();
        let raw = json!({
            "id": id,
            "numberPlate": "MH12XY0001",
            "type": "suv",
            "seats": 7,
            "ownerType": "vendor",
            "status": "inactive",
            "insuranceExpiry": {"seconds": 1_767_225_600, "nanoseconds": 0},
            "permitExpiry": 42
        });
        let vehicle: Vehicle = serde_json::from_value(raw).expect("vehicle");
        assert_eq!(vehicle.id, id);
        assert_eq!(vehicle.category, "suv");
        assert_eq!(vehicle.owner_type, OwnerType::Vendor);
        assert!(!vehicle.is_active());
        assert!(vehicle.ac);
        assert!(vehicle.insurance_expiry.is_some());
        assert!(vehicle.permit_expiry.is_none());
    }

    #[test]
    fn patch_clears_and_sets_fields() {
        let mut vehicle = Vehicle::new("KA01", "hatchback", 4);
        vehicle.permit_expiry = Some(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap().into());
        let patch = VehiclePatch {
            status: Some(VehicleStatus::Inactive),
            permit_expiry: Some(None),
            seats: Some(5),
            ..VehiclePatch::default()
        };
        patch.apply_to(&mut vehicle);
        assert_eq!(vehicle.status, VehicleStatus::Inactive);
        assert_eq!(vehicle.seats, 5);
        assert!(vehicle.permit_expiry.is_none());
    }

    #[test]
    fn parses_status_case_insensitively() {
        assert_eq!(
            "Inactive".parse::<VehicleStatus>().unwrap(),
            VehicleStatus::Inactive
        );
        assert!("retired".parse::<VehicleStatus>().is_err());
    }
}
