//! Marketplace data model

use chrono::NaiveDate;
use clap::ValueEnum;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

pub type VehicleId = u32;
pub type ReviewId = u32;
pub type ShowroomId = u32;

/// Free-form spec sheet; key order is the order the seller entered them.
pub type SpecSheet = IndexMap<String, String>;

/// Deserialize null as default value
fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}

/// Body style of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize)]
pub enum VehicleType {
    Bike,
    Scooter,
    Bicycle,
}

impl VehicleType {
    pub const ALL: [VehicleType; 3] = [VehicleType::Bike, VehicleType::Scooter, VehicleType::Bicycle];

    pub fn label(&self) -> &'static str {
        match self {
            VehicleType::Bike => "Bike",
            VehicleType::Scooter => "Scooter",
            VehicleType::Bicycle => "Bicycle",
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize)]
pub enum FuelType {
    Petrol,
    Electric,
    /// Pedal powered
    Manual,
}

impl FuelType {
    pub const ALL: [FuelType; 3] = [FuelType::Petrol, FuelType::Electric, FuelType::Manual];

    pub fn label(&self) -> &'static str {
        match self {
            FuelType::Petrol => "Petrol",
            FuelType::Electric => "Electric",
            FuelType::Manual => "Manual",
        }
    }
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A user review attached to a vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Unique within the owning vehicle
    pub id: ReviewId,
    pub user_name: String,
    /// 1-5 stars
    pub rating: u8,
    #[serde(default, deserialize_with = "null_to_default")]
    pub comment: String,
    /// Submission date, never changed afterwards
    pub date: NaiveDate,
}

/// Review as submitted, before an id and date are assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub user_name: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

impl ReviewDraft {
    pub fn new(user_name: impl Into<String>, rating: u8, comment: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            rating,
            comment: comment.into(),
        }
    }
}

/// Catalog listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: VehicleId,
    pub name: String,
    pub brand: String,
    /// Ex-showroom price in INR
    pub price: f64,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub fuel_type: FuelType,
    #[serde(default, deserialize_with = "null_to_default")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub mileage: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub engine: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub power: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub brakes: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub specs: SpecSheet,
    /// Mean of review ratings rounded to one decimal, 0 without reviews
    #[serde(default, deserialize_with = "null_to_default")]
    pub rating: f64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub reviews: Vec<Review>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub is_user_added: bool,
}

impl Vehicle {
    /// Build a fresh user listing from a submitted draft
    pub fn from_draft(id: VehicleId, draft: VehicleDraft) -> Self {
        Self {
            id,
            name: draft.name,
            brand: draft.brand,
            price: draft.price,
            vehicle_type: draft.vehicle_type,
            fuel_type: draft.fuel_type,
            image_url: draft.image_url,
            mileage: draft.mileage,
            engine: draft.engine,
            power: draft.power,
            brakes: draft.brakes,
            description: draft.description,
            specs: draft.specs,
            rating: 0.0,
            reviews: Vec::new(),
            is_user_added: true,
        }
    }

    /// "Brand Name" as shown in listings
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.name)
    }
}

/// Listing data supplied by a seller; id, rating and reviews are assigned by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDraft {
    pub name: String,
    pub brand: String,
    pub price: f64,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub fuel_type: FuelType,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub mileage: String,
    #[serde(default)]
    pub engine: String,
    #[serde(default)]
    pub power: String,
    #[serde(default)]
    pub brakes: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub specs: SpecSheet,
}

impl VehicleDraft {
    pub fn new(
        brand: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        vehicle_type: VehicleType,
        fuel_type: FuelType,
    ) -> Self {
        Self {
            name: name.into(),
            brand: brand.into(),
            price,
            vehicle_type,
            fuel_type,
            image_url: String::new(),
            mileage: String::new(),
            engine: String::new(),
            power: String::new(),
            brakes: String::new(),
            description: String::new(),
            specs: SpecSheet::new(),
        }
    }

    pub fn with_spec(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.specs.insert(key.into(), value.into());
        self
    }
}

/// Locally claimed user identity. Not authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Partition key for per-user storage
    pub name: String,
    pub is_dealer: bool,
}

impl Identity {
    /// Returns None when the trimmed name is empty
    pub fn new(name: &str, is_dealer: bool) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            is_dealer,
        })
    }
}

/// Dealer showroom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Showroom {
    pub id: ShowroomId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub phone: String,
    pub lat: f64,
    pub lng: f64,
}

/// AI generated pros and cons for a vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewInsight {
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

/// Triage level returned by the maintenance helper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepairAdvice {
    DiyFriendly,
    CautionAdvised,
    ProfessionalHelpRecommended,
}

impl RepairAdvice {
    pub fn label(&self) -> &'static str {
        match self {
            RepairAdvice::DiyFriendly => "DIY Friendly",
            RepairAdvice::CautionAdvised => "Proceed with Caution",
            RepairAdvice::ProfessionalHelpRecommended => "Seek Professional Help",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    pub potential_causes: Vec<String>,
    pub suggested_steps: Vec<String>,
    pub recommendation: RepairAdvice,
}

/// Photo attached to a diagnosis request
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAttachment {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
pub enum TimeSlot {
    #[default]
    Morning,
    Afternoon,
    Evening,
}

/// Test-ride booking form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRideRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub vehicle_id: VehicleId,
    pub showroom_id: ShowroomId,
    pub date: NaiveDate,
    #[serde(default)]
    pub time_slot: TimeSlot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_json_uses_storage_field_names() {
        let vehicle = Vehicle::from_draft(
            7,
            VehicleDraft::new("Hero", "X1", 50000.0, VehicleType::Bike, FuelType::Petrol),
        );
        let json = serde_json::to_value(&vehicle).unwrap();
        assert_eq!(json["type"], "Bike");
        assert_eq!(json["fuelType"], "Petrol");
        assert_eq!(json["isUserAdded"], true);
        assert_eq!(json["rating"], 0.0);
    }

    #[test]
    fn test_vehicle_tolerates_null_optional_fields() {
        let json = r#"{
            "id": 3, "name": "Activa", "brand": "Honda", "price": 80000,
            "type": "Scooter", "fuelType": "Petrol",
            "mileage": null, "specs": null, "reviews": null
        }"#;
        let vehicle: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(vehicle.mileage, "");
        assert!(vehicle.specs.is_empty());
        assert!(vehicle.reviews.is_empty());
        assert!(!vehicle.is_user_added);
    }

    #[test]
    fn test_spec_sheet_keeps_entry_order() {
        let draft = VehicleDraft::new("Ather", "450X", 150000.0, VehicleType::Scooter, FuelType::Electric)
            .with_spec("Battery", "3.7 kWh")
            .with_spec("Range", "150 km")
            .with_spec("Charging", "5h");
        let keys: Vec<_> = draft.specs.keys().cloned().collect();
        assert_eq!(keys, vec!["Battery", "Range", "Charging"]);
    }

    #[test]
    fn test_identity_requires_non_blank_name() {
        assert!(Identity::new("   ", false).is_none());
        let alice = Identity::new("  Alice ", true).unwrap();
        assert_eq!(alice.name, "Alice");
        assert!(alice.is_dealer);
    }

    #[test]
    fn test_repair_advice_wire_names() {
        let advice: RepairAdvice = serde_json::from_str("\"PROFESSIONAL_HELP_RECOMMENDED\"").unwrap();
        assert_eq!(advice, RepairAdvice::ProfessionalHelpRecommended);
        assert_eq!(serde_json::to_string(&RepairAdvice::DiyFriendly).unwrap(), "\"DIY_FRIENDLY\"");
    }
}
