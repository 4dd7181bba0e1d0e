//! Repository trait definitions for data persistence
//!
//! Loads never fail: unreadable or corrupt data comes back empty.
//! Saves report storage errors so the caller can log them.

use ridemart_types::{Error, Vehicle, VehicleId};

use crate::model::{PreferenceSet, PriceAlerts};

/// Repository for listings submitted from this device
pub trait ListingRepository {
    /// Load user-added vehicles in submission order
    fn load_user_added(&self) -> Vec<Vehicle>;

    /// Overwrite the full user-added list
    fn save_user_added(&self, vehicles: &[Vehicle]) -> Result<(), Error>;

    /// Load the ids this device is allowed to remove
    fn load_my_listing_ids(&self) -> Vec<VehicleId>;

    /// Overwrite the "my listings" record
    fn save_my_listing_ids(&self, ids: &[VehicleId]) -> Result<(), Error>;
}

/// Repository for per-identity favorites and price alerts
pub trait PreferenceRepository {
    /// Load the preference set stored for an identity
    fn load(&self, identity_name: &str) -> PreferenceSet;

    /// Overwrite the favorites for an identity
    fn save_favorites(&self, identity_name: &str, favorites: &[VehicleId]) -> Result<(), Error>;

    /// Overwrite the price alerts for an identity
    fn save_price_alerts(&self, identity_name: &str, alerts: &PriceAlerts) -> Result<(), Error>;
}
