//! Storage-backed ListingRepository

use std::sync::Arc;

use ridemart_domain::repository::ListingRepository;
use ridemart_store::{keys, load_or_default, save_json, KeyValueStore};
use ridemart_types::{Error, Vehicle, VehicleId};

/// Keeps user-added vehicles and the "my listings" record under global keys
pub struct KvListingRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvListingRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

impl ListingRepository for KvListingRepository {
    fn load_user_added(&self) -> Vec<Vehicle> {
        load_or_default(self.store.as_ref(), keys::USER_ADDED_VEHICLES)
    }

    fn save_user_added(&self, vehicles: &[Vehicle]) -> Result<(), Error> {
        save_json(self.store.as_ref(), keys::USER_ADDED_VEHICLES, vehicles)?;
        Ok(())
    }

    fn load_my_listing_ids(&self) -> Vec<VehicleId> {
        load_or_default(self.store.as_ref(), keys::MY_VEHICLE_IDS)
    }

    fn save_my_listing_ids(&self, ids: &[VehicleId]) -> Result<(), Error> {
        save_json(self.store.as_ref(), keys::MY_VEHICLE_IDS, ids)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridemart_store::MemoryKeyValueStore;
    use ridemart_types::{FuelType, VehicleDraft, VehicleType};

    #[test]
    fn test_round_trip_through_store() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let repo = KvListingRepository::new(store.clone());
        let vehicle = Vehicle::from_draft(
            11,
            VehicleDraft::new("Hero", "X1", 50000.0, VehicleType::Bike, FuelType::Petrol),
        );

        repo.save_user_added(std::slice::from_ref(&vehicle)).unwrap();
        repo.save_my_listing_ids(&[11]).unwrap();

        assert_eq!(repo.load_user_added(), vec![vehicle]);
        assert_eq!(repo.load_my_listing_ids(), vec![11]);
        assert_eq!(store.get(keys::MY_VEHICLE_IDS).unwrap().as_deref(), Some("[11]"));
    }

    #[test]
    fn test_corrupt_listings_degrade_to_empty() {
        let store = Arc::new(MemoryKeyValueStore::new());
        store.set(keys::USER_ADDED_VEHICLES, "{\"oops\":").unwrap();
        store.set(keys::MY_VEHICLE_IDS, "\"not a list\"").unwrap();
        let repo = KvListingRepository::new(store);

        assert!(repo.load_user_added().is_empty());
        assert!(repo.load_my_listing_ids().is_empty());
    }
}
