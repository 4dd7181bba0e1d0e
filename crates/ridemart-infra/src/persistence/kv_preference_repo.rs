//! Storage-backed PreferenceRepository, partitioned by identity name

use std::sync::Arc;

use ridemart_domain::model::{PreferenceSet, PriceAlerts};
use ridemart_domain::repository::PreferenceRepository;
use ridemart_store::{keys, load_or_default, save_json, KeyValueStore};
use ridemart_types::{Error, VehicleId};

pub struct KvPreferenceRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvPreferenceRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

impl PreferenceRepository for KvPreferenceRepository {
    fn load(&self, identity_name: &str) -> PreferenceSet {
        PreferenceSet {
            favorites: load_or_default(self.store.as_ref(), &keys::favorites_key(identity_name)),
            price_alerts: load_or_default(self.store.as_ref(), &keys::price_alerts_key(identity_name)),
        }
    }

    fn save_favorites(&self, identity_name: &str, favorites: &[VehicleId]) -> Result<(), Error> {
        save_json(self.store.as_ref(), &keys::favorites_key(identity_name), favorites)?;
        Ok(())
    }

    fn save_price_alerts(&self, identity_name: &str, alerts: &PriceAlerts) -> Result<(), Error> {
        save_json(self.store.as_ref(), &keys::price_alerts_key(identity_name), alerts)?;
        Ok(())
    }
}
