//! Marketplace facade
//!
//! Owns the catalog, identity, preferences, comparison selection and browse
//! filters, and keeps derived state (filter bounds, notifications) in step
//! after every catalog mutation.

use ridemart_domain::repository::{ListingRepository, PreferenceRepository};
use ridemart_domain::service::comparison::build_comparison_table;
use ridemart_domain::service::test_ride::{book_test_ride, TestRideConfirmation};
use ridemart_domain::service::{
    dealer_stats, favorite_vehicles, price_drop_notifications, recommendation_candidates, showroom,
    ComparisonTable, DealerStats,
};
use ridemart_types::{
    Identity, Result, ReviewDraft, Showroom, TestRideRequest, Vehicle, VehicleDraft, VehicleId,
};
use tracing::info;

use crate::browse::BrowseFilters;
use crate::catalog::CatalogStore;
use crate::compare::{CompareSelector, CompareToggle};
use crate::identity::IdentityHolder;
use crate::preferences::PreferenceStore;

/// Vehicle whose price the demo price drop lowers
pub const PRICE_DROP_VEHICLE: VehicleId = 1;
pub const PRICE_DROP_FACTOR: f64 = 0.95;

pub struct Marketplace {
    catalog: CatalogStore,
    identity: IdentityHolder,
    preferences: PreferenceStore,
    compare: CompareSelector,
    filters: BrowseFilters,
    showrooms: Vec<Showroom>,
    price_drop_simulated: bool,
}

impl Marketplace {
    pub fn new(
        seed: Vec<Vehicle>,
        showrooms: Vec<Showroom>,
        listings: Box<dyn ListingRepository>,
        preferences: Box<dyn PreferenceRepository>,
    ) -> Self {
        let catalog = CatalogStore::load(seed, listings);
        let filters = BrowseFilters::new(catalog.list());
        Self {
            catalog,
            identity: IdentityHolder::default(),
            preferences: PreferenceStore::new(preferences),
            compare: CompareSelector::default(),
            filters,
            showrooms,
            price_drop_simulated: false,
        }
    }

    // ---- catalog ----

    pub fn list(&self) -> &[Vehicle] {
        self.catalog.list()
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.catalog.get(id)
    }

    pub fn my_listings(&self) -> Vec<&Vehicle> {
        self.catalog.my_listings()
    }

    pub fn add_listing(&mut self, draft: VehicleDraft) -> Option<Vehicle> {
        let vehicle = self.catalog.add(draft)?;
        self.catalog_changed();
        Some(vehicle)
    }

    pub fn remove_listing(&mut self, id: VehicleId) -> bool {
        let removed = self.catalog.remove(id);
        if removed {
            self.compare.remove(id);
            self.catalog_changed();
        }
        removed
    }

    pub fn add_review(&mut self, id: VehicleId, draft: ReviewDraft) -> bool {
        self.catalog.add_review(id, draft)
    }

    pub fn set_price(&mut self, id: VehicleId, price: f64) -> bool {
        let changed = self.catalog.set_price(id, price);
        if changed {
            self.catalog_changed();
        }
        changed
    }

    /// Lower the demo vehicle's price by 5% once per session.
    /// Returns the new price when the drop was applied.
    pub fn simulate_price_drop(&mut self) -> Option<f64> {
        if self.price_drop_simulated {
            return None;
        }
        let current = self.catalog.get(PRICE_DROP_VEHICLE)?.price;
        let dropped = (current * PRICE_DROP_FACTOR).round();
        self.price_drop_simulated = true;
        info!(id = PRICE_DROP_VEHICLE, from = current, to = dropped, "simulated price drop");
        self.set_price(PRICE_DROP_VEHICLE, dropped);
        Some(dropped)
    }

    fn catalog_changed(&mut self) {
        self.filters.sync_bounds(self.catalog.list());
    }

    // ---- identity ----

    /// Sets the identity and loads its preferences; a blank name is ignored
    pub fn login(&mut self, name: &str, is_dealer: bool) -> bool {
        let Some(identity) = self.identity.login(name, is_dealer) else {
            return false;
        };
        let owner = identity.name.clone();
        self.preferences.load_for(&owner);
        true
    }

    pub fn logout(&mut self) {
        self.identity.logout();
        self.preferences.reset();
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.current()
    }

    // ---- preferences ----

    pub fn toggle_favorite(&mut self, id: VehicleId) -> bool {
        self.preferences.toggle_favorite(id)
    }

    pub fn is_favorite(&self, id: VehicleId) -> bool {
        self.preferences.is_favorite(id)
    }

    /// Arm at the vehicle's current price, or disarm. Unknown vehicles are ignored.
    pub fn toggle_price_alert(&mut self, id: VehicleId) -> bool {
        match self.catalog.get(id) {
            Some(vehicle) => {
                let price = vehicle.price;
                self.preferences.toggle_price_alert(id, price)
            }
            None => self.preferences.is_alert_set(id),
        }
    }

    pub fn is_alert_set(&self, id: VehicleId) -> bool {
        self.preferences.is_alert_set(id)
    }

    pub fn alert_price(&self, id: VehicleId) -> Option<f64> {
        self.preferences.price_alerts().get(&id).copied()
    }

    pub fn dismiss_notification(&mut self, id: VehicleId) {
        self.preferences.dismiss_notification(id);
    }

    /// Vehicles now priced below their armed alert
    pub fn notifications(&self) -> Vec<&Vehicle> {
        price_drop_notifications(self.catalog.list(), self.preferences.price_alerts())
    }

    pub fn favorite_vehicles(&self) -> Vec<&Vehicle> {
        favorite_vehicles(self.catalog.list(), self.preferences.favorites())
    }

    /// Owned (favorites, candidates) snapshot for the recommendation request
    pub fn recommendation_inputs(&self) -> (Vec<Vehicle>, Vec<Vehicle>) {
        let favorites = self.preferences.favorites();
        (
            favorite_vehicles(self.catalog.list(), favorites).into_iter().cloned().collect(),
            recommendation_candidates(self.catalog.list(), favorites)
                .into_iter()
                .cloned()
                .collect(),
        )
    }

    // ---- dealer ----

    /// Statistics over this device's listings; dealer identities only
    pub fn dealer_stats(&self) -> Option<DealerStats> {
        if !self.identity.is_dealer() {
            return None;
        }
        Some(dealer_stats(&self.catalog.my_listings()))
    }

    // ---- comparison ----

    /// Unknown vehicles are rejected
    pub fn toggle_compare(&mut self, id: VehicleId) -> CompareToggle {
        if self.catalog.get(id).is_none() && !self.compare.contains(id) {
            return CompareToggle::Rejected;
        }
        self.compare.toggle(id)
    }

    pub fn clear_compare(&mut self) {
        self.compare.clear();
    }

    pub fn compare_selection(&self) -> Vec<Vehicle> {
        self.compare.resolve(self.catalog.list())
    }

    pub fn comparison_table(&self) -> ComparisonTable {
        build_comparison_table(&self.compare_selection())
    }

    // ---- browse ----

    pub fn filters(&self) -> &BrowseFilters {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut BrowseFilters {
        &mut self.filters
    }

    pub fn browse(&self) -> Vec<&Vehicle> {
        self.filters.apply(self.catalog.list())
    }

    // ---- showrooms ----

    pub fn showrooms(&self) -> &[Showroom] {
        &self.showrooms
    }

    pub fn cities(&self) -> Vec<&str> {
        showroom::cities(&self.showrooms)
    }

    pub fn showrooms_in(&self, city: &str) -> Vec<&Showroom> {
        showroom::showrooms_in(&self.showrooms, city)
    }

    pub fn book_test_ride(&self, request: &TestRideRequest) -> Result<TestRideConfirmation> {
        let confirmation = book_test_ride(request, self.catalog.list(), &self.showrooms)?;
        info!(vehicle = request.vehicle_id, showroom = request.showroom_id, "test ride booked");
        Ok(confirmation)
    }
}
