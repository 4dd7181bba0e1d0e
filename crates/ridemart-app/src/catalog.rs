//! Catalog store - seed listings followed by user-added listings
//!
//! Invalid ids are no-ops. Storage failures are logged and never surface.

use chrono::{Local, NaiveDate};
use ridemart_domain::repository::ListingRepository;
use ridemart_domain::service::{average_rating, next_id};
use ridemart_types::{Review, ReviewDraft, Vehicle, VehicleDraft, VehicleId};
use tracing::{debug, warn};

pub struct CatalogStore {
    vehicles: Vec<Vehicle>,
    my_listing_ids: Vec<VehicleId>,
    repo: Box<dyn ListingRepository>,
}

impl CatalogStore {
    /// Seed entries first, then persisted user-added entries in submission order.
    /// A persisted listing whose id collides with an earlier entry is dropped.
    pub fn load(seed: Vec<Vehicle>, repo: Box<dyn ListingRepository>) -> Self {
        let mut vehicles = seed;
        for mut vehicle in repo.load_user_added() {
            if vehicles.iter().any(|v| v.id == vehicle.id) {
                warn!(id = vehicle.id, "dropping stored listing with duplicate id");
                continue;
            }
            vehicle.is_user_added = true;
            vehicle.rating = average_rating(&vehicle.reviews);
            vehicles.push(vehicle);
        }
        let my_listing_ids = repo.load_my_listing_ids();
        debug!(vehicles = vehicles.len(), mine = my_listing_ids.len(), "catalog loaded");

        Self {
            vehicles,
            my_listing_ids,
            repo,
        }
    }

    pub fn list(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    pub fn is_my_listing(&self, id: VehicleId) -> bool {
        self.my_listing_ids.contains(&id)
    }

    /// Listings submitted from this device, in catalog order
    pub fn my_listings(&self) -> Vec<&Vehicle> {
        self.vehicles
            .iter()
            .filter(|v| self.my_listing_ids.contains(&v.id))
            .collect()
    }

    /// Returns None for a price that cannot be stored as a JSON number or is negative.
    pub fn add(&mut self, draft: VehicleDraft) -> Option<Vehicle> {
        if !is_storable_price(draft.price) {
            debug!(price = draft.price, "ignoring listing with invalid price");
            return None;
        }
        let id = next_id(self.vehicles.iter().map(|v| v.id));
        let vehicle = Vehicle::from_draft(id, draft);
        self.vehicles.push(vehicle.clone());
        self.my_listing_ids.push(id);
        debug!(id, name = %vehicle.display_name(), "listing added");

        self.persist_user_added();
        self.persist_my_listing_ids();
        Some(vehicle)
    }

    /// Removes a user-added listing owned by this device; anything else is ignored
    pub fn remove(&mut self, id: VehicleId) -> bool {
        let removable = self.get(id).is_some_and(|v| v.is_user_added) && self.is_my_listing(id);
        if !removable {
            debug!(id, "ignoring remove of unknown or foreign listing");
            return false;
        }
        self.vehicles.retain(|v| v.id != id);
        self.my_listing_ids.retain(|&mine| mine != id);
        debug!(id, "listing removed");

        self.persist_user_added();
        self.persist_my_listing_ids();
        true
    }

    /// Append a review dated today
    pub fn add_review(&mut self, id: VehicleId, draft: ReviewDraft) -> bool {
        self.add_review_on(id, draft, Local::now().date_naive())
    }

    pub fn add_review_on(&mut self, id: VehicleId, draft: ReviewDraft, date: NaiveDate) -> bool {
        if !(1..=5).contains(&draft.rating) {
            debug!(id, rating = draft.rating, "ignoring review with out-of-range rating");
            return false;
        }
        let Some(vehicle) = self.vehicles.iter_mut().find(|v| v.id == id) else {
            return false;
        };
        let review_id = next_id(vehicle.reviews.iter().map(|r| r.id));
        vehicle.reviews.push(Review {
            id: review_id,
            user_name: draft.user_name,
            rating: draft.rating,
            comment: draft.comment,
            date,
        });
        vehicle.rating = average_rating(&vehicle.reviews);
        let user_added = vehicle.is_user_added;
        debug!(id, review_id, rating = vehicle.rating, "review added");

        if user_added {
            self.persist_user_added();
        }
        true
    }

    pub fn set_price(&mut self, id: VehicleId, price: f64) -> bool {
        if !is_storable_price(price) {
            debug!(id, price, "ignoring invalid price");
            return false;
        }
        let Some(vehicle) = self.vehicles.iter_mut().find(|v| v.id == id) else {
            return false;
        };
        debug!(id, from = vehicle.price, to = price, "price changed");
        vehicle.price = price;
        let user_added = vehicle.is_user_added;

        if user_added {
            self.persist_user_added();
        }
        true
    }

    fn persist_user_added(&self) {
        let user_added: Vec<Vehicle> = self.vehicles.iter().filter(|v| v.is_user_added).cloned().collect();
        if let Err(e) = self.repo.save_user_added(&user_added) {
            warn!(error = %e, "failed to persist user-added listings");
        }
    }

    fn persist_my_listing_ids(&self) {
        if let Err(e) = self.repo.save_my_listing_ids(&self.my_listing_ids) {
            warn!(error = %e, "failed to persist my listings");
        }
    }
}

/// Finite and non-negative; non-finite floats do not survive JSON storage
pub fn is_storable_price(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}
