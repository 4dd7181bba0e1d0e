//! Favorites view and recommendation candidate selection

use ridemart_types::{Vehicle, VehicleId};

/// Favorite vehicles in catalog order; stale ids are skipped
pub fn favorite_vehicles<'a>(catalog: &'a [Vehicle], favorites: &[VehicleId]) -> Vec<&'a Vehicle> {
    catalog.iter().filter(|v| favorites.contains(&v.id)).collect()
}

/// Every catalog vehicle that is not already a favorite
pub fn recommendation_candidates<'a>(catalog: &'a [Vehicle], favorites: &[VehicleId]) -> Vec<&'a Vehicle> {
    catalog.iter().filter(|v| !favorites.contains(&v.id)).collect()
}
