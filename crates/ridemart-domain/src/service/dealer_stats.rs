//! Dealer dashboard statistics over the dealer's own listings

use ridemart_types::{Vehicle, VehicleType};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerStats {
    pub total_listings: usize,
    /// Sum of listing prices
    pub total_value: f64,
    /// Review-weighted mean of listing ratings, 0 without reviews
    pub average_rating: f64,
    /// Non-zero counts in Bike/Scooter/Bicycle order
    pub inventory_by_type: Vec<(VehicleType, usize)>,
}

pub fn dealer_stats(listings: &[&Vehicle]) -> DealerStats {
    let total_value = listings.iter().map(|v| v.price).sum();
    let total_reviews: usize = listings.iter().map(|v| v.reviews.len()).sum();
    let weighted_sum: f64 = listings
        .iter()
        .filter(|v| v.rating > 0.0)
        .map(|v| v.rating * v.reviews.len() as f64)
        .sum();
    let average_rating = if total_reviews > 0 {
        weighted_sum / total_reviews as f64
    } else {
        0.0
    };

    let inventory_by_type = VehicleType::ALL
        .iter()
        .map(|t| (*t, listings.iter().filter(|v| v.vehicle_type == *t).count()))
        .filter(|(_, count)| *count > 0)
        .collect();

    DealerStats {
        total_listings: listings.len(),
        total_value,
        average_rating,
        inventory_by_type,
    }
}
