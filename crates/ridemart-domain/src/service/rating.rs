//! Id assignment and aggregate rating

use ridemart_types::Review;

/// `max(existing) + 1`, or 1 when there are none
pub fn next_id(existing: impl IntoIterator<Item = u32>) -> u32 {
    existing.into_iter().max().map_or(1, |max| max + 1)
}

/// Mean review rating rounded to one decimal place; 0 without reviews.
///
/// Always recomputed from the full list so repeated additions never drift.
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: f64 = reviews.iter().map(|r| f64::from(r.rating)).sum();
    round_to_tenth(sum / reviews.len() as f64)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
