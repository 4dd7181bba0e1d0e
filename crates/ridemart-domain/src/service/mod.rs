//! Domain services

pub mod comparison;
pub mod currency;
pub mod dealer_stats;
pub mod favorites;
pub mod filter;
pub mod finance;
pub mod notifier;
pub mod rating;
pub mod showroom;
pub mod test_ride;

pub use comparison::{build_comparison_table, ComparisonTable};
pub use currency::format_inr;
pub use dealer_stats::{dealer_stats, DealerStats};
pub use favorites::{favorite_vehicles, recommendation_candidates};
pub use filter::{filter_vehicles, FilterBounds, FilterCriteria};
pub use finance::{calculate_emi, calculate_fuel_savings, emi_breakdown, CommuteProfile, EmiBreakdown, FuelSavings};
pub use notifier::price_drop_notifications;
pub use rating::{average_rating, next_id};
