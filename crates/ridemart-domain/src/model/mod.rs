//! Domain model types

pub mod preferences;

pub use preferences::{PreferenceSet, PriceAlerts};
