//! Application layer - marketplace state containers, AI assistant, config

pub mod assistant;
pub mod browse;
pub mod catalog;
pub mod compare;
pub mod config;
pub mod identity;
pub mod marketplace;
pub mod preferences;
pub mod repository;

pub use assistant::{AiAssistant, AiOutcome};
pub use browse::BrowseFilters;
pub use catalog::{is_storable_price, CatalogStore};
pub use compare::{CompareSelector, CompareToggle, MAX_COMPARE};
pub use config::Config;
pub use identity::IdentityHolder;
pub use marketplace::Marketplace;
pub use preferences::PreferenceStore;
