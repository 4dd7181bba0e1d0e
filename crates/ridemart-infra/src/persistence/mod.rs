//! Persistence implementations
//!
//! Repository traits from the domain crate implemented over a shared
//! key-value store.

mod kv_listing_repo;
mod kv_preference_repo;

pub use kv_listing_repo::KvListingRepository;
pub use kv_preference_repo::KvPreferenceRepository;
