//! Infrastructure layer - persistence implementations, seed loaders

pub mod persistence;
pub mod seed_catalog;
pub mod showroom_csv;
