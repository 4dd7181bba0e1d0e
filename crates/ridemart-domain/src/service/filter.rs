//! Browse filter engine
//!
//! All clauses AND together. An empty search, empty brand set, or unset
//! type/fuel clause matches everything.

use std::collections::BTreeSet;

use ridemart_types::{FuelType, Vehicle, VehicleType};
use serde::{Deserialize, Serialize};

/// Filter ranges derived from the live catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterBounds {
    /// Sorted, unique
    pub brands: Vec<String>,
    pub min_price: f64,
    pub max_price: f64,
}

impl FilterBounds {
    /// Empty catalog yields zero prices and no brands
    pub fn from_catalog(catalog: &[Vehicle]) -> Self {
        if catalog.is_empty() {
            return Self::default();
        }
        let brands: BTreeSet<&str> = catalog.iter().map(|v| v.brand.as_str()).collect();
        let min_price = catalog.iter().map(|v| v.price).fold(f64::INFINITY, f64::min);
        let max_price = catalog.iter().map(|v| v.price).fold(f64::NEG_INFINITY, f64::max);
        Self {
            brands: brands.into_iter().map(str::to_string).collect(),
            min_price,
            max_price,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Case-insensitive substring of the vehicle name
    pub search: String,
    /// Inclusive upper price limit
    pub max_price: f64,
    /// Empty means all brands
    pub brands: BTreeSet<String>,
    pub vehicle_type: Option<VehicleType>,
    pub fuel_type: Option<FuelType>,
}

impl FilterCriteria {
    /// Criteria that let every vehicle within `bounds` through
    pub fn for_bounds(bounds: &FilterBounds) -> Self {
        Self {
            search: String::new(),
            max_price: bounds.max_price,
            brands: BTreeSet::new(),
            vehicle_type: None,
            fuel_type: None,
        }
    }

    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        if !self.search.is_empty()
            && !vehicle.name.to_lowercase().contains(&self.search.to_lowercase())
        {
            return false;
        }
        if vehicle.price > self.max_price {
            return false;
        }
        if !self.brands.is_empty() && !self.brands.contains(&vehicle.brand) {
            return false;
        }
        if self.vehicle_type.is_some_and(|t| t != vehicle.vehicle_type) {
            return false;
        }
        if self.fuel_type.is_some_and(|f| f != vehicle.fuel_type) {
            return false;
        }
        true
    }
}

/// Visible subset of the catalog, in catalog order
pub fn filter_vehicles<'a>(catalog: &'a [Vehicle], criteria: &FilterCriteria) -> Vec<&'a Vehicle> {
    catalog.iter().filter(|v| criteria.matches(v)).collect()
}
