//! Browse filter state kept in step with the catalog bounds

use ridemart_domain::service::{filter_vehicles, FilterBounds, FilterCriteria};
use ridemart_types::{FuelType, Vehicle, VehicleType};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct BrowseFilters {
    bounds: FilterBounds,
    criteria: FilterCriteria,
}

impl BrowseFilters {
    pub fn new(catalog: &[Vehicle]) -> Self {
        let bounds = FilterBounds::from_catalog(catalog);
        let criteria = FilterCriteria::for_bounds(&bounds);
        Self { bounds, criteria }
    }

    /// Recompute bounds; when they change the criteria reset to their defaults.
    /// Returns whether a reset happened.
    pub fn sync_bounds(&mut self, catalog: &[Vehicle]) -> bool {
        let bounds = FilterBounds::from_catalog(catalog);
        if bounds == self.bounds {
            return false;
        }
        debug!(min = bounds.min_price, max = bounds.max_price, brands = bounds.brands.len(), "filter bounds changed");
        self.bounds = bounds;
        self.reset();
        true
    }

    pub fn bounds(&self) -> &FilterBounds {
        &self.bounds
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn reset(&mut self) {
        self.criteria = FilterCriteria::for_bounds(&self.bounds);
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.criteria.search = search.into();
    }

    pub fn set_max_price(&mut self, max_price: f64) {
        self.criteria.max_price = max_price;
    }

    /// Returns whether the brand is selected afterwards
    pub fn toggle_brand(&mut self, brand: &str) -> bool {
        if self.criteria.brands.remove(brand) {
            false
        } else {
            self.criteria.brands.insert(brand.to_string());
            true
        }
    }

    /// Selecting the active type again clears the clause
    pub fn toggle_type(&mut self, vehicle_type: VehicleType) {
        self.criteria.vehicle_type = match self.criteria.vehicle_type {
            Some(active) if active == vehicle_type => None,
            _ => Some(vehicle_type),
        };
    }

    pub fn toggle_fuel_type(&mut self, fuel_type: FuelType) {
        self.criteria.fuel_type = match self.criteria.fuel_type {
            Some(active) if active == fuel_type => None,
            _ => Some(fuel_type),
        };
    }

    pub fn apply<'a>(&self, catalog: &'a [Vehicle]) -> Vec<&'a Vehicle> {
        filter_vehicles(catalog, &self.criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridemart_types::VehicleDraft;

    fn vehicle(id: u32, brand: &str, price: f64, t: VehicleType) -> Vehicle {
        Vehicle::from_draft(id, VehicleDraft::new(brand, format!("M{}", id), price, t, FuelType::Petrol))
    }

    fn catalog() -> Vec<Vehicle> {
        vec![
            vehicle(1, "Hero", 76000.0, VehicleType::Bike),
            vehicle(2, "Honda", 78000.0, VehicleType::Scooter),
            vehicle(3, "Bajaj", 112000.0, VehicleType::Bike),
        ]
    }

    #[test]
    fn test_defaults_show_everything() {
        let catalog = catalog();
        let filters = BrowseFilters::new(&catalog);
        assert_eq!(filters.apply(&catalog).len(), catalog.len());
        assert_eq!(filters.criteria().max_price, 112000.0);
        assert_eq!(filters.bounds().brands, vec!["Bajaj", "Hero", "Honda"]);
    }

    #[test]
    fn test_bounds_change_resets_criteria() {
        let mut catalog = catalog();
        let mut filters = BrowseFilters::new(&catalog);
        filters.set_search("m1");
        filters.toggle_brand("Hero");
        filters.set_max_price(80000.0);
        assert!(!filters.sync_bounds(&catalog));
        assert_eq!(filters.criteria().search, "m1");

        catalog.push(vehicle(4, "Royal Enfield", 193000.0, VehicleType::Bike));
        assert!(filters.sync_bounds(&catalog));
        assert_eq!(filters.criteria(), &FilterCriteria::for_bounds(filters.bounds()));
        assert_eq!(filters.criteria().max_price, 193000.0);
    }

    #[test]
    fn test_toggle_type_twice_clears() {
        let catalog = catalog();
        let mut filters = BrowseFilters::new(&catalog);
        filters.toggle_type(VehicleType::Scooter);
        assert_eq!(filters.apply(&catalog).len(), 1);
        filters.toggle_type(VehicleType::Bike);
        assert_eq!(filters.apply(&catalog).len(), 2);
        filters.toggle_type(VehicleType::Bike);
        assert_eq!(filters.apply(&catalog).len(), 3);
    }

    #[test]
    fn test_brand_and_fuel_toggles() {
        let catalog = catalog();
        let mut filters = BrowseFilters::new(&catalog);
        assert!(filters.toggle_brand("Honda"));
        assert_eq!(filters.apply(&catalog).len(), 1);
        assert!(!filters.toggle_brand("Honda"));

        filters.toggle_fuel_type(FuelType::Electric);
        assert!(filters.apply(&catalog).is_empty());
        filters.toggle_fuel_type(FuelType::Electric);
        assert_eq!(filters.apply(&catalog).len(), 3);

        filters.set_search("x");
        filters.reset();
        assert_eq!(filters.apply(&catalog).len(), 3);
    }
}
