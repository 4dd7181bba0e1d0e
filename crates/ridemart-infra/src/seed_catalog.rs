//! Seed vehicle catalog loaded from TOML
//!
//! The default seed is embedded at compile time; a replacement file can be
//! supplied through [`load_seed_catalog_from_file`].

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use ridemart_domain::service::average_rating;
use ridemart_types::{Error, Result, Vehicle};
use serde::Deserialize;

const DEFAULT_SEED: &str = include_str!("../data/seed_catalog.toml");

/// Container for parsing seed_catalog.toml
#[derive(Debug, Deserialize)]
struct SeedCatalog {
    vehicles: Vec<Vehicle>,
}

/// The embedded boot catalog
pub fn default_seed_catalog() -> Result<Vec<Vehicle>> {
    load_seed_catalog_from_str(DEFAULT_SEED)
}

pub fn load_seed_catalog_from_file(path: &Path) -> Result<Vec<Vehicle>> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::SeedData(format!("Failed to read seed catalog {}: {}", path.display(), e)))?;
    load_seed_catalog_from_str(&content)
}

/// Parse a seed catalog. Seed entries are never user-added, ids must be unique,
/// and the stored rating is always derived from the review list.
pub fn load_seed_catalog_from_str(toml_content: &str) -> Result<Vec<Vehicle>> {
    let seed: SeedCatalog = toml::from_str(toml_content)
        .map_err(|e| Error::SeedData(format!("Failed to parse seed catalog TOML: {}", e)))?;

    let mut seen = HashSet::new();
    for vehicle in &seed.vehicles {
        if !seen.insert(vehicle.id) {
            return Err(Error::SeedData(format!("Duplicate vehicle id in seed: {}", vehicle.id)));
        }
    }

    Ok(seed
        .vehicles
        .into_iter()
        .map(|mut v| {
            v.is_user_added = false;
            v.rating = average_rating(&v.reviews);
            v
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridemart_types::{FuelType, VehicleType};

    #[test]
    fn test_default_seed_parses() {
        let catalog = default_seed_catalog().unwrap();
        assert_eq!(catalog.len(), 10);
        assert!(catalog.iter().all(|v| !v.is_user_added));

        let splendor = &catalog[0];
        assert_eq!(splendor.id, 1);
        assert_eq!(splendor.name, "Splendor Plus");
        assert_eq!(splendor.vehicle_type, VehicleType::Bike);
        assert_eq!(splendor.reviews.len(), 2);
        assert_eq!(splendor.specs.get("Fuel Tank").map(String::as_str), Some("9.8 L"));
        assert_eq!(splendor.rating, 4.5);
    }

    #[test]
    fn test_seed_ratings_match_reviews() {
        for vehicle in default_seed_catalog().unwrap() {
            assert_eq!(vehicle.rating, average_rating(&vehicle.reviews), "{}", vehicle.name);
        }
    }

    #[test]
    fn test_seed_covers_every_type() {
        let catalog = default_seed_catalog().unwrap();
        for t in VehicleType::ALL {
            assert!(catalog.iter().any(|v| v.vehicle_type == t), "no {} in seed", t);
        }
        assert!(catalog.iter().any(|v| v.fuel_type == FuelType::Electric));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let toml = r#"
            [[vehicles]]
            id = 1
            name = "A"
            brand = "B"
            price = 1
            type = "Bike"
            fuelType = "Petrol"

            [[vehicles]]
            id = 1
            name = "C"
            brand = "D"
            price = 2
            type = "Scooter"
            fuelType = "Electric"
        "#;
        assert!(matches!(load_seed_catalog_from_str(toml), Err(Error::SeedData(_))));
    }

    #[test]
    fn test_user_added_flag_is_cleared() {
        let toml = r#"
            [[vehicles]]
            id = 4
            name = "A"
            brand = "B"
            price = 1000
            type = "Bicycle"
            fuelType = "Manual"
            isUserAdded = true
            rating = 4.9
        "#;
        let catalog = load_seed_catalog_from_str(toml).unwrap();
        assert!(!catalog[0].is_user_added);
        assert_eq!(catalog[0].rating, 0.0);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.toml");
        fs::write(
            &path,
            r#"
            [[vehicles]]
            id = 2
            name = "Jupiter"
            brand = "TVS"
            price = 74000
            type = "Scooter"
            fuelType = "Petrol"

            [[vehicles.reviews]]
            id = 1
            userName = "Anil"
            rating = 4
            date = "2024-05-01"
            "#,
        )
        .unwrap();

        let catalog = load_seed_catalog_from_file(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].price, 74000.0);
        assert_eq!(catalog[0].rating, 4.0);

        assert!(matches!(
            load_seed_catalog_from_file(&dir.path().join("absent.toml")),
            Err(Error::SeedData(_))
        ));
    }
}
