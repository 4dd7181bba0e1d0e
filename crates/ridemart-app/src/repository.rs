//! Store and repository adapters for the persistence layer

use std::path::PathBuf;
use std::sync::Arc;

use ridemart_infra::persistence::{KvListingRepository, KvPreferenceRepository};
use ridemart_infra::seed_catalog::{default_seed_catalog, load_seed_catalog_from_file};
use ridemart_infra::showroom_csv::{default_showrooms, load_showrooms_from_file};
use ridemart_store::{FileKeyValueStore, KeyValueStore};
use ridemart_types::{Result, Showroom, Vehicle};
use tracing::info;

use crate::config::Config;
use crate::marketplace::Marketplace;

/// Open the file-backed key-value store in the configured data directory
pub fn open_store(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    open_store_at(config.data_dir()?)
}

/// Open the file-backed key-value store at a custom directory
pub fn open_store_at(store_dir: PathBuf) -> Result<Arc<dyn KeyValueStore>> {
    let store = FileKeyValueStore::open(store_dir)?;
    Ok(Arc::new(store))
}

/// Seed catalog from the configured file, else the embedded one
pub fn load_seed(config: &Config) -> Result<Vec<Vehicle>> {
    match config.seed_catalog {
        Some(ref path) => {
            info!(path = %path.display(), "loading seed catalog");
            load_seed_catalog_from_file(path)
        }
        None => default_seed_catalog(),
    }
}

pub fn load_showrooms(config: &Config) -> Result<Vec<Showroom>> {
    match config.showrooms_csv {
        Some(ref path) => {
            info!(path = %path.display(), "loading showrooms");
            load_showrooms_from_file(path)
        }
        None => default_showrooms(),
    }
}

fn build_marketplace(seed: Vec<Vehicle>, showrooms: Vec<Showroom>, store: Arc<dyn KeyValueStore>) -> Marketplace {
    Marketplace::new(
        seed,
        showrooms,
        Box::new(KvListingRepository::new(store.clone())),
        Box::new(KvPreferenceRepository::new(store)),
    )
}

/// Marketplace over the embedded seed data and the given store
pub fn open_marketplace_with(store: Arc<dyn KeyValueStore>) -> Result<Marketplace> {
    Ok(build_marketplace(default_seed_catalog()?, default_showrooms()?, store))
}

/// Marketplace over the configured data directory and seed files
pub fn open_marketplace(config: &Config) -> Result<Marketplace> {
    Ok(build_marketplace(load_seed(config)?, load_showrooms(config)?, open_store(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridemart_types::Error;
    use tempfile::tempdir;

    const SEED: &str = r#"
[[vehicles]]
id = 1
name = "Jupiter"
brand = "TVS"
price = 74000
type = "Scooter"
fuelType = "Petrol"
"#;

    const SHOWROOMS: &str = "id,name,address,city,phone,lat,lng\n\
                             1,Sri Ram TVS,Main Road,Kavali,0862-111,14.91,79.99\n";

    #[test]
    fn test_configured_seed_files_replace_embedded_data() {
        let dir = tempdir().unwrap();
        let seed_path = dir.path().join("seed.toml");
        let csv_path = dir.path().join("showrooms.csv");
        std::fs::write(&seed_path, SEED).unwrap();
        std::fs::write(&csv_path, SHOWROOMS).unwrap();

        let config = Config {
            data_dir: Some(dir.path().join("data")),
            seed_catalog: Some(seed_path),
            showrooms_csv: Some(csv_path),
            ..Config::default()
        };
        let market = open_marketplace(&config).unwrap();
        assert_eq!(market.list().len(), 1);
        assert_eq!(market.list()[0].name, "Jupiter");
        assert_eq!(market.cities(), vec!["Kavali"]);
    }

    #[test]
    fn test_unset_seed_paths_use_embedded_data() {
        let dir = tempdir().unwrap();
        let config = Config {
            data_dir: Some(dir.path().join("data")),
            ..Config::default()
        };
        let market = open_marketplace(&config).unwrap();
        assert_eq!(market.list().len(), 10);
    }

    #[test]
    fn test_missing_seed_file_is_error() {
        let dir = tempdir().unwrap();
        let config = Config {
            data_dir: Some(dir.path().join("data")),
            seed_catalog: Some(dir.path().join("absent.toml")),
            ..Config::default()
        };
        assert!(matches!(load_seed(&config), Err(Error::SeedData(_))));
    }
}
