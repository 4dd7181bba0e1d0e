//! Showroom directory loaded from CSV
//!
//! Expected header: id,name,address,city,phone,lat,lng

use std::path::Path;

use ridemart_types::{Error, Result, Showroom};
use tracing::warn;

const DEFAULT_SHOWROOMS: &str = include_str!("../data/showrooms.csv");

pub fn default_showrooms() -> Result<Vec<Showroom>> {
    load_showrooms_from_reader(DEFAULT_SHOWROOMS.as_bytes())
}

pub fn load_showrooms_from_file(path: &Path) -> Result<Vec<Showroom>> {
    let file = std::fs::File::open(path)
        .map_err(|e| Error::SeedData(format!("Failed to open showroom CSV {}: {}", path.display(), e)))?;
    load_showrooms_from_reader(file)
}

/// Rows that fail to parse are skipped with a warning
pub fn load_showrooms_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Showroom>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|e| Error::SeedData(format!("Failed to read showroom CSV header: {}", e)))?;
    if !headers.iter().any(|h| h == "city") {
        return Err(Error::SeedData("Showroom CSV has no 'city' column".to_string()));
    }

    let mut showrooms = Vec::new();
    for (line, record) in csv_reader.deserialize::<Showroom>().enumerate() {
        match record {
            Ok(showroom) => showrooms.push(showroom),
            Err(e) => warn!(row = line + 1, error = %e, "skipping showroom row"),
        }
    }
    Ok(showrooms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_showrooms() {
        let showrooms = default_showrooms().unwrap();
        assert_eq!(showrooms.len(), 7);
        assert_eq!(showrooms[0].city, "Ongole");
        assert_eq!(showrooms[0].address, "Kurnool Road, Near RTC Bus Stand");
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let csv = "id,name,address,city,phone,lat,lng\n\
                   1,Good,Addr,Ongole,111,15.5,80.0\n\
                   x,Bad,Addr,Ongole,222,not-a-number,80.0\n";
        let showrooms = load_showrooms_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(showrooms.len(), 1);
        assert_eq!(showrooms[0].name, "Good");
    }

    #[test]
    fn test_missing_city_column() {
        let csv = "id,name\n1,Only\n";
        assert!(load_showrooms_from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("showrooms.csv");
        std::fs::write(&path, "id,name,address,city,phone,lat,lng\n9,Kavali Bajaj,NH 16,Kavali,0862-200,14.91,79.99\n").unwrap();

        let showrooms = load_showrooms_from_file(&path).unwrap();
        assert_eq!(showrooms.len(), 1);
        assert_eq!(showrooms[0].id, 9);
        assert_eq!(showrooms[0].city, "Kavali");

        assert!(matches!(
            load_showrooms_from_file(&dir.path().join("absent.csv")),
            Err(Error::SeedData(_))
        ));
    }
}
