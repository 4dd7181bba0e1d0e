//! Showroom lookup by city

use ridemart_types::{Showroom, ShowroomId};

/// Unique cities in first-seen order
pub fn cities(showrooms: &[Showroom]) -> Vec<&str> {
    let mut cities: Vec<&str> = Vec::new();
    for s in showrooms {
        if !cities.contains(&s.city.as_str()) {
            cities.push(&s.city);
        }
    }
    cities
}

pub fn showrooms_in<'a>(showrooms: &'a [Showroom], city: &str) -> Vec<&'a Showroom> {
    showrooms.iter().filter(|s| s.city == city).collect()
}

pub fn find_showroom(showrooms: &[Showroom], id: ShowroomId) -> Option<&Showroom> {
    showrooms.iter().find(|s| s.id == id)
}

/// Google Maps link for a showroom's coordinates
pub fn map_url(showroom: &Showroom) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={},{}",
        showroom.lat, showroom.lng
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn showroom(id: u32, city: &str) -> Showroom {
        Showroom {
            id,
            name: format!("Showroom {}", id),
            address: "Main Road".to_string(),
            city: city.to_string(),
            phone: "0000".to_string(),
            lat: 15.5,
            lng: 80.05,
        }
    }

    #[test]
    fn test_cities_first_seen_unique() {
        let list = vec![showroom(1, "Ongole"), showroom(2, "Guntur"), showroom(3, "Ongole")];
        assert_eq!(cities(&list), vec!["Ongole", "Guntur"]);
    }

    #[test]
    fn test_showrooms_in_city() {
        let list = vec![showroom(1, "Ongole"), showroom(2, "Guntur"), showroom(3, "Ongole")];
        let ids: Vec<u32> = showrooms_in(&list, "Ongole").iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(showrooms_in(&list, "Chennai").is_empty());
    }

    #[test]
    fn test_map_url() {
        assert_eq!(
            map_url(&showroom(1, "Ongole")),
            "https://www.google.com/maps/search/?api=1&query=15.5,80.05"
        );
    }
}
