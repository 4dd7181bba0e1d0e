//! Marketplace scenarios over the embedded seed data and a file-backed store

use std::sync::Arc;

use ridemart_ai::MockGateway;
use ridemart_app::repository::{open_marketplace_with, open_store_at};
use ridemart_app::{AiAssistant, AiOutcome, CompareToggle};
use ridemart_types::{FuelType, ReviewDraft, TestRideRequest, TimeSlot, VehicleDraft, VehicleType};
use tempfile::tempdir;

#[test]
fn test_seed_catalog_boots() {
    let dir = tempdir().unwrap();
    let market = open_marketplace_with(open_store_at(dir.path().to_path_buf()).unwrap()).unwrap();
    assert_eq!(market.list().len(), 10);
    assert_eq!(market.vehicle(1).unwrap().name, "Splendor Plus");
    assert_eq!(market.browse().len(), 10);
    assert_eq!(market.cities(), vec!["Ongole", "Guntur", "Nellore", "Vijayawada"]);
}

#[test]
fn test_state_survives_reopen() {
    let dir = tempdir().unwrap();
    let listing_id = {
        let store = open_store_at(dir.path().to_path_buf()).unwrap();
        let mut market = open_marketplace_with(store).unwrap();
        market.login("Alice", true);
        market.toggle_favorite(5);
        market.toggle_price_alert(1);
        let listing = market.add_listing(
            VehicleDraft::new("Bajaj", "Chetak", 115000.0, VehicleType::Scooter, FuelType::Electric)
                .with_spec("Range", "108 km"),
        )
        .unwrap();
        assert!(market.add_review(listing.id, ReviewDraft::new("Kiran", 4, "Smooth")));
        listing.id
    };
    assert_eq!(listing_id, 11);

    let store = open_store_at(dir.path().to_path_buf()).unwrap();
    let mut market = open_marketplace_with(store).unwrap();
    let chetak = market.vehicle(listing_id).unwrap();
    assert!(chetak.is_user_added);
    assert_eq!(chetak.rating, 4.0);
    assert_eq!(chetak.specs.get("Range").map(String::as_str), Some("108 km"));

    assert!(!market.is_favorite(5));
    market.login("Alice", true);
    assert!(market.is_favorite(5));
    assert_eq!(market.alert_price(1), Some(76000.0));

    let stats = market.dealer_stats().unwrap();
    assert_eq!(stats.total_listings, 1);
    assert_eq!(stats.average_rating, 4.0);

    assert!(market.remove_listing(listing_id));
    assert!(!market.remove_listing(1));
    assert_eq!(market.list().len(), 10);
}

#[test]
fn test_price_drop_notifies_alert_holder() {
    let dir = tempdir().unwrap();
    let mut market = open_marketplace_with(open_store_at(dir.path().to_path_buf()).unwrap()).unwrap();
    market.login("Alice", false);
    market.toggle_price_alert(1);
    assert!(market.notifications().is_empty());

    assert_eq!(market.simulate_price_drop(), Some(72200.0));
    let ids: Vec<u32> = market.notifications().iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![1]);

    market.dismiss_notification(1);
    assert!(market.notifications().is_empty());
    assert!(!market.is_alert_set(1));
}

#[test]
fn test_compare_four_seed_vehicles() {
    let dir = tempdir().unwrap();
    let mut market = open_marketplace_with(open_store_at(dir.path().to_path_buf()).unwrap()).unwrap();
    for id in [1, 2, 5, 7] {
        assert_eq!(market.toggle_compare(id), CompareToggle::Added);
    }
    assert_eq!(market.toggle_compare(3), CompareToggle::Rejected);

    let table = market.comparison_table();
    assert_eq!(table.columns.len(), 4);
    assert_eq!(table.base_rows[0].label, "Price");
    assert_eq!(table.base_rows[0].cells[0], "₹76,000.00");
    for row in &table.spec_rows {
        assert_eq!(row.cells.len(), 4);
    }
}

#[test]
fn test_book_test_ride() {
    let dir = tempdir().unwrap();
    let market = open_marketplace_with(open_store_at(dir.path().to_path_buf()).unwrap()).unwrap();
    let request = TestRideRequest {
        name: "Asha".to_string(),
        email: "asha@example.com".to_string(),
        phone: "9876543210".to_string(),
        vehicle_id: 5,
        showroom_id: 3,
        date: chrono::NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        time_slot: TimeSlot::Evening,
    };
    let confirmation = market.book_test_ride(&request).unwrap();
    assert_eq!(confirmation.vehicle_title, "Ather 450X");
    assert_eq!(confirmation.showroom_name, "Ather Space Ongole");

    let unknown = TestRideRequest {
        vehicle_id: 404,
        ..request
    };
    assert!(market.book_test_ride(&unknown).is_err());
}

#[tokio::test]
async fn test_recommendations_from_favorites() {
    let dir = tempdir().unwrap();
    let mut market = open_marketplace_with(open_store_at(dir.path().to_path_buf()).unwrap()).unwrap();
    let assistant = AiAssistant::new(Arc::new(MockGateway::new(3)));

    let (favorites, candidates) = market.recommendation_inputs();
    assert_eq!(assistant.recommend(&favorites, &candidates).await.unwrap(), AiOutcome::Applied(vec![]));

    market.login("Alice", false);
    market.toggle_favorite(1);
    let (favorites, candidates) = market.recommendation_inputs();
    let ids = assistant.recommend(&favorites, &candidates).await.unwrap().applied().unwrap();
    assert_eq!(ids.len(), 3);
    assert!(!ids.contains(&1));
    assert!(ids.iter().all(|id| market.vehicle(*id).is_some()));
}
