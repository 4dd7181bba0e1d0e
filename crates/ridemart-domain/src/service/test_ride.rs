//! Test-ride booking validation

use ridemart_types::{Error, Result, Showroom, TestRideRequest, TimeSlot, Vehicle};
use serde::Serialize;

use super::showroom::find_showroom;

/// Booking summary shown after a successful request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRideConfirmation {
    pub rider_name: String,
    pub vehicle_title: String,
    pub showroom_name: String,
    pub date: chrono::NaiveDate,
    pub time_slot: TimeSlot,
}

impl TestRideConfirmation {
    pub fn message(&self) -> String {
        format!(
            "Your test ride for the {} at {} has been scheduled for {} ({:?}).",
            self.vehicle_title, self.showroom_name, self.date, self.time_slot
        )
    }
}

pub fn book_test_ride(
    request: &TestRideRequest,
    catalog: &[Vehicle],
    showrooms: &[Showroom],
) -> Result<TestRideConfirmation> {
    for (field, value) in [
        ("name", &request.name),
        ("email", &request.email),
        ("phone", &request.phone),
    ] {
        if value.trim().is_empty() {
            return Err(Error::InvalidInput(format!("{} is required", field)));
        }
    }
    if !request.email.contains('@') {
        return Err(Error::InvalidInput(format!("invalid email: {}", request.email)));
    }
    let vehicle = catalog
        .iter()
        .find(|v| v.id == request.vehicle_id)
        .ok_or(Error::VehicleNotFound(request.vehicle_id))?;
    let showroom = find_showroom(showrooms, request.showroom_id)
        .ok_or_else(|| Error::InvalidInput(format!("unknown showroom: {}", request.showroom_id)))?;

    Ok(TestRideConfirmation {
        rider_name: request.name.trim().to_string(),
        vehicle_title: vehicle.display_name(),
        showroom_name: showroom.name.clone(),
        date: request.date,
        time_slot: request.time_slot,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ridemart_types::{FuelType, VehicleDraft, VehicleType};

    fn fixtures() -> (Vec<Vehicle>, Vec<Showroom>) {
        let catalog = vec![Vehicle::from_draft(
            1,
            VehicleDraft::new("Hero", "Splendor Plus", 75000.0, VehicleType::Bike, FuelType::Petrol),
        )];
        let showrooms = vec![Showroom {
            id: 2,
            name: "Sai Hero Motors".to_string(),
            address: "Kurnool Road".to_string(),
            city: "Ongole".to_string(),
            phone: "08592-123456".to_string(),
            lat: 15.5,
            lng: 80.05,
        }];
        (catalog, showrooms)
    }

    fn request() -> TestRideRequest {
        TestRideRequest {
            name: "Ravi".to_string(),
            email: "ravi@example.com".to_string(),
            phone: "9876543210".to_string(),
            vehicle_id: 1,
            showroom_id: 2,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            time_slot: TimeSlot::Evening,
        }
    }

    #[test]
    fn test_confirmation_names_vehicle_and_showroom() {
        let (catalog, showrooms) = fixtures();
        let confirmation = book_test_ride(&request(), &catalog, &showrooms).unwrap();
        assert_eq!(confirmation.vehicle_title, "Hero Splendor Plus");
        assert_eq!(confirmation.showroom_name, "Sai Hero Motors");
        assert!(confirmation.message().contains("Sai Hero Motors"));
    }

    #[test]
    fn test_blank_phone_rejected() {
        let (catalog, showrooms) = fixtures();
        let mut req = request();
        req.phone = "  ".to_string();
        assert!(matches!(book_test_ride(&req, &catalog, &showrooms), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_unknown_vehicle_rejected() {
        let (catalog, showrooms) = fixtures();
        let mut req = request();
        req.vehicle_id = 99;
        assert!(matches!(book_test_ride(&req, &catalog, &showrooms), Err(Error::VehicleNotFound(99))));
    }
}
