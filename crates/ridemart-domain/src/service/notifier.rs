//! Price-drop notification derivation

use ridemart_types::Vehicle;

use crate::model::PriceAlerts;

/// Vehicles whose current price is strictly below their armed alert price.
///
/// Ordered by vehicle id. Alerts for ids missing from the catalog are skipped.
pub fn price_drop_notifications<'a>(catalog: &'a [Vehicle], alerts: &PriceAlerts) -> Vec<&'a Vehicle> {
    alerts
        .iter()
        .filter_map(|(id, &alert_price)| {
            catalog
                .iter()
                .find(|v| v.id == *id)
                .filter(|v| v.price < alert_price)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridemart_types::{FuelType, VehicleDraft, VehicleType};

    fn vehicle(id: u32, price: f64) -> Vehicle {
        Vehicle::from_draft(id, VehicleDraft::new("Hero", format!("M{}", id), price, VehicleType::Bike, FuelType::Petrol))
    }

    #[test]
    fn test_only_strict_drops_notify() {
        let catalog = vec![vehicle(1, 70000.0), vehicle(2, 80000.0), vehicle(3, 90000.0)];
        let mut alerts = PriceAlerts::new();
        alerts.insert(1, 75000.0);
        alerts.insert(2, 80000.0);
        alerts.insert(3, 85000.0);

        let ids: Vec<u32> = price_drop_notifications(&catalog, &alerts).iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_unknown_ids_are_skipped() {
        let catalog = vec![vehicle(1, 70000.0)];
        let mut alerts = PriceAlerts::new();
        alerts.insert(42, 1_000_000.0);
        assert!(price_drop_notifications(&catalog, &alerts).is_empty());
    }

    #[test]
    fn test_price_recovery_leaves_set() {
        let mut catalog = vec![vehicle(3, 75000.0)];
        let mut alerts = PriceAlerts::new();
        alerts.insert(3, 80000.0);
        assert_eq!(price_drop_notifications(&catalog, &alerts).len(), 1);

        catalog[0].price = 81000.0;
        assert!(price_drop_notifications(&catalog, &alerts).is_empty());
    }
}
