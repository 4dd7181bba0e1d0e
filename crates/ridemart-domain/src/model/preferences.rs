//! Per-identity favorites and price alerts

use std::collections::BTreeMap;

use ridemart_types::VehicleId;
use serde::{Deserialize, Serialize};

/// Vehicle id -> price recorded when the alert was armed
pub type PriceAlerts = BTreeMap<VehicleId, f64>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceSet {
    /// Favorite ids in the order they were added, no duplicates
    pub favorites: Vec<VehicleId>,
    /// Only armed alerts are present
    pub price_alerts: PriceAlerts,
}

impl PreferenceSet {
    pub fn is_favorite(&self, id: VehicleId) -> bool {
        self.favorites.contains(&id)
    }

    /// Flip favorite membership; returns the new state
    pub fn toggle_favorite(&mut self, id: VehicleId) -> bool {
        if let Some(pos) = self.favorites.iter().position(|&f| f == id) {
            self.favorites.remove(pos);
            false
        } else {
            self.favorites.push(id);
            true
        }
    }

    pub fn is_alert_set(&self, id: VehicleId) -> bool {
        self.price_alerts.contains_key(&id)
    }

    /// Disarm an existing alert, or arm one at `current_price`.
    /// Returns whether an alert is armed afterwards.
    pub fn toggle_price_alert(&mut self, id: VehicleId, current_price: f64) -> bool {
        if self.price_alerts.remove(&id).is_some() {
            false
        } else {
            self.price_alerts.insert(id, current_price);
            true
        }
    }

    /// Remove the alert for `id`; returns whether one was armed
    pub fn disarm_alert(&mut self, id: VehicleId) -> bool {
        self.price_alerts.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_favorite_is_own_inverse() {
        let mut prefs = PreferenceSet::default();
        assert!(prefs.toggle_favorite(3));
        assert!(prefs.is_favorite(3));
        assert!(!prefs.toggle_favorite(3));
        assert_eq!(prefs, PreferenceSet::default());
    }

    #[test]
    fn test_toggle_alert_removes_entry_entirely() {
        let mut prefs = PreferenceSet::default();
        assert!(prefs.toggle_price_alert(3, 80000.0));
        assert_eq!(prefs.price_alerts.get(&3), Some(&80000.0));

        assert!(!prefs.toggle_price_alert(3, 0.0));
        assert!(!prefs.price_alerts.contains_key(&3));
        assert!(prefs.price_alerts.is_empty());
    }

    #[test]
    fn test_alert_armed_at_zero_price_is_still_armed() {
        let mut prefs = PreferenceSet::default();
        prefs.toggle_price_alert(5, 0.0);
        assert!(prefs.is_alert_set(5));
        prefs.toggle_price_alert(5, 100.0);
        assert!(!prefs.is_alert_set(5));
    }

    #[test]
    fn test_disarm_missing_alert() {
        let mut prefs = PreferenceSet::default();
        assert!(!prefs.disarm_alert(9));
    }
}
