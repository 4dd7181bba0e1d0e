//! Per-identity favorites and price alerts
//!
//! Every mutation overwrites the full stored value for the identity. Without
//! an identity all mutations are no-ops.

use ridemart_domain::model::{PreferenceSet, PriceAlerts};
use ridemart_domain::repository::PreferenceRepository;
use ridemart_types::VehicleId;
use tracing::{debug, warn};

pub struct PreferenceStore {
    owner: Option<String>,
    prefs: PreferenceSet,
    repo: Box<dyn PreferenceRepository>,
}

impl PreferenceStore {
    pub fn new(repo: Box<dyn PreferenceRepository>) -> Self {
        Self {
            owner: None,
            prefs: PreferenceSet::default(),
            repo,
        }
    }

    /// Attach to an identity and load its stored preferences
    pub fn load_for(&mut self, identity_name: &str) {
        self.prefs = self.repo.load(identity_name);
        self.owner = Some(identity_name.to_string());
        debug!(
            identity = identity_name,
            favorites = self.prefs.favorites.len(),
            alerts = self.prefs.price_alerts.len(),
            "preferences loaded"
        );
    }

    /// Detach; stored preferences are kept
    pub fn reset(&mut self) {
        self.owner = None;
        self.prefs = PreferenceSet::default();
    }

    pub fn favorites(&self) -> &[VehicleId] {
        &self.prefs.favorites
    }

    pub fn price_alerts(&self) -> &PriceAlerts {
        &self.prefs.price_alerts
    }

    pub fn is_favorite(&self, id: VehicleId) -> bool {
        self.prefs.is_favorite(id)
    }

    pub fn is_alert_set(&self, id: VehicleId) -> bool {
        self.prefs.is_alert_set(id)
    }

    /// Returns whether `id` is a favorite afterwards
    pub fn toggle_favorite(&mut self, id: VehicleId) -> bool {
        let Some(owner) = self.owner.as_deref() else {
            return false;
        };
        let now_favorite = self.prefs.toggle_favorite(id);
        debug!(identity = owner, id, now_favorite, "favorite toggled");
        if let Err(e) = self.repo.save_favorites(owner, &self.prefs.favorites) {
            warn!(error = %e, "failed to persist favorites");
        }
        now_favorite
    }

    /// Returns whether an alert is armed afterwards
    pub fn toggle_price_alert(&mut self, id: VehicleId, current_price: f64) -> bool {
        if self.owner.is_none() {
            return false;
        }
        let armed = self.prefs.toggle_price_alert(id, current_price);
        debug!(id, armed, price = current_price, "price alert toggled");
        self.persist_alerts();
        armed
    }

    /// Acknowledge a price drop by disarming its alert
    pub fn dismiss_notification(&mut self, id: VehicleId) {
        if self.owner.is_none() {
            return;
        }
        if self.prefs.disarm_alert(id) {
            debug!(id, "notification dismissed");
            self.persist_alerts();
        }
    }

    fn persist_alerts(&self) {
        let Some(owner) = self.owner.as_deref() else {
            return;
        };
        if let Err(e) = self.repo.save_price_alerts(owner, &self.prefs.price_alerts) {
            warn!(error = %e, "failed to persist price alerts");
        }
    }
}
