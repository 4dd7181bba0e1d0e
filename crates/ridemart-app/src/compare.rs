//! Session-scoped comparison selection

use ridemart_types::{Vehicle, VehicleId};
use serde::Serialize;
use tracing::debug;

pub const MAX_COMPARE: usize = 4;

/// Result of a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompareToggle {
    Added,
    Removed,
    /// Selection already full; nothing changed
    Rejected,
}

/// Up to four distinct ids in selection order
#[derive(Debug, Default, Clone)]
pub struct CompareSelector {
    selected: Vec<VehicleId>,
}

impl CompareSelector {
    pub fn toggle(&mut self, id: VehicleId) -> CompareToggle {
        if self.remove(id) {
            return CompareToggle::Removed;
        }
        if self.selected.len() >= MAX_COMPARE {
            debug!(id, "compare selection full");
            return CompareToggle::Rejected;
        }
        self.selected.push(id);
        CompareToggle::Added
    }

    pub fn remove(&mut self, id: VehicleId) -> bool {
        let before = self.selected.len();
        self.selected.retain(|&s| s != id);
        self.selected.len() != before
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn contains(&self, id: VehicleId) -> bool {
        self.selected.contains(&id)
    }

    pub fn ids(&self) -> &[VehicleId] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected vehicles in selection order, resolved against the live catalog
    pub fn resolve(&self, catalog: &[Vehicle]) -> Vec<Vehicle> {
        self.selected
            .iter()
            .filter_map(|id| catalog.iter().find(|v| v.id == *id).cloned())
            .collect()
    }
}
