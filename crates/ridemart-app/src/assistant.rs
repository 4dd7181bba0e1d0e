//! AI assistant with latest-call-wins results
//!
//! Each operation kind has its own generation counter. A call takes a ticket
//! when it starts; when it finishes, its result is applied only if no newer
//! call of the same kind has started since. Failures never touch stored
//! results.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use ridemart_ai::AiGateway;
use ridemart_types::{Diagnosis, ImageAttachment, ReviewInsight, ServiceError, Vehicle, VehicleId};
use tracing::{debug, warn};

/// What happened to a finished call
#[derive(Debug, Clone, PartialEq)]
pub enum AiOutcome<T> {
    Applied(T),
    /// A newer call of the same kind started first; the result was dropped
    Superseded,
}

impl<T> AiOutcome<T> {
    pub fn applied(self) -> Option<T> {
        match self {
            AiOutcome::Applied(value) => Some(value),
            AiOutcome::Superseded => None,
        }
    }
}

struct LatestSlot<T> {
    kind: &'static str,
    generation: AtomicU64,
    value: Mutex<Option<T>>,
}

impl<T: Clone> LatestSlot<T> {
    fn new(kind: &'static str) -> Self {
        Self {
            kind,
            generation: AtomicU64::new(0),
            value: Mutex::new(None),
        }
    }

    fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn lock(&self) -> MutexGuard<'_, Option<T>> {
        self.value.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }

    fn complete(&self, ticket: u64, result: Result<T, ServiceError>) -> Result<AiOutcome<T>, ServiceError> {
        let mut slot = self.lock();
        if !self.is_current(ticket) {
            debug!(kind = self.kind, ticket, "discarding stale AI response");
            return Ok(AiOutcome::Superseded);
        }
        match result {
            Ok(value) => {
                *slot = Some(value.clone());
                Ok(AiOutcome::Applied(value))
            }
            Err(e) => {
                warn!(kind = self.kind, error = %e, "AI request failed");
                Err(e)
            }
        }
    }

    fn latest(&self) -> Option<T> {
        self.lock().clone()
    }

    fn clear(&self) {
        self.begin();
        *self.lock() = None;
    }
}

pub struct AiAssistant {
    gateway: Arc<dyn AiGateway>,
    review: LatestSlot<(VehicleId, ReviewInsight)>,
    recommendations: LatestSlot<Vec<VehicleId>>,
    diagnosis: LatestSlot<Diagnosis>,
}

impl AiAssistant {
    pub fn new(gateway: Arc<dyn AiGateway>) -> Self {
        Self {
            gateway,
            review: LatestSlot::new("review"),
            recommendations: LatestSlot::new("recommendations"),
            diagnosis: LatestSlot::new("diagnosis"),
        }
    }

    pub async fn generate_review(&self, vehicle: &Vehicle) -> Result<AiOutcome<ReviewInsight>, ServiceError> {
        let ticket = self.review.begin();
        debug!(ticket, vehicle_id = vehicle.id, "requesting AI review");
        let result = self
            .gateway
            .generate_review(vehicle)
            .await
            .map(|insight| (vehicle.id, insight));
        Ok(match self.review.complete(ticket, result)? {
            AiOutcome::Applied((_, insight)) => AiOutcome::Applied(insight),
            AiOutcome::Superseded => AiOutcome::Superseded,
        })
    }

    /// Empty favorites or candidates apply an empty list without calling out
    pub async fn recommend(
        &self,
        favorites: &[Vehicle],
        candidates: &[Vehicle],
    ) -> Result<AiOutcome<Vec<VehicleId>>, ServiceError> {
        let ticket = self.recommendations.begin();
        if favorites.is_empty() || candidates.is_empty() {
            return self.recommendations.complete(ticket, Ok(Vec::new()));
        }
        debug!(ticket, favorites = favorites.len(), candidates = candidates.len(), "requesting AI recommendations");
        let result = self.gateway.get_recommendations(favorites, candidates).await;
        self.recommendations.complete(ticket, result)
    }

    pub async fn diagnose(
        &self,
        description: &str,
        image: Option<&ImageAttachment>,
    ) -> Result<AiOutcome<Diagnosis>, ServiceError> {
        if description.trim().is_empty() {
            return Err(ServiceError::EmptyInput("description"));
        }
        let ticket = self.diagnosis.begin();
        debug!(ticket, with_image = image.is_some(), "requesting AI diagnosis");
        let result = self.gateway.diagnose(description, image).await;
        self.diagnosis.complete(ticket, result)
    }

    /// Latest applied review and the vehicle it belongs to
    pub fn latest_review(&self) -> Option<(VehicleId, ReviewInsight)> {
        self.review.latest()
    }

    pub fn latest_recommendations(&self) -> Option<Vec<VehicleId>> {
        self.recommendations.latest()
    }

    pub fn latest_diagnosis(&self) -> Option<Diagnosis> {
        self.diagnosis.latest()
    }

    /// Forget the diagnosis; any call still in flight will be discarded
    pub fn clear_diagnosis(&self) {
        self.diagnosis.clear();
    }
}
