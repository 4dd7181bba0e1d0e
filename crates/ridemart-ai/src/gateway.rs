//! Gateway contract shared by every backend

use async_trait::async_trait;
use ridemart_types::{Diagnosis, ImageAttachment, ReviewInsight, ServiceError, Vehicle, VehicleId};

/// Generative-model operations used by the marketplace.
///
/// Responses are untrusted: implementations validate shape before returning.
#[async_trait]
pub trait AiGateway: Send + Sync {
    /// Pros and cons for a single vehicle
    async fn generate_review(&self, vehicle: &Vehicle) -> Result<ReviewInsight, ServiceError>;

    /// A few ids drawn only from `candidates`. Empty favorites or candidates
    /// yield an empty list without a remote call.
    async fn get_recommendations(
        &self,
        favorites: &[Vehicle],
        candidates: &[Vehicle],
    ) -> Result<Vec<VehicleId>, ServiceError>;

    /// Maintenance triage for a described problem, optionally with a photo
    async fn diagnose(
        &self,
        description: &str,
        image: Option<&ImageAttachment>,
    ) -> Result<Diagnosis, ServiceError>;
}
