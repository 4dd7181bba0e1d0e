//! Offline gateway with deterministic canned answers

use async_trait::async_trait;
use ridemart_types::{Diagnosis, ImageAttachment, RepairAdvice, ReviewInsight, ServiceError, Vehicle, VehicleId};
use tracing::debug;

use crate::gateway::AiGateway;
use crate::parse::select_recommendations;

#[derive(Debug, Clone)]
pub struct MockGateway {
    max_recommendations: usize,
}

impl MockGateway {
    pub fn new(max_recommendations: usize) -> Self {
        Self { max_recommendations }
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new(crate::DEFAULT_MAX_RECOMMENDATIONS)
    }
}

#[async_trait]
impl AiGateway for MockGateway {
    async fn generate_review(&self, vehicle: &Vehicle) -> Result<ReviewInsight, ServiceError> {
        debug!(vehicle_id = vehicle.id, "mock review");
        Ok(ReviewInsight {
            pros: vec![
                format!("Excellent fuel efficiency at {}.", vehicle.mileage),
                format!("Reliable engine with {} displacement.", vehicle.engine),
                "Low maintenance cost, ideal for daily commuting.".to_string(),
            ],
            cons: vec![
                "Basic features compared to competitors.".to_string(),
                format!("Braking system ({}) could be improved.", vehicle.brakes),
                "Suspension might feel stiff on rough roads.".to_string(),
            ],
        })
    }

    async fn get_recommendations(
        &self,
        favorites: &[Vehicle],
        candidates: &[Vehicle],
    ) -> Result<Vec<VehicleId>, ServiceError> {
        if favorites.is_empty() || candidates.is_empty() {
            return Ok(Vec::new());
        }
        let mut ranked: Vec<&Vehicle> = candidates.iter().collect();
        // stable: equal ratings keep catalog order
        ranked.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        let candidate_ids: Vec<VehicleId> = candidates.iter().map(|v| v.id).collect();
        Ok(select_recommendations(
            ranked.iter().map(|v| v.id),
            &candidate_ids,
            self.max_recommendations,
        ))
    }

    async fn diagnose(
        &self,
        description: &str,
        image: Option<&ImageAttachment>,
    ) -> Result<Diagnosis, ServiceError> {
        if description.trim().is_empty() {
            return Err(ServiceError::EmptyInput("description"));
        }
        let mut steps = vec![
            "Check tyre pressure, chain tension and fluid levels.".to_string(),
            "Note when the problem occurs (cold start, braking, high speed).".to_string(),
            "Visit an authorised service centre if it persists.".to_string(),
        ];
        if image.is_some() {
            steps.insert(0, "Compare the photographed part with the owner's manual diagrams.".to_string());
        }
        Ok(Diagnosis {
            potential_causes: vec![
                "Wear of a routine service part.".to_string(),
                "Loose or misadjusted component.".to_string(),
            ],
            suggested_steps: steps,
            recommendation: RepairAdvice::CautionAdvised,
        })
    }
}
