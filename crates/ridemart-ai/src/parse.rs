//! Response extraction and schema validation
//!
//! Model output is parsed in two stages: text to JSON (malformed response)
//! and JSON to the expected shape (schema violation).

use std::collections::HashSet;

use ridemart_types::{Diagnosis, RepairAdvice, ReviewInsight, ServiceError, VehicleId};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Strip code fences or surrounding prose from a model response
pub fn extract_json_from_response(response: &str) -> String {
    let response = response.trim();

    if response.starts_with("```") {
        if let Some(end) = response.rfind("```") {
            let start = response.find('\n').map_or(response.len(), |i| i + 1);
            if start < end {
                return response[start..end].trim().to_string();
            }
        }
    }

    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if start < end {
                return response[start..=end].to_string();
            }
        }
    }

    response.to_string()
}

#[derive(Debug, Deserialize)]
struct ReviewWire {
    pros: Vec<String>,
    cons: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RecommendationWire {
    recommendations: Vec<VehicleId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiagnosisWire {
    potential_causes: Vec<String>,
    suggested_steps: Vec<String>,
    recommendation: RepairAdvice,
}

fn decode<T: DeserializeOwned>(response: &str) -> Result<T, ServiceError> {
    let json_str = extract_json_from_response(response);
    let value: serde_json::Value = serde_json::from_str(&json_str).map_err(|e| {
        let truncated: String = response.chars().take(200).collect();
        ServiceError::MalformedResponse(format!("{} | raw: {}", e, truncated))
    })?;
    serde_json::from_value(value).map_err(|e| ServiceError::SchemaViolation(e.to_string()))
}

fn clean_list(field: &str, items: Vec<String>) -> Result<Vec<String>, ServiceError> {
    items
        .into_iter()
        .map(|item| {
            let trimmed = item.trim();
            if trimmed.is_empty() {
                Err(ServiceError::SchemaViolation(format!("empty entry in '{}'", field)))
            } else {
                Ok(trimmed.to_string())
            }
        })
        .collect()
}

pub fn parse_review(response: &str) -> Result<ReviewInsight, ServiceError> {
    let wire: ReviewWire = decode(response)?;
    let insight = ReviewInsight {
        pros: clean_list("pros", wire.pros)?,
        cons: clean_list("cons", wire.cons)?,
    };
    if insight.pros.is_empty() && insight.cons.is_empty() {
        return Err(ServiceError::SchemaViolation("review has no pros or cons".to_string()));
    }
    Ok(insight)
}

/// Keep only candidate ids, first occurrence wins, at most `max`
pub fn parse_recommendations(
    response: &str,
    candidate_ids: &[VehicleId],
    max: usize,
) -> Result<Vec<VehicleId>, ServiceError> {
    let wire: RecommendationWire = decode(response)?;
    Ok(select_recommendations(wire.recommendations, candidate_ids, max))
}

pub fn select_recommendations(
    ranked: impl IntoIterator<Item = VehicleId>,
    candidate_ids: &[VehicleId],
    max: usize,
) -> Vec<VehicleId> {
    let mut seen = HashSet::new();
    ranked
        .into_iter()
        .filter(|id| candidate_ids.contains(id))
        .filter(|id| seen.insert(*id))
        .take(max)
        .collect()
}

pub fn parse_diagnosis(response: &str) -> Result<Diagnosis, ServiceError> {
    let wire: DiagnosisWire = decode(response)?;
    let diagnosis = Diagnosis {
        potential_causes: clean_list("potentialCauses", wire.potential_causes)?,
        suggested_steps: clean_list("suggestedSteps", wire.suggested_steps)?,
        recommendation: wire.recommendation,
    };
    if diagnosis.potential_causes.is_empty() {
        return Err(ServiceError::SchemaViolation("diagnosis has no potential causes".to_string()));
    }
    Ok(diagnosis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_strips_fences() {
        let response = "```json\n{\"pros\": [\"a\"]}\n```";
        assert_eq!(extract_json_from_response(response), "{\"pros\": [\"a\"]}");
        let plain_fence = "```\n{\"cons\": []}\n```";
        assert_eq!(extract_json_from_response(plain_fence), "{\"cons\": []}");
    }

    #[test]
    fn test_extract_json_from_prose() {
        let response = "Here is the review: {\"pros\": [], \"cons\": []} Hope it helps!";
        assert_eq!(extract_json_from_response(response), "{\"pros\": [], \"cons\": []}");
    }

    #[test]
    fn test_parse_review_trims_entries() {
        let insight = parse_review(r#"{"pros": [" Great mileage "], "cons": ["Stiff suspension"]}"#).unwrap();
        assert_eq!(insight.pros, vec!["Great mileage"]);
        assert_eq!(insight.cons, vec!["Stiff suspension"]);
    }

    #[test]
    fn test_parse_review_rejects_missing_field() {
        let err = parse_review(r#"{"pros": ["Great mileage"]}"#).unwrap_err();
        assert!(matches!(err, ServiceError::SchemaViolation(_)));
    }

    #[test]
    fn test_parse_review_rejects_wrong_types() {
        let err = parse_review(r#"{"pros": "fast", "cons": []}"#).unwrap_err();
        assert!(matches!(err, ServiceError::SchemaViolation(_)));
    }

    #[test]
    fn test_parse_review_rejects_blank_entry() {
        let err = parse_review(r#"{"pros": ["ok", "  "], "cons": []}"#).unwrap_err();
        assert!(matches!(err, ServiceError::SchemaViolation(_)));
    }

    #[test]
    fn test_non_json_is_malformed() {
        let err = parse_review("Sorry, I cannot help with that.").unwrap_err();
        assert!(matches!(err, ServiceError::MalformedResponse(_)));
    }

    #[test]
    fn test_recommendations_limited_to_candidates() {
        let ids = parse_recommendations(r#"{"recommendations": [9, 4, 4, 2, 7, 3]}"#, &[2, 3, 4, 7], 3).unwrap();
        assert_eq!(ids, vec![4, 2, 7]);
    }

    #[test]
    fn test_recommendations_all_foreign_is_empty() {
        let ids = parse_recommendations(r#"{"recommendations": [100, 200]}"#, &[1, 2], 3).unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn test_parse_diagnosis() {
        let response = r#"```json
        {
          "potentialCauses": ["Worn brake pads"],
          "suggestedSteps": ["Inspect pad thickness", "Replace pads"],
          "recommendation": "CAUTION_ADVISED"
        }
        ```"#;
        let diagnosis = parse_diagnosis(response).unwrap();
        assert_eq!(diagnosis.recommendation, RepairAdvice::CautionAdvised);
        assert_eq!(diagnosis.suggested_steps.len(), 2);
    }

    #[test]
    fn test_parse_diagnosis_unknown_advice() {
        let response = r#"{"potentialCauses": ["x"], "suggestedSteps": [], "recommendation": "PANIC"}"#;
        assert!(matches!(parse_diagnosis(response), Err(ServiceError::SchemaViolation(_))));
    }
}
