//! Gemini REST backend
//!
//! `POST {base}/v1beta/models/{model}:generateContent?key=...` with a JSON
//! response schema per operation. The first candidate's text part carries
//! the JSON payload.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use ridemart_types::{Diagnosis, ImageAttachment, ReviewInsight, ServiceError, Vehicle, VehicleId};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::gateway::AiGateway;
use crate::parse::{parse_diagnosis, parse_recommendations, parse_review};
use crate::prompts::{build_diagnosis_prompt, build_recommendation_prompt, build_review_prompt};
use crate::AiConfig;

pub struct GeminiGateway {
    config: AiConfig,
    api_key: String,
    http: reqwest::Client,
}

impl GeminiGateway {
    pub fn new(config: AiConfig) -> Result<Self, ServiceError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| ServiceError::MissingApiKey("api_key".to_string()))?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ServiceError::Http(format!("failed to build http client: {}", e)))?;

        Ok(Self { config, api_key, http })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim().trim_end_matches('/'),
            self.config.model
        )
    }

    async fn generate(&self, parts: Vec<Part>, schema: Value) -> Result<String, ServiceError> {
        let payload = build_request(parts, schema);
        debug!(model = %self.config.model, "sending generateContent request");

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ServiceError::Http(format!("request timed out after {:?}", self.config.timeout))
                } else {
                    ServiceError::Http(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Http(format!("failed to read response body: {}", e)))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "AI service returned an error status");
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body: truncate_for_error(&body),
            });
        }

        candidate_text(&body)
    }
}

#[async_trait]
impl AiGateway for GeminiGateway {
    async fn generate_review(&self, vehicle: &Vehicle) -> Result<ReviewInsight, ServiceError> {
        let text = self
            .generate(vec![Part::text(build_review_prompt(vehicle))], review_schema())
            .await?;
        parse_review(&text)
    }

    async fn get_recommendations(
        &self,
        favorites: &[Vehicle],
        candidates: &[Vehicle],
    ) -> Result<Vec<VehicleId>, ServiceError> {
        if favorites.is_empty() || candidates.is_empty() {
            return Ok(Vec::new());
        }
        let max = self.config.max_recommendations;
        let prompt = build_recommendation_prompt(favorites, candidates, max);
        let text = self.generate(vec![Part::text(prompt)], recommendation_schema()).await?;
        let candidate_ids: Vec<VehicleId> = candidates.iter().map(|v| v.id).collect();
        parse_recommendations(&text, &candidate_ids, max)
    }

    async fn diagnose(
        &self,
        description: &str,
        image: Option<&ImageAttachment>,
    ) -> Result<Diagnosis, ServiceError> {
        if description.trim().is_empty() {
            return Err(ServiceError::EmptyInput("description"));
        }
        let mut parts = vec![Part::text(build_diagnosis_prompt(description, image.is_some()))];
        if let Some(image) = image {
            parts.push(Part::image(image));
        }
        let text = self.generate(parts, diagnosis_schema()).await?;
        parse_diagnosis(&text)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: String) -> Self {
        Self { text: Some(text), inline_data: None }
    }

    fn image(image: &ImageAttachment) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: image.mime_type.clone(),
                data: STANDARD.encode(&image.bytes),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

fn build_request(parts: Vec<Part>, schema: Value) -> Value {
    json!({
        "contents": [{ "role": "user", "parts": parts }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": schema,
        }
    })
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// Text of the first candidate
fn candidate_text(body: &str) -> Result<String, ServiceError> {
    let parsed: GenerateResponse = serde_json::from_str(body).map_err(|e| {
        ServiceError::MalformedResponse(format!("{} (body={})", e, truncate_for_error(body)))
    })?;

    parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| ServiceError::MalformedResponse("response had no candidate text".to_string()))
}

fn string_array(description: &str) -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" }, "description": description })
}

fn review_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "pros": string_array("A list of positive aspects or advantages of the vehicle."),
            "cons": string_array("A list of negative aspects or disadvantages of the vehicle."),
        },
        "required": ["pros", "cons"]
    })
}

fn recommendation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recommendations": {
                "type": "ARRAY",
                "items": { "type": "INTEGER" },
                "description": "Ids of the recommended candidate vehicles, best first."
            }
        },
        "required": ["recommendations"]
    })
}

fn diagnosis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "potentialCauses": string_array("Likely causes of the described problem."),
            "suggestedSteps": string_array("Ordered steps the owner can take."),
            "recommendation": {
                "type": "STRING",
                "enum": ["DIY_FRIENDLY", "CAUTION_ADVISED", "PROFESSIONAL_HELP_RECOMMENDED"]
            }
        },
        "required": ["potentialCauses", "suggestedSteps", "recommendation"]
    })
}

fn truncate_for_error(value: &str) -> String {
    const LIMIT: usize = 400;
    if value.chars().count() <= LIMIT {
        value.to_string()
    } else {
        let head: String = value.chars().take(LIMIT).collect();
        format!("{}...", head)
    }
}
