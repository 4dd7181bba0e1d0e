//! AI gateway - generated reviews, recommendations and maintenance triage

pub mod attachment;
pub mod gateway;
pub mod gemini;
pub mod mock;
pub mod parse;
pub mod prompts;

pub use attachment::attachment_from_bytes;
pub use gateway::AiGateway;
pub use gemini::GeminiGateway;
pub use mock::MockGateway;
pub use parse::extract_json_from_response;

use std::sync::Arc;
use std::time::Duration;

use ridemart_types::ServiceError;
use tracing::warn;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 3;

/// Which gateway implementation answers requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiBackend {
    Gemini,
    /// Offline canned answers
    Mock,
}

/// Gateway configuration
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub backend: AiBackend,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    pub max_recommendations: usize,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            backend: AiBackend::Gemini,
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_recommendations: DEFAULT_MAX_RECOMMENDATIONS,
        }
    }
}

impl AiConfig {
    pub fn with_backend(mut self, backend: &str) -> Self {
        self.backend = match backend.to_lowercase().as_str() {
            "mock" | "offline" => AiBackend::Mock,
            _ => AiBackend::Gemini,
        };
        self
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
            self.model = model;
        }
        self
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs.max(1));
        self
    }

    pub fn with_max_recommendations(mut self, max: usize) -> Self {
        self.max_recommendations = max.max(1);
        self
    }
}

/// Build the configured gateway. Gemini without an API key answers offline.
pub fn build_gateway(config: &AiConfig) -> Result<Arc<dyn AiGateway>, ServiceError> {
    match config.backend {
        AiBackend::Mock => Ok(Arc::new(MockGateway::new(config.max_recommendations))),
        AiBackend::Gemini if config.api_key.is_none() => {
            warn!("no API key configured, using the offline AI backend");
            Ok(Arc::new(MockGateway::new(config.max_recommendations)))
        }
        AiBackend::Gemini => Ok(Arc::new(GeminiGateway::new(config.clone())?)),
    }
}
