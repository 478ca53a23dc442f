// Prediction service client.
//
// Posts `{"text": ...}` to the configured endpoint and decodes
// `{"sentiment": ..., "confidence": ...}`. One request per call: no retries,
// no timeout.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use sentimeter_core::config::Config;
use sentimeter_core::form::AnalyzeError;
use sentimeter_core::prediction::{PredictionRequest, PredictionResponse, PredictionResult};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("prediction service returned status {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode prediction response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<ClientError> for AnalyzeError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Status(status) => AnalyzeError::Request { status },
            ClientError::Transport(e) => AnalyzeError::Transport(e.to_string()),
            ClientError::Decode(e) => AnalyzeError::MalformedResponse(e.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// PredictionService
// ---------------------------------------------------------------------------

/// A remote sentiment predictor.
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, text: &str) -> Result<PredictionResponse, ClientError>;
}

/// Run one prediction and convert it into bar percentages.
pub async fn analyze(
    service: &dyn PredictionService,
    text: &str,
) -> Result<PredictionResult, AnalyzeError> {
    let response = service.predict(text).await?;
    PredictionResult::from_response(&response).ok_or_else(|| {
        AnalyzeError::MalformedResponse("empty sentiment label".to_string())
    })
}

// ---------------------------------------------------------------------------
// HttpPredictionClient
// ---------------------------------------------------------------------------

/// reqwest-backed client for the prediction endpoint.
pub struct HttpPredictionClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpPredictionClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.service.endpoint.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PredictionService for HttpPredictionClient {
    async fn predict(&self, text: &str) -> Result<PredictionResponse, ClientError> {
        let body = PredictionRequest {
            text: text.to_string(),
        };

        debug!(endpoint = %self.endpoint, "POST prediction request");
        let response = self.http.post(&self.endpoint).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Sentiment analysis request failed with status {}", status);
            return Err(ClientError::Status(status.as_u16()));
        }

        // Decode separately so a bad body reports as Decode, not Transport.
        let bytes = response.bytes().await?;
        let parsed: PredictionResponse = serde_json::from_slice(&bytes)?;
        debug!(
            sentiment = %parsed.sentiment,
            confidence = parsed.confidence,
            "prediction response decoded"
        );
        Ok(parsed)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
