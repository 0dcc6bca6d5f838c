#![forbid(unsafe_code)]

//! Wire contract and HTTP client for the promo simulation endpoint.
//!
//! One call: `POST /v1/inference/simulate-promo`. A superseded request is
//! the normal case here, not an error, so every client call takes a
//! [`CancellationToken`] and maps a tripped token to
//! [`InferenceError::Cancelled`].

use ppi_core::cancel::CancellationToken;
use ppi_core::model::PromoKind;
use serde::{Deserialize, Serialize};
use web_time::Duration;

/// Path of the simulation endpoint, relative to the service base URL.
pub const SIMULATE_PROMO_PATH: &str = "/v1/inference/simulate-promo";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Request body for a promo simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromoSimulationRequest {
    pub sku_id: String,
    pub current_price: f64,
    /// `"percentage"` or `"volume"`.
    pub promo_type: String,
    pub promo_value: f64,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seasonality_factor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competitor_prices: Option<Vec<f64>>,
}

impl PromoSimulationRequest {
    pub fn new(
        sku_id: impl Into<String>,
        current_price: f64,
        kind: PromoKind,
        promo_value: f64,
        location: impl Into<String>,
    ) -> Self {
        Self {
            sku_id: sku_id.into(),
            current_price,
            promo_type: kind.as_str().to_owned(),
            promo_value,
            location: location.into(),
            seasonality_factor: None,
            inventory_level: None,
            competitor_prices: None,
        }
    }
}

/// Response body from a promo simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromoSimulationResponse {
    pub projected_lift: f64,
    /// (lower, upper), ordered.
    pub confidence_interval: [f64; 2],
    pub ai_recommended_value: f64,
    pub calibration_score: f64,
    pub latency_ms: f64,
    pub model_version: String,
}

/// Failure taxonomy for the calibration boundary.
///
/// `Cancelled` is expected and silent; the session discards it without
/// surfacing anything. The other variants are logged and leave prior
/// state intact; there is no automatic retry.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("request superseded or cancelled")]
    Cancelled,
    #[error("http transport: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl InferenceError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// A promo simulation backend.
///
/// The session and worker are written against this trait; tests substitute
/// a fake that records requests and returns canned responses.
pub trait InferenceClient: Send + Sync {
    fn simulate_promo(
        &self,
        request: &PromoSimulationRequest,
        cancel: &CancellationToken,
    ) -> Result<PromoSimulationResponse, InferenceError>;
}

/// Blocking HTTP implementation over `reqwest`.
///
/// The token is checked before dispatch and again before the decoded body
/// is returned, so a response that arrives after supersession surfaces as
/// `Cancelled` rather than a result the caller might apply.
pub struct HttpInferenceClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl HttpInferenceClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, InferenceError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            SIMULATE_PROMO_PATH
        )
    }
}

impl InferenceClient for HttpInferenceClient {
    fn simulate_promo(
        &self,
        request: &PromoSimulationRequest,
        cancel: &CancellationToken,
    ) -> Result<PromoSimulationResponse, InferenceError> {
        if cancel.is_cancelled() {
            return Err(InferenceError::Cancelled);
        }
        let response = self.http.post(self.endpoint()).json(request).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(InferenceError::Status(status.as_u16()));
        }
        let body = response.text()?;
        let decoded: PromoSimulationResponse = serde_json::from_str(&body)?;
        if cancel.is_cancelled() {
            return Err(InferenceError::Cancelled);
        }
        Ok(decoded)
    }
}
