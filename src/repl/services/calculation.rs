//! # Calculation Client
//!
//! Performs one remote arithmetic computation per call and classifies the
//! outcome. No retries: every `compute` is attempted exactly once, and the
//! timeout is the one configured on the underlying reqwest client.

use crate::profile::CalcProfile;
use crate::repl::models::{
    BackendStatus, CalculationFailure, CalculationOutcome, CalculationRequest,
};
use anyhow::Result;
use serde::Deserialize;

/// Longest slice of an unexpected body quoted in a diagnostic
const MAX_BODY_EXCERPT: usize = 120;

/// Reply of the calculation endpoint: `{"result": ..}` or `{"error": ..}`
#[derive(Debug, Deserialize)]
struct CalculationReply {
    result: Option<f64>,
    error: Option<String>,
}

/// Reply of the health endpoint
#[derive(Debug, Deserialize)]
struct HealthReply {
    status: Option<String>,
}

/// Client for the remote calculation service
#[derive(Debug, Clone)]
pub struct CalculationClient {
    http: reqwest::Client,
    calculate_url: String,
    health_url: String,
}

impl CalculationClient {
    /// Create a client for the service described by `profile`
    pub fn new(profile: &CalcProfile) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(profile.timeout())
            .build()?;

        tracing::debug!(
            calculate_url = %profile.calculate_url(),
            timeout_ms = profile.timeout().as_millis() as u64,
            "CalculationClient created"
        );

        Ok(Self {
            http,
            calculate_url: profile.calculate_url(),
            health_url: profile.health_url(),
        })
    }

    pub fn calculate_url(&self) -> &str {
        &self.calculate_url
    }

    /// Compute `a <operator> b` remotely
    pub async fn compute(&self, request: &CalculationRequest) -> CalculationOutcome {
        tracing::debug!(
            a = request.a,
            b = request.b,
            operation = %request.operator,
            "POST {}",
            self.calculate_url
        );

        let response = self
            .http
            .post(&self.calculate_url)
            .json(request)
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        let outcome = classify_response(status, &body);
        tracing::debug!(status, ?outcome, "calculation response classified");
        outcome
    }

    /// Ask the service whether its backend is healthy
    pub async fn check_health(&self) -> BackendStatus {
        let response = match self.http.get(&self.health_url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("health check failed: {e}");
                return BackendStatus::Disconnected;
            }
        };

        if !response.status().is_success() {
            tracing::debug!(status = response.status().as_u16(), "backend reported unhealthy");
            return BackendStatus::Disconnected;
        }

        match response.json::<HealthReply>().await {
            Ok(HealthReply {
                status: Some(status),
            }) if status == "OK" => BackendStatus::Connected,
            other => {
                tracing::debug!(reply = ?other.ok(), "unexpected health reply");
                BackendStatus::Disconnected
            }
        }
    }
}

/// Map a reqwest failure to a calculation failure
///
/// Unreachable endpoints and timeouts mean the service is unavailable;
/// everything else is a transport error.
fn classify_transport_error(error: &reqwest::Error) -> CalculationFailure {
    if error.is_connect() || error.is_timeout() {
        tracing::warn!("calculation service unreachable: {error}");
        CalculationFailure::unavailable()
    } else {
        tracing::warn!("calculation transport error: {error}");
        CalculationFailure::transport(error.to_string())
    }
}

/// Classify a response that reached us
///
/// A 503 is how the proxy reports an unreachable backend. An `error` field
/// means the service refused the computation.
pub fn classify_response(status: u16, body: &str) -> CalculationOutcome {
    if status == 503 {
        return Err(CalculationFailure::unavailable());
    }

    let reply = serde_json::from_str::<CalculationReply>(body).ok();
    let error = reply
        .as_ref()
        .and_then(|reply| reply.error.as_deref())
        .map(str::trim)
        .filter(|error| !error.is_empty());
    let is_success = (200..300).contains(&status);

    match (is_success, error, reply.as_ref().and_then(|reply| reply.result)) {
        (_, Some(error), _) => Err(CalculationFailure::rejected(error)),
        (true, None, Some(result)) => Ok(result),
        (true, None, None) => Err(CalculationFailure::transport(format!(
            "unexpected response from calculation service: {}",
            excerpt(body)
        ))),
        (false, None, _) => Err(CalculationFailure::rejected(format!(
            "Calculation failed (HTTP {status})"
        ))),
    }
}

fn excerpt(body: &str) -> String {
    if body.chars().count() > MAX_BODY_EXCERPT {
        let cut: String = body.chars().take(MAX_BODY_EXCERPT).collect();
        format!("{cut}…")
    } else {
        body.to_string()
    }
}
