//! HTTP client for the generative language API.

use super::wire::{
    ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse, into_snapshot,
    parse_prediction,
};
use super::{PredictionBundle, Predictor, build_prompt};
use crate::config::PredictorConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Remote predictor backed by a Gemini-style `generateContent` endpoint.
pub struct ElectionPredictor {
    http: Client,
    config: PredictorConfig,
}

impl ElectionPredictor {
    /// Create a new predictor client.
    ///
    /// The request timeout doubles as the hung-call safety net: a call that
    /// never resolves comes back as a network error instead of leaving the
    /// poll controller busy forever.
    pub fn new(config: PredictorConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::network(e.to_string()))?;

        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// One round-trip to the API, no retries.
    async fn fetch_once(&self, election_date: &str) -> Result<PredictionBundle> {
        let request = GenerateContentRequest::grounded(build_prompt(election_date));

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.config.resolved_api_key())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, &body));
        }

        let envelope: GenerateContentResponse = response.json().await?;
        let sources = envelope.sources();
        let wire = parse_prediction(envelope.answer_text()?)?;
        let (snapshot, feed) = into_snapshot(wire, sources);

        Ok(PredictionBundle { snapshot, feed })
    }
}

#[async_trait]
impl Predictor for ElectionPredictor {
    async fn predict(&self, election_date: &str) -> Result<PredictionBundle> {
        let attempts = self.config.max_retries.max(1);
        let mut last_error = Error::application("prediction fetch never attempted");

        for attempt in 0..attempts {
            match self.fetch_once(election_date).await {
                Ok(bundle) => return Ok(bundle),
                Err(err) => {
                    tracing::warn!(attempt = attempt + 1, error = %err, "prediction attempt failed");
                    let is_last = attempt + 1 == attempts;
                    if !is_last {
                        tokio::time::sleep(retry_delay(err.is_rate_limited(), attempt)).await;
                    }
                    last_error = err;
                }
            }
        }

        Err(last_error)
    }
}

/// Delay before the next in-call attempt. Rate limits back off harder than
/// ordinary transient failures.
fn retry_delay(rate_limited: bool, attempt: u32) -> Duration {
    if rate_limited {
        Duration::from_secs(5 * (u64::from(attempt) + 1))
    } else {
        Duration::from_secs(1 << attempt.min(6))
    }
}

/// Map a non-success HTTP status (plus error body, when parseable) onto the
/// failure taxonomy.
fn classify_failure(status: StatusCode, body: &str) -> Error {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Error::RateLimited;
    }

    if let Ok(envelope) = serde_json::from_str::<ApiErrorEnvelope>(body) {
        if envelope.error.status == "RESOURCE_EXHAUSTED" || envelope.error.code == 429 {
            return Error::RateLimited;
        }
        return Error::network(format!("{}: {}", status, envelope.error.message));
    }

    Error::network(format!("unexpected status {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rate_limit_delays_grow_linearly() {
        assert_eq!(retry_delay(true, 0), Duration::from_secs(5));
        assert_eq!(retry_delay(true, 1), Duration::from_secs(10));
        assert_eq!(retry_delay(true, 2), Duration::from_secs(15));
    }

    #[test]
    fn transient_delays_grow_exponentially() {
        assert_eq!(retry_delay(false, 0), Duration::from_secs(1));
        assert_eq!(retry_delay(false, 1), Duration::from_secs(2));
        assert_eq!(retry_delay(false, 2), Duration::from_secs(4));
    }

    #[test]
    fn http_429_classifies_as_rate_limited() {
        let err = classify_failure(StatusCode::TOO_MANY_REQUESTS, "");
        assert!(err.is_rate_limited());
    }

    #[test]
    fn resource_exhausted_body_classifies_as_rate_limited() {
        let body = r#"{"error": {"code": 429, "status": "RESOURCE_EXHAUSTED", "message": "quota"}}"#;
        let err = classify_failure(StatusCode::FORBIDDEN, body);
        assert!(err.is_rate_limited());
    }

    #[test]
    fn other_statuses_classify_as_network_errors() {
        let body = r#"{"error": {"code": 500, "status": "INTERNAL", "message": "boom"}}"#;
        let err = classify_failure(StatusCode::INTERNAL_SERVER_ERROR, body);
        assert!(matches!(err, Error::Network(_)));
    }

    #[test]
    fn endpoint_joins_base_url_and_model() {
        let predictor = ElectionPredictor::new(PredictorConfig {
            base_url: "https://generativelanguage.googleapis.com/".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            predictor.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }
}
