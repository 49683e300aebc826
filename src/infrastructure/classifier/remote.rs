//! Remote object-detection backend
//!
//! Posts the image as multipart form data to the configured detection
//! endpoint and returns the single highest-confidence prediction. Network
//! failures, non-2xx responses, empty prediction lists and out-of-range
//! confidences all surface as `DomainError::ExternalService` so the caller
//! can fall back.

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::ClassifierConfig;
use crate::shared::{DomainError, DomainResult};

/// A single raw detection as reported by the remote model.
#[derive(Debug, Clone)]
pub struct RawDetection {
    pub class: String,
    pub confidence: f64,
}

/// Abstraction over the object-detection service.
#[async_trait]
pub trait DetectionBackend: Send + Sync {
    /// Detect the dominant object in `image`. `filename` is forwarded as the
    /// multipart file name so the endpoint can infer the content type.
    async fn detect(&self, image: Vec<u8>, filename: &str) -> DomainResult<RawDetection>;
}

#[derive(Debug, Deserialize)]
struct DetectionResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    class: String,
    confidence: f64,
}

pub struct RemoteDetector {
    client: reqwest::Client,
    config: ClassifierConfig,
}

impl RemoteDetector {
    pub fn new(config: ClassifierConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Self { client, config }
    }

    fn best_prediction(response: DetectionResponse) -> DomainResult<Option<RawDetection>> {
        // A confidence outside [0, 1] means the endpoint is misbehaving;
        // treat the whole response as unusable rather than clamping.
        if let Some(p) = response
            .predictions
            .iter()
            .find(|p| !(0.0..=1.0).contains(&p.confidence))
        {
            return Err(DomainError::ExternalService(format!(
                "detection confidence out of range: {}",
                p.confidence
            )));
        }

        Ok(response
            .predictions
            .into_iter()
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
            .map(|p| RawDetection {
                class: p.class,
                confidence: p.confidence,
            }))
    }
}

#[async_trait]
impl DetectionBackend for RemoteDetector {
    async fn detect(&self, image: Vec<u8>, filename: &str) -> DomainResult<RawDetection> {
        let part = multipart::Part::bytes(image).file_name(filename.to_string());
        let form = multipart::Form::new()
            .part("file", part)
            .text("model", self.config.model.clone())
            .text("imgsz", self.config.image_size.to_string());

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| DomainError::ExternalService(format!("detection request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::ExternalService(format!(
                "detection endpoint returned {status}"
            )));
        }

        let body: DetectionResponse = response
            .json()
            .await
            .map_err(|e| DomainError::ExternalService(format!("invalid detection response: {e}")))?;

        let best = Self::best_prediction(body)?.ok_or_else(|| {
            DomainError::ExternalService("detection response contained no predictions".to_string())
        })?;

        debug!(
            class = %best.class,
            confidence = best.confidence,
            "remote detection succeeded"
        );
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_highest_confidence_prediction() {
        let response: DetectionResponse = serde_json::from_str(
            r#"{"predictions":[
                {"class":"bottle","confidence":0.62},
                {"class":"can","confidence":0.91},
                {"class":"paper","confidence":0.4}
            ]}"#,
        )
        .unwrap();

        let best = RemoteDetector::best_prediction(response).unwrap().unwrap();
        assert_eq!(best.class, "can");
        assert!((best.confidence - 0.91).abs() < 1e-9);
    }

    #[test]
    fn empty_prediction_list_yields_none() {
        let response: DetectionResponse = serde_json::from_str(r#"{"predictions":[]}"#).unwrap();
        assert!(RemoteDetector::best_prediction(response).unwrap().is_none());
    }

    #[test]
    fn missing_predictions_field_defaults_to_empty() {
        let response: DetectionResponse = serde_json::from_str("{}").unwrap();
        assert!(RemoteDetector::best_prediction(response).unwrap().is_none());
    }

    #[test]
    fn out_of_range_confidence_is_rejected() {
        let too_high: DetectionResponse = serde_json::from_str(
            r#"{"predictions":[{"class":"bottle","confidence":1.4}]}"#,
        )
        .unwrap();
        let err = RemoteDetector::best_prediction(too_high).unwrap_err();
        assert!(matches!(err, DomainError::ExternalService(_)));

        let negative: DetectionResponse = serde_json::from_str(
            r#"{"predictions":[{"class":"bottle","confidence":-0.2}]}"#,
        )
        .unwrap();
        assert!(RemoteDetector::best_prediction(negative).is_err());
    }
}
