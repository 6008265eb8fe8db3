//! Ensembl REST API client.
//!
//! Endpoints:
//! - `GET {base}/variation/{species}/{id}`: identifier placements
//! - `POST {base}/vep/{species}/region`: Variant Effect Predictor for one region

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::ServiceConfig;
use crate::core::annotation::AnnotationResult;
use crate::ensembl::{EffectPredictor, Mapping, ServiceError, VariationLookup};

#[derive(Debug, Deserialize)]
struct VariationResponse {
    #[serde(default)]
    mappings: Vec<Mapping>,
}

pub struct EnsemblClient {
    client: reqwest::Client,
    config: ServiceConfig,
}

impl EnsemblClient {
    /// Build a client from `config`
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Transport` if the HTTP client cannot be constructed.
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ServiceError::Transport {
                url: config.base_url.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { client, config })
    }

    async fn read_json<T: DeserializeOwned>(
        url: &str,
        response: reqwest::Response,
    ) -> Result<T, ServiceError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        response.json::<T>().await.map_err(|e| ServiceError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

fn transport(url: &str, e: &reqwest::Error) -> ServiceError {
    ServiceError::Transport {
        url: url.to_string(),
        message: e.to_string(),
    }
}

#[async_trait]
impl VariationLookup for EnsemblClient {
    #[instrument(skip(self))]
    async fn lookup(&self, identifier: &str) -> Result<Vec<Mapping>, ServiceError> {
        let url = self
            .config
            .variation_url(identifier)
            .ok_or_else(|| ServiceError::Transport {
                url: self.config.base_url.clone(),
                message: "base URL cannot hold a variation path".to_string(),
            })?;
        let response = self
            .client
            .get(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| transport(url.as_str(), &e))?;

        let parsed: VariationResponse = Self::read_json(url.as_str(), response).await?;
        debug!(mappings = parsed.mappings.len(), "Variation lookup returned");
        Ok(parsed.mappings)
    }
}

#[async_trait]
impl EffectPredictor for EnsemblClient {
    #[instrument(skip(self))]
    async fn predict(&self, region: &str) -> Result<Vec<AnnotationResult>, ServiceError> {
        let url = self.config.region_url();
        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(&serde_json::json!({ "variants": [region] }))
            .send()
            .await
            .map_err(|e| transport(&url, &e))?;

        Self::read_json(&url, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_server;

    fn client_for(base: &str) -> EnsemblClient {
        EnsemblClient::new(ServiceConfig::default().with_base_url(base)).unwrap()
    }

    #[tokio::test]
    async fn test_lookup_parses_mappings() {
        let body = r#"{"name":"rs7412","mappings":[
            {"seq_region_name":"19","start":44908822,"end":44908822,"allele_string":"C/T","assembly_name":"GRCh38"}
        ]}"#;
        let (base, captured) = test_server::serve(vec![(200, body.to_string())]).await;

        let mappings = client_for(&base).lookup("rs7412").await.unwrap();
        assert_eq!(
            mappings,
            vec![Mapping {
                seq_region_name: "19".to_string(),
                start: 44_908_822,
                allele_string: "C/T".to_string(),
            }]
        );

        let requests = captured.lock().unwrap();
        assert_eq!(requests[0].request_line, "GET /variation/human/rs7412 HTTP/1.1");
    }

    #[tokio::test]
    async fn test_lookup_escapes_identifier() {
        let (base, captured) = test_server::serve(vec![(200, r#"{"mappings":[]}"#.to_string())]).await;

        assert!(client_for(&base).lookup("rs1/../x?y z").await.unwrap().is_empty());

        let requests = captured.lock().unwrap();
        assert_eq!(
            requests[0].request_line,
            "GET /variation/human/rs1%2F..%2Fx%3Fy%20z HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_lookup_with_unusable_base_url() {
        let client = client_for("not a url");
        assert!(matches!(
            client.lookup("rs7412").await,
            Err(ServiceError::Transport { .. })
        ));
    }

    #[tokio::test]
    async fn test_lookup_without_mappings() {
        let (base, _) = test_server::serve(vec![(200, r#"{"name":"rs1"}"#.to_string())]).await;
        assert!(client_for(&base).lookup("rs1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_predict_posts_region() {
        let body = r#"[{"id":"1_69869_A/G","seq_region_name":"1","start":69869,"most_severe_consequence":"missense_variant"}]"#;
        let (base, captured) = test_server::serve(vec![(200, body.to_string())]).await;

        let results = client_for(&base).predict("1:69869-69869:1/G").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].most_severe_consequence.as_deref(), Some("missense_variant"));

        let requests = captured.lock().unwrap();
        assert_eq!(requests[0].request_line, "POST /vep/human/region HTTP/1.1");
        let sent: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!(sent, serde_json::json!({ "variants": ["1:69869-69869:1/G"] }));
    }

    #[tokio::test]
    async fn test_error_status() {
        let (base, _) = test_server::serve(vec![(400, r#"{"error":"bad region"}"#.to_string())]).await;

        match client_for(&base).predict("1:1-1:1/Z").await {
            Err(ServiceError::Status { status, body, .. }) => {
                assert_eq!(status, 400);
                assert!(body.contains("bad region"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let (base, _) = test_server::serve(vec![(200, "not json".to_string())]).await;
        assert!(matches!(
            client_for(&base).lookup("rs1").await,
            Err(ServiceError::Decode { .. })
        ));
    }
}
