//! Runtime configuration for the external services and the pipeline.
//!
//! The CLI fills these from flags and environment variables; library users build them directly.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::utils::validation::MAX_VARIANTS;

/// Default base URL of the identifier lookup and effect prediction service
pub const DEFAULT_ENSEMBL_BASE_URL: &str = "https://rest.ensembl.org";

/// Default JSON key holding the text in automation hook responses
pub const DEFAULT_RESPONSE_KEY: &str = "output";

/// Default automation hook timeout in seconds
pub const DEFAULT_HOOK_TIMEOUT_SECS: u64 = 120;

/// Connection settings for the Ensembl REST service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
    pub species: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ENSEMBL_BASE_URL.to_string(),
            species: "human".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ServiceConfig {
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// `{base}/variation/{species}/{id}`, with `id` percent-encoded as a single path segment.
    ///
    /// Returns `None` if the base URL cannot be parsed or cannot carry a path.
    #[must_use]
    pub fn variation_url(&self, id: &str) -> Option<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url).ok()?;
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend(["variation", self.species.as_str(), id]);
        Some(url)
    }

    /// `{base}/vep/{species}/region`
    #[must_use]
    pub fn region_url(&self) -> String {
        format!("{}/vep/{}/region", self.base_url, self.species)
    }
}

/// Settings for the optional automation webhook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookConfig {
    /// Webhook endpoint; `None` disables the hook
    pub url: Option<String>,
    pub response_key: String,
    pub timeout_secs: u64,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            url: None,
            response_key: DEFAULT_RESPONSE_KEY.to_string(),
            timeout_secs: DEFAULT_HOOK_TIMEOUT_SECS,
        }
    }
}

impl HookConfig {
    /// A configured URL that is not blank
    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// How the annotator treats a failed region query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationFailurePolicy {
    /// The first failure aborts the whole batch
    #[default]
    FailFast,
    /// Failed regions are recorded and the batch continues
    Isolate,
}

/// Pipeline behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    pub failure_policy: AnnotationFailurePolicy,
    pub max_variants: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            failure_policy: AnnotationFailurePolicy::default(),
            max_variants: MAX_VARIANTS,
        }
    }
}
