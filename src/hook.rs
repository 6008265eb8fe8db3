//! Optional per-variant automation webhook.
//!
//! The hook receives the numeric part of an identifier as `{"rsid_number": "<digits>"}` and
//! answers with free text. It is best effort: every failure becomes a placeholder message,
//! never an error, so a broken hook cannot abort a batch.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::config::HookConfig;

pub const NO_DIGITS_MESSAGE: &str = "Could not extract a numeric ID from this identifier.";

pub const NOT_CONFIGURED_MESSAGE: &str =
    "Automation hook not configured. Set AUTOMATION_WEBHOOK_URL to enable it.";

pub const CONNECT_FAILED_MESSAGE: &str =
    "Could not connect to the automation hook. Is the workflow active?";

/// First run of digits in `identifier` (`rs12345` → `12345`)
#[must_use]
pub fn extract_number(identifier: &str) -> Option<&str> {
    static DIGITS: OnceLock<Option<Regex>> = OnceLock::new();
    DIGITS
        .get_or_init(|| Regex::new(r"\d+").ok())
        .as_ref()?
        .find(identifier)
        .map(|m| m.as_str())
}

/// Text for a response body: the configured key of an object (or of the first element of an
/// array), falling back to the JSON itself.
#[must_use]
pub fn render_response(data: &JsonValue, key: &str) -> String {
    match data {
        JsonValue::Object(map) => map.get(key).map_or_else(|| data.to_string(), render_value),
        JsonValue::Array(items) => match items.first() {
            Some(first @ JsonValue::Object(map)) => {
                map.get(key).map_or_else(|| first.to_string(), render_value)
            }
            Some(first) => render_value(first),
            None => data.to_string(),
        },
        other => render_value(other),
    }
}

fn render_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Client for the automation webhook
pub struct AutomationHook {
    client: reqwest::Client,
    config: HookConfig,
}

impl AutomationHook {
    /// Build a hook client from `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: HookConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.config.endpoint().is_some()
    }

    /// Run the hook for `identifier`; always returns displayable text
    pub async fn call(&self, identifier: &str) -> String {
        let Some(number) = extract_number(identifier) else {
            return NO_DIGITS_MESSAGE.to_string();
        };
        let Some(url) = self.config.endpoint() else {
            return NOT_CONFIGURED_MESSAGE.to_string();
        };

        debug!(identifier, number, "Calling automation hook");
        match self.post(url, number).await {
            Ok(text) => text,
            Err(e) => {
                warn!(identifier, error = %e, "Automation hook failed");
                self.describe_failure(&e)
            }
        }
    }

    async fn post(&self, url: &str, number: &str) -> Result<String, reqwest::Error> {
        let data: JsonValue = self
            .client
            .post(url)
            .json(&serde_json::json!({ "rsid_number": number }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(render_response(&data, &self.config.response_key))
    }

    fn describe_failure(&self, e: &reqwest::Error) -> String {
        if e.is_timeout() {
            format!(
                "Automation hook timed out after {}s.",
                self.config.timeout_secs
            )
        } else if e.is_connect() {
            CONNECT_FAILED_MESSAGE.to_string()
        } else if let Some(status) = e.status() {
            format!("Automation hook returned an error: HTTP {status}")
        } else {
            format!("Unexpected error calling the automation hook: {e}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_server;
    use serde_json::json;

    fn hook(url: Option<String>, timeout_secs: u64) -> AutomationHook {
        AutomationHook::new(HookConfig {
            url,
            timeout_secs,
            ..HookConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_extract_number() {
        assert_eq!(extract_number("rs12345"), Some("12345"));
        assert_eq!(extract_number("RS429358"), Some("429358"));
        assert_eq!(extract_number("12345"), Some("12345"));
        assert_eq!(extract_number("rs12;rs34"), Some("12"));
        assert_eq!(extract_number("rsX"), None);
    }

    #[test]
    fn test_render_response_shapes() {
        assert_eq!(render_response(&json!({"output": "done"}), "output"), "done");
        assert_eq!(render_response(&json!([{"output": "first"}, {"output": "second"}]), "output"), "first");
        assert_eq!(render_response(&json!({"result": 1}), "output"), r#"{"result":1}"#);
        assert_eq!(render_response(&json!(["plain"]), "output"), "plain");
        assert_eq!(render_response(&json!([]), "output"), "[]");
        assert_eq!(render_response(&json!(42), "output"), "42");
        assert_eq!(render_response(&json!({"output": {"n": 2}}), "output"), r#"{"n":2}"#);
    }

    #[tokio::test]
    async fn test_placeholders_without_request() {
        assert_eq!(hook(None, 5).call("rs1").await, NOT_CONFIGURED_MESSAGE);
        assert_eq!(
            hook(Some("http://127.0.0.1:9".to_string()), 5).call("rsX").await,
            NO_DIGITS_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_successful_call_sends_number() {
        let (base, captured) =
            test_server::serve(vec![(200, r#"{"output": "Gene summary"}"#.to_string())]).await;

        let text = hook(Some(format!("{base}/webhook")), 5).call("rs7412").await;
        assert_eq!(text, "Gene summary");

        let requests = captured.lock().unwrap();
        assert_eq!(requests[0].request_line, "POST /webhook HTTP/1.1");
        let body: JsonValue = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!(body, json!({"rsid_number": "7412"}));
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let (base, _) = test_server::serve(vec![(500, "{}".to_string())]).await;
        let text = hook(Some(base), 5).call("rs1").await;
        assert!(text.starts_with("Automation hook returned an error: HTTP 500"), "{text}");
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let url = test_server::closed_url().await;
        assert_eq!(hook(Some(url), 5).call("rs1").await, CONNECT_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_timeout() {
        let url = test_server::serve_silent().await;
        assert_eq!(
            hook(Some(url), 1).call("rs1").await,
            "Automation hook timed out after 1s."
        );
    }
}
