// SerpAPI (Google Shopping engine) client
use crate::client::traits::SearchProvider;
use crate::config::AppConfig;
use crate::model::{ClientError, ConfigError};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// The API nests results under different keys depending on the engine and
/// response shape. Strategies are tried in order; first hit wins.
const EXTRACTION_STRATEGIES: [fn(&Value) -> Option<Vec<Value>>; 2] =
    [extract_shopping_results, extract_organic_results];

pub struct SerpApiClient {
    client: Client,
    api_key: String,
    base_url: String,
    country: String,
    language: String,
}

impl SerpApiClient {
    /// Fails with a typed error when no API key is configured, so callers
    /// decide up front whether to run in demo mode instead of discovering a
    /// dead client mid-request.
    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        let api_key = config
            .serpapi_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let client = Client::builder()
            .user_agent("PartsFinder/0.1")
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.clone(),
            country: config.country.clone(),
            language: config.language.clone(),
        })
    }

    /// The upstream query always carries an auto-parts hint unless the user
    /// already typed one.
    fn upstream_query(query: &str) -> String {
        if query.to_lowercase().contains("parts") {
            query.to_string()
        } else {
            format!("{query} auto parts")
        }
    }
}

#[async_trait::async_trait]
impl SearchProvider for SerpApiClient {
    async fn search(&self, query: &str) -> Result<Vec<Value>, ClientError> {
        let q = Self::upstream_query(query);
        info!("Querying SerpAPI: {q}");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("engine", "google_shopping"),
                ("q", q.as_str()),
                ("location", "United States"),
                ("hl", self.language.as_str()),
                ("gl", self.country.as_str()),
                ("num", "20"),
            ])
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }

        // Timeouts can also fire while the body streams in.
        let body: Value = response.json().await.map_err(request_error)?;

        if let Some(message) = body.get("error").and_then(Value::as_str) {
            return Err(ClientError::Api(message.to_string()));
        }

        let items = EXTRACTION_STRATEGIES
            .iter()
            .find_map(|extract| extract(&body))
            .ok_or(ClientError::InvalidResponse)?;

        debug!("Extracted {} raw result(s)", items.len());
        Ok(items)
    }
}

fn request_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::Http(e)
    }
}

fn extract_shopping_results(body: &Value) -> Option<Vec<Value>> {
    body.get("shopping_results")
        .and_then(Value::as_array)
        .map(|a| a.to_vec())
}

/// Fallback for responses that only carry organic results; entries without a
/// usable link field are useless downstream and are filtered out here.
fn extract_organic_results(body: &Value) -> Option<Vec<Value>> {
    body.get("organic_results").and_then(Value::as_array).map(|a| {
        a.iter()
            .filter(|item| {
                ["link", "product_link", "url"]
                    .iter()
                    .any(|f| item.get(*f).and_then(Value::as_str).is_some())
            })
            .cloned()
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_key_fails_construction() {
        let cfg: AppConfig = serde_json::from_str(r#"{"searches": []}"#).unwrap();
        assert!(matches!(
            SerpApiClient::new(&cfg),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn blank_key_fails_construction() {
        let cfg: AppConfig =
            serde_json::from_str(r#"{"serpapi_key": "  ", "searches": []}"#).unwrap();
        assert!(matches!(
            SerpApiClient::new(&cfg),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn parts_hint_is_not_duplicated() {
        assert_eq!(
            SerpApiClient::upstream_query("2018 honda civic brake pads"),
            "2018 honda civic brake pads auto parts"
        );
        assert_eq!(
            SerpApiClient::upstream_query("spark plug Parts kit"),
            "spark plug Parts kit"
        );
    }

    #[tokio::test]
    async fn non_timeout_request_errors_keep_the_http_class() {
        // An invalid URL fails inside reqwest before any I/O happens, which
        // is the one reqwest error constructible without a network.
        let err = Client::new()
            .get("htp://not a url")
            .send()
            .await
            .unwrap_err();
        assert!(!err.is_timeout());
        assert!(matches!(request_error(err), ClientError::Http(_)));
    }

    #[test]
    fn shopping_results_take_priority() {
        let body = json!({
            "shopping_results": [{"title": "a"}],
            "organic_results": [{"title": "b", "link": "https://x.example/"}],
        });
        let items = EXTRACTION_STRATEGIES
            .iter()
            .find_map(|extract| extract(&body))
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "a");
    }

    #[test]
    fn organic_fallback_filters_linkless_entries() {
        let body = json!({
            "organic_results": [
                {"title": "with link", "url": "https://x.example/"},
                {"title": "no link"},
            ],
        });
        let items = EXTRACTION_STRATEGIES
            .iter()
            .find_map(|extract| extract(&body))
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "with link");
    }

    #[test]
    fn unknown_shape_yields_no_strategy_hit() {
        let body = json!({"something_else": []});
        assert!(
            EXTRACTION_STRATEGIES
                .iter()
                .find_map(|extract| extract(&body))
                .is_none()
        );
    }
}
