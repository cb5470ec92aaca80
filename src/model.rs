// Core structs: SearchRequest, NormalizedProduct, PartCategory
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Optional vehicle scope for a search. Any subset of fields may be absent;
/// empty or whitespace-only strings count as absent.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VehicleInfo {
    /// Accepted as either a string or an integer; integers are stringified
    /// as written, with no locale formatting.
    #[serde(default, deserialize_with = "string_or_int")]
    pub year: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
}

fn string_or_int<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInt {
        Text(String),
        Number(i64),
    }

    let value = Option::<StringOrInt>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        StringOrInt::Text(s) => s,
        StringOrInt::Number(n) => n.to_string(),
    }))
}

impl VehicleInfo {
    pub fn is_empty(&self) -> bool {
        [&self.year, &self.make, &self.model]
            .iter()
            .all(|f| f.as_deref().map(str::trim).unwrap_or("").is_empty())
    }
}

/// One search, built fresh per call and discarded after the response.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub free_text: Option<String>,
    pub vehicle: Option<VehicleInfo>,
    /// Set when the caller supplied an uploaded image that passed the
    /// decodability check. The image is never interpreted further.
    pub has_image: bool,
}

impl SearchRequest {
    /// A request needs at least one of: free text, any vehicle field, or an
    /// uploaded image. Anything less is rejected before the upstream call.
    pub fn has_usable_input(&self) -> bool {
        let no_text = self
            .free_text
            .as_deref()
            .map(str::trim)
            .unwrap_or("")
            .is_empty();
        let no_vehicle = self.vehicle.as_ref().map(|v| v.is_empty()).unwrap_or(true);
        !no_text || !no_vehicle || self.has_image
    }
}

/// Part classification derived from the product title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PartCategory {
    Oem,
    Premium,
    Aftermarket,
}

impl fmt::Display for PartCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartCategory::Oem => write!(f, "OEM"),
            PartCategory::Premium => write!(f, "Premium"),
            PartCategory::Aftermarket => write!(f, "Aftermarket"),
        }
    }
}

/// One validated, display-ready product record.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedProduct {
    pub title: String,
    pub price_display: String,
    pub price_numeric: f64,
    pub source: String,
    /// Absolute http(s) URL. Items without one never reach this type.
    pub link: String,
    pub rating: Option<Value>,
    pub review_count: Option<Value>,
    pub part_category: PartCategory,
    /// True when the record came from the live upstream API, false for
    /// demo/fallback records. The two are never mixed in one list.
    pub verified: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no SerpAPI key configured (set SERPAPI_KEY or serpapi_key in the config file)")]
    MissingApiKey,
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("upstream request timed out")]
    Timeout,
    #[error("upstream reported error: {0}")]
    Api(String),
    #[error("unrecognized response shape, no results array found")]
    InvalidResponse,
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("provide a search term, vehicle info, or an image")]
    InsufficientInput,
    #[error("search service unavailable: {0}")]
    Upstream(#[from] ClientError),
    #[error("no products found for \"{query}\"")]
    NoResults { query: String },
}
