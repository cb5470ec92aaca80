// Search orchestration: validate, build query, fetch, normalize.
use crate::client::SearchProvider;
use crate::model::{NormalizedProduct, SearchError, SearchRequest};
use crate::normalizer::normalize_results;
use crate::query::build_search_query;
use tracing::info;

/// Query used for image-only requests. The image itself is never
/// interpreted, so the search falls back to the generic term.
const IMAGE_FALLBACK_QUERY: &str = "auto parts";

pub struct PartsFinder {
    provider: Box<dyn SearchProvider>,
    max_results: usize,
}

impl PartsFinder {
    pub fn new(provider: Box<dyn SearchProvider>, max_results: usize) -> Self {
        Self {
            provider,
            max_results,
        }
    }

    /// Runs one search end to end. Errors keep their class: insufficient
    /// input never reaches the network, upstream failures stay distinct from
    /// an empty-but-successful result set.
    pub async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<NormalizedProduct>, SearchError> {
        if !request.has_usable_input() {
            return Err(SearchError::InsufficientInput);
        }

        let query =
            match build_search_query(request.free_text.as_deref(), request.vehicle.as_ref()) {
                Some(query) => query,
                None if request.has_image => IMAGE_FALLBACK_QUERY.to_string(),
                None => return Err(SearchError::InsufficientInput),
            };

        let raw_items = self.provider.search(&query).await?;
        let products = normalize_results(&raw_items, self.max_results);

        if products.is_empty() {
            return Err(SearchError::NoResults { query });
        }

        info!("Normalized {} product(s) for \"{query}\"", products.len());
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClientError, VehicleInfo};
    use serde_json::{Value, json};

    struct FakeProvider {
        response: Result<Vec<Value>, ClientError>,
    }

    #[async_trait::async_trait]
    impl SearchProvider for FakeProvider {
        async fn search(&self, _query: &str) -> Result<Vec<Value>, ClientError> {
            match &self.response {
                Ok(items) => Ok(items.clone()),
                Err(_) => Err(ClientError::Api("boom".into())),
            }
        }
    }

    fn finder_with(response: Result<Vec<Value>, ClientError>) -> PartsFinder {
        PartsFinder::new(Box::new(FakeProvider { response }), 12)
    }

    fn text_request(text: &str) -> SearchRequest {
        SearchRequest {
            free_text: Some(text.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn empty_request_fails_before_the_network() {
        let finder = finder_with(Err(ClientError::Api("must not be called".into())));
        let err = finder.search(&SearchRequest::default()).await.unwrap_err();
        assert!(matches!(err, SearchError::InsufficientInput));
    }

    #[tokio::test]
    async fn upstream_failure_keeps_its_error_class() {
        let finder = finder_with(Err(ClientError::Api("quota".into())));
        let err = finder.search(&text_request("brake pads")).await.unwrap_err();
        assert!(matches!(err, SearchError::Upstream(_)));
    }

    #[tokio::test]
    async fn zero_survivors_is_no_results_not_upstream() {
        // upstream succeeded but every item is malformed
        let finder = finder_with(Ok(vec![json!({"title": "pad", "link": "#"})]));
        let err = finder.search(&text_request("brake pads")).await.unwrap_err();
        assert!(matches!(err, SearchError::NoResults { .. }));
    }

    #[tokio::test]
    async fn image_only_request_searches_the_generic_term() {
        let finder = finder_with(Ok(vec![json!({
            "title": "Universal Part",
            "price": "$5.00",
            "link": "https://store.example/p/9",
        })]));
        let request = SearchRequest {
            has_image: true,
            ..Default::default()
        };
        assert!(finder.search(&request).await.is_ok());
    }

    #[tokio::test]
    async fn vehicle_scope_flows_into_the_query() {
        let finder = finder_with(Ok(vec![json!({
            "title": "Civic Brake Pads",
            "price": "$29.99",
            "link": "https://store.example/p/1",
        })]));
        let request = SearchRequest {
            free_text: Some("brake pads".into()),
            vehicle: Some(VehicleInfo {
                year: Some("2018".into()),
                make: Some("Honda".into()),
                model: Some("Civic".into()),
            }),
            has_image: false,
        };
        let products = finder.search(&request).await.unwrap();
        assert_eq!(products.len(), 1);
        assert!(products[0].verified);
    }
}
