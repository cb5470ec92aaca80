use crate::model::ClientError;
use serde_json::Value;

#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Runs one search and returns the raw, unvalidated result records.
    async fn search(&self, query: &str) -> Result<Vec<Value>, ClientError>;
}
