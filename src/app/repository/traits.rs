use async_trait::async_trait;

pub use crate::app::errors::{SourceError, SourceResult};

/// Anything that can return the struct dump stored under a mapping key.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Returns `Ok(None)` when the key is not present in the mapping.
    async fn fetch(&self, mapping: &str, key: &str) -> SourceResult<Option<String>>;
}
