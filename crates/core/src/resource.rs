//! ResourceStore trait — uri-addressed reference data.
//!
//! Reasoning steps and tools sometimes need structured reference data:
//! the course catalog, a student's profile, past course records. A
//! `ResourceStore` resolves a uri like `courses://catalog` or
//! `student://42/profile` into structured content. Absence is a normal
//! outcome (`Ok(None)`), not a fault.

use crate::error::ResourceError;
use async_trait::async_trait;

/// The core resource-lookup trait.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// A human-readable name for this store.
    fn name(&self) -> &str;

    /// Resolve a uri into structured content, or `None` if nothing is
    /// stored under it.
    async fn read(
        &self,
        uri: &str,
    ) -> std::result::Result<Option<serde_json::Value>, ResourceError>;
}
