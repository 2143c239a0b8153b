mod apify;
mod source_error;

use serde_json::Value;

pub use apify::ApifyClient;
pub use source_error::SourceError;

/// Origin of the read-only scraped listings.
pub trait ExternalSource: Send + Sync {
    /// Raw records in the order the upstream returned them.
    fn fetch_raw(&self) -> Result<Vec<Value>, SourceError>;
}
