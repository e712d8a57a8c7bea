pub mod error;
pub mod session;

pub use error::FeedSessionError;
pub use session::{FeedSession, FeedState};

use crate::domain::interaction::RecordInteractionRequest;
use crate::domain::product::{PageRequest, ProductPage};
use async_trait::async_trait;

/// Where a feed session gets its pages from
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> Result<ProductPage, FeedSessionError>;
}

/// Where a feed session sends interaction events
#[async_trait]
pub trait InteractionSink: Send + Sync {
    async fn record(&self, request: RecordInteractionRequest) -> Result<(), FeedSessionError>;
}
