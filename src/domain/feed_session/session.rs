use super::{FeedSessionError, FeedSource, InteractionSink};
use crate::domain::interaction::{InteractionAction, RecordInteractionRequest};
use crate::domain::product::{Experience, PageRequest, ProductPage};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinHandle;
use uuid::Uuid;

const DEFAULT_BATCH_SIZE: i64 = 5;
const DEFAULT_PREFETCH_THRESHOLD: usize = 2;

/// Lifecycle of a feed session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    /// First page in flight
    Loading,
    /// Products loaded, more may follow
    Ready,
    /// A follow-up page is in flight
    LoadingMore,
    /// Every product has been loaded
    Exhausted,
    /// The last load failed; `retry` re-issues it
    Failed,
}

/// One browsing session over the product feed.
///
/// Keeps the loaded products in order, the set of identifiers already shown and
/// the current position. Identifiers are never shown twice within a session:
/// pages are requested with the seen set as exclusion list, and anything that
/// still comes back twice is dropped on merge.
pub struct FeedSession {
    source: Arc<dyn FeedSource>,
    sink: Arc<dyn InteractionSink>,
    batch_size: i64,
    prefetch_threshold: usize,
    user_id: Option<Uuid>,
    target: Option<String>,
    products: Vec<Experience>,
    seen: HashSet<Uuid>,
    position: usize,
    has_more: bool,
    state: FeedState,
    last_error: Option<FeedSessionError>,
}

impl FeedSession {
    pub fn new(source: Arc<dyn FeedSource>, sink: Arc<dyn InteractionSink>) -> Self {
        Self {
            source,
            sink,
            batch_size: DEFAULT_BATCH_SIZE,
            prefetch_threshold: DEFAULT_PREFETCH_THRESHOLD,
            user_id: None,
            target: None,
            products: Vec::new(),
            seen: HashSet::new(),
            position: 0,
            has_more: true,
            state: FeedState::Loading,
            last_error: None,
        }
    }

    pub fn with_batch_size(mut self, batch_size: i64) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Load more once the position is this close to the end of the loaded list
    pub fn with_prefetch_threshold(mut self, threshold: usize) -> Self {
        self.prefetch_threshold = threshold;
        self
    }

    /// Attribute recorded interactions to a signed-in user
    pub fn with_user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Load the first page, optionally jumping to a product `uid` or `id`.
    /// Any previous session state is discarded.
    pub async fn start(&mut self, target: Option<String>) -> Result<(), FeedSessionError> {
        self.products.clear();
        self.seen.clear();
        self.position = 0;
        self.has_more = true;
        self.target = target;
        self.state = FeedState::Loading;

        let request = PageRequest {
            exclude: Vec::new(),
            limit: Some(self.batch_size),
            target: self.target.clone(),
        };
        self.fetch(request).await.map(|_| ())
    }

    /// Fetch the next page. Returns how many new products were appended.
    ///
    /// Does nothing when the feed is exhausted or a load is already in flight.
    pub async fn load_more(&mut self) -> Result<usize, FeedSessionError> {
        if !self.has_more || matches!(self.state, FeedState::Loading | FeedState::LoadingMore) {
            return Ok(0);
        }
        self.state = FeedState::LoadingMore;

        let request = PageRequest {
            exclude: self.products.iter().map(|p| p.id).collect(),
            limit: Some(self.batch_size),
            target: None,
        };
        self.fetch(request).await
    }

    /// Re-issue the load that failed last
    pub async fn retry(&mut self) -> Result<(), FeedSessionError> {
        if self.state != FeedState::Failed {
            return Ok(());
        }
        if self.products.is_empty() {
            self.start(self.target.clone()).await
        } else {
            self.state = FeedState::Ready;
            self.load_more().await.map(|_| ())
        }
    }

    /// Move to the next product, loading more when the end is near.
    ///
    /// Errors only when the session sits on its last product and the page that
    /// would let it move on cannot be loaded. Prefetch failures leave the
    /// session in `Failed` without interrupting navigation.
    pub async fn next(&mut self) -> Result<Option<&Experience>, FeedSessionError> {
        if self.position + 1 >= self.products.len() {
            self.load_more().await?;
        }
        if self.position + 1 < self.products.len() {
            self.position += 1;
        }

        if self.is_near_end() {
            if let Err(err) = self.load_more().await {
                tracing::warn!(error = %err, "Prefetching the next page failed");
            }
        }

        Ok(self.current())
    }

    /// Move to the previous product; stays put on the first one
    pub fn previous(&mut self) -> Option<&Experience> {
        self.position = self.position.saturating_sub(1);
        self.current()
    }

    /// Record an interaction with the current product without waiting for it.
    ///
    /// Failures are logged and never reach the caller. The handle is returned
    /// for callers that want to observe completion; dropping it is fine.
    pub fn record(&self, action: InteractionAction) -> Option<JoinHandle<()>> {
        let product = self.current()?;
        let mut request = RecordInteractionRequest::for_action(product.id, &action);
        request.user_id = self.user_id.map(|id| id.to_string());

        let sink = self.sink.clone();
        let product_id = product.id;
        Some(tokio::spawn(async move {
            if let Err(err) = sink.record(request).await {
                tracing::warn!(
                    product_id = %product_id,
                    action = %action,
                    error = %err,
                    "Failed to record interaction"
                );
            }
        }))
    }

    pub fn current(&self) -> Option<&Experience> {
        self.products.get(self.position)
    }

    pub fn products(&self) -> &[Experience] {
        &self.products
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn state(&self) -> FeedState {
        self.state
    }

    pub fn last_error(&self) -> Option<&FeedSessionError> {
        self.last_error.as_ref()
    }

    fn is_near_end(&self) -> bool {
        self.has_more && self.position + self.prefetch_threshold >= self.products.len()
    }

    async fn fetch(&mut self, request: PageRequest) -> Result<usize, FeedSessionError> {
        match self.source.fetch_page(&request).await {
            Ok(page) => Ok(self.merge(page)),
            Err(err) => {
                tracing::warn!(error = %err, loaded = self.products.len(), "Feed page failed to load");
                self.state = FeedState::Failed;
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    fn merge(&mut self, page: ProductPage) -> usize {
        let before = self.products.len();
        for experience in page.experiences {
            if self.seen.insert(experience.id) {
                self.products.push(experience);
            }
        }
        let added = self.products.len() - before;

        self.has_more = page.has_more;
        self.last_error = None;
        self.state = if self.has_more {
            FeedState::Ready
        } else {
            FeedState::Exhausted
        };

        tracing::debug!(added, total = self.products.len(), has_more = self.has_more, "Feed page merged");
        added
    }
}
