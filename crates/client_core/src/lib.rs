use std::sync::Arc;

use shared::{
    domain::{Page, SearchType},
    protocol::{RecommendationRequest, RecommendationResult},
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info};

pub mod transport;

pub use transport::{
    BackendError, HttpRecommendationBackend, RecommendationBackend, NETWORK_FAILURE_MESSAGE,
};

/// Validation failure shown when a submission carries no usable query.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search term";

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Lifecycle of one search submission. Exactly one case holds at any
/// time; `SearchSession` is the sole mutator.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Validating,
    Loading,
    Success(RecommendationResult),
    Failed(String),
}

struct SessionState {
    query: String,
    search_type: SearchType,
    state: SearchState,
    request_seq: u64,
}

/// Owns the search form fields and drives the request lifecycle against
/// the recommendation service. Each session is independent; state is
/// published over a broadcast channel for the presentation layer.
pub struct SearchSession {
    backend: Arc<dyn RecommendationBackend>,
    inner: Mutex<SessionState>,
    states: broadcast::Sender<SearchState>,
}

impl SearchSession {
    pub fn new(backend: Arc<dyn RecommendationBackend>) -> Arc<Self> {
        let (states, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            backend,
            inner: Mutex::new(SessionState {
                query: String::new(),
                search_type: SearchType::default(),
                state: SearchState::Idle,
                request_seq: 0,
            }),
            states,
        })
    }

    /// Allowed in any state; takes effect on the next submission and
    /// never disturbs an in-flight request or a displayed result.
    pub async fn set_search_type(&self, search_type: SearchType) {
        self.inner.lock().await.search_type = search_type;
    }

    /// Replaces the raw query text wholesale; allowed in any state.
    pub async fn set_query(&self, text: impl Into<String>) {
        self.inner.lock().await.query = text.into();
    }

    pub async fn current_state(&self) -> SearchState {
        self.inner.lock().await.state.clone()
    }

    /// Every state transition is published here, in order.
    pub fn subscribe(&self) -> broadcast::Receiver<SearchState> {
        self.states.subscribe()
    }

    /// Validates the current query and, if non-empty after trimming,
    /// issues exactly one request to the recommendation service. A
    /// submission made while an earlier one is in flight supersedes it:
    /// only the most recently issued request may apply its outcome.
    pub async fn submit(self: &Arc<Self>) {
        let (request, seq) = {
            let mut guard = self.inner.lock().await;
            self.transition(&mut guard, SearchState::Validating);

            let query = guard.query.trim().to_string();
            if query.is_empty() {
                self.transition(
                    &mut guard,
                    SearchState::Failed(EMPTY_QUERY_MESSAGE.to_string()),
                );
                return;
            }

            guard.request_seq += 1;
            let seq = guard.request_seq;
            // Clears any prior result or error before the response
            // arrives, so the UI shows a loading indicator rather than
            // stale content.
            self.transition(&mut guard, SearchState::Loading);
            (
                RecommendationRequest {
                    query,
                    search_type: guard.search_type,
                },
                seq,
            )
        };

        info!(seq, search_type = ?request.search_type, "search: request issued");
        let session = Arc::clone(self);
        tokio::spawn(async move {
            let outcome = session.backend.recommend(&request).await;
            session.apply_completion(seq, outcome).await;
        });
    }

    async fn apply_completion(
        &self,
        seq: u64,
        outcome: Result<RecommendationResult, BackendError>,
    ) {
        let mut guard = self.inner.lock().await;
        if guard.request_seq != seq {
            debug!(
                seq,
                latest = guard.request_seq,
                "search: stale response discarded"
            );
            return;
        }

        let next = match outcome {
            Ok(result) => SearchState::Success(result),
            Err(err) => {
                info!(seq, error = %err, "search: request failed");
                SearchState::Failed(err.user_message())
            }
        };
        self.transition(&mut guard, next);
    }

    fn transition(&self, guard: &mut SessionState, next: SearchState) {
        guard.state = next.clone();
        let _ = self.states.send(next);
    }
}

/// Whether the frontend exposes the full four-page navigation or the
/// reduced single-page variant that renders only the recommend form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationMode {
    #[default]
    MultiPage,
    SingleRecommend,
}

/// Holds which page is currently displayed. No persistence beyond the
/// session, no coupling to `SearchSession`.
pub struct ViewController {
    mode: NavigationMode,
    page: Mutex<Page>,
    pages: broadcast::Sender<Page>,
}

impl ViewController {
    pub fn new() -> Self {
        Self::with_mode(NavigationMode::MultiPage)
    }

    /// The single-page variant starts on (and stays pinned to) the
    /// recommend page; `navigate` still succeeds but changes nothing.
    pub fn single_page() -> Self {
        Self::with_mode(NavigationMode::SingleRecommend)
    }

    pub fn with_mode(mode: NavigationMode) -> Self {
        let (pages, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let initial = match mode {
            NavigationMode::MultiPage => Page::Home,
            NavigationMode::SingleRecommend => Page::Recommend,
        };
        Self {
            mode,
            page: Mutex::new(initial),
            pages,
        }
    }

    /// Always succeeds. Navigating to the already-active page is
    /// idempotent and publishes nothing.
    pub async fn navigate(&self, page: Page) {
        if self.mode == NavigationMode::SingleRecommend {
            return;
        }
        let mut guard = self.page.lock().await;
        if *guard == page {
            return;
        }
        *guard = page;
        let _ = self.pages.send(page);
    }

    pub async fn current_page(&self) -> Page {
        *self.page.lock().await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Page> {
        self.pages.subscribe()
    }
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
