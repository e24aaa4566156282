use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::domain::{ErrorCategory, PostCollection, RenderState};
use crate::fetcher::retry::{RetryPolicy, RetryScheduler};
use crate::fetcher::{ContentSource, FetchError};
use crate::loader::{DeadlineGuard, DeadlineStatus};
use crate::page::Page;
use crate::render::render_state;

/// Things that can move the page out of its current state.
#[derive(Debug)]
pub enum LoaderEvent {
    DeadlineExpired,
    Fetched(PostCollection),
    Exhausted(FetchError),
}

/// The page right after a render.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub state: RenderState,
    pub elapsed: Duration,
    /// Whether a successful fetch had been delivered when this was rendered.
    pub content_delivered: bool,
    pub page: Page,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: RenderState,
    pub elapsed: Duration,
}

/// Outcome of [`PresentationStateMachine::run`].
#[derive(Debug)]
pub struct LoadReport {
    pub state: RenderState,
    pub transitions: Vec<Transition>,
    pub deadline: DeadlineStatus,
    pub page: Page,
}

/// Owns the page and the "content delivered" flag, and decides what gets
/// rendered when.
///
/// On start the loading placeholder is rendered, the deadline is armed and the
/// retrying fetch begins. The deadline renders the empty fallback only if no
/// content has been delivered; exhaustion renders the error fallback under the
/// same condition. A successful fetch always renders, even after a fallback is
/// already showing, since the deadline never stops the fetch.
pub struct PresentationStateMachine {
    source: Arc<dyn ContentSource + Send + Sync>,
    page: Page,
    retry: RetryPolicy,
    deadline: Duration,
    delivered: bool,
    state: RenderState,
    transitions: Vec<Transition>,
    snapshots: watch::Sender<Snapshot>,
}

impl PresentationStateMachine {
    pub fn new(
        source: Arc<dyn ContentSource + Send + Sync>,
        page: Page,
        retry: RetryPolicy,
        deadline: Duration,
    ) -> Self {
        let (snapshots, _) = watch::channel(Snapshot {
            state: RenderState::Loading,
            elapsed: Duration::ZERO,
            content_delivered: false,
            page: page.clone(),
        });

        Self {
            source,
            page,
            retry,
            deadline,
            delivered: false,
            state: RenderState::Loading,
            transitions: Vec::new(),
            snapshots,
        }
    }

    /// Follow renders while [`run`](Self::run) is in progress.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.subscribe()
    }

    /// Drive the load until the fetch loop succeeds or gives up.
    ///
    /// The deadline firing does not end the run.
    pub async fn run(mut self) -> LoadReport {
        let started = Instant::now();
        self.render(RenderState::Loading, started);

        let (tx, mut rx) = mpsc::unbounded_channel();

        let expire_tx = tx.clone();
        let guard = DeadlineGuard::start(self.deadline, move || {
            let _ = expire_tx.send(LoaderEvent::DeadlineExpired);
        });

        let source = self.source.clone();
        let scheduler = RetryScheduler::new(self.retry);
        info!(
            "Loading posts from {} ({} attempts, deadline {:?})",
            source.describe(),
            scheduler.policy().max_attempts,
            self.deadline
        );
        tokio::spawn(async move {
            let event = match scheduler.run(source.as_ref()).await {
                Ok(posts) => LoaderEvent::Fetched(posts),
                Err(e) => LoaderEvent::Exhausted(e),
            };
            let _ = tx.send(event);
        });

        while let Some(event) = rx.recv().await {
            if self.handle(event, &guard, started) {
                break;
            }
        }

        LoadReport {
            state: self.state,
            transitions: self.transitions,
            deadline: guard.status(),
            page: self.page,
        }
    }

    /// Apply one event. Returns true once the fetch loop has finished.
    fn handle(&mut self, event: LoaderEvent, guard: &DeadlineGuard, started: Instant) -> bool {
        match event {
            LoaderEvent::DeadlineExpired => {
                if self.delivered {
                    debug!("Deadline expired after content was delivered");
                } else {
                    warn!("No content after {:?}, showing fallback", self.deadline);
                    self.render(RenderState::EmptyFallback, started);
                }
                false
            }
            LoaderEvent::Fetched(posts) => {
                self.delivered = true;
                guard.cancel();
                self.render(RenderState::Loaded(posts), started);
                true
            }
            LoaderEvent::Exhausted(e) => {
                guard.cancel();
                if !self.delivered {
                    let message = e.to_string();
                    let category = ErrorCategory::classify(&message);
                    self.render(RenderState::ErrorFallback { category, message }, started);
                }
                true
            }
        }
    }

    fn render(&mut self, state: RenderState, started: Instant) {
        render_state(&mut self.page, &state);

        let elapsed = started.elapsed();
        info!("Rendered {} after {:?}", state, elapsed);

        self.transitions.push(Transition {
            state: state.clone(),
            elapsed,
        });
        self.snapshots.send_replace(Snapshot {
            state: state.clone(),
            elapsed,
            content_delivered: self.delivered,
            page: self.page.clone(),
        });
        self.state = state;
    }
}
