use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::domain::{ViewerProfile, ViewerRole};
use super::filter::FilterDimension;
use super::gateway::JobsGateway;
use super::state::{BoardView, TransitionError, ViewAction, ViewState};

/// One activation of the job listing view.
///
/// Cloning yields another handle onto the same view. All state changes go through
/// [`ViewState::reduce`]. Remote calls always run to completion; once
/// [`JobBoard::teardown`] has ended the view's lifetime their results are dropped instead
/// of applied.
#[derive(Clone)]
pub struct JobBoard {
    inner: Arc<BoardInner>,
}

struct BoardInner {
    gateway: Arc<dyn JobsGateway>,
    viewer: ViewerProfile,
    state: Mutex<ViewState>,
    lifetime: CancellationToken,
}

/// Result of loading the job collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    Loaded { jobs: usize },
    Failed,
    Abandoned,
}

impl JobBoard {
    pub fn new(gateway: Arc<dyn JobsGateway>, viewer: ViewerProfile) -> Self {
        Self::with_lifetime(gateway, viewer, CancellationToken::new())
    }

    /// Binds the view to an externally owned lifetime, e.g. a shutdown token.
    pub fn with_lifetime(
        gateway: Arc<dyn JobsGateway>,
        viewer: ViewerProfile,
        lifetime: CancellationToken,
    ) -> Self {
        Self {
            inner: Arc::new(BoardInner {
                gateway,
                viewer,
                state: Mutex::new(ViewState::default()),
                lifetime,
            }),
        }
    }

    pub fn viewer(&self) -> &ViewerProfile {
        &self.inner.viewer
    }

    pub fn snapshot(&self) -> ViewState {
        self.lock_state().clone()
    }

    /// Runs `render` over the view derived from the current snapshot.
    pub fn with_board<R>(&self, render: impl FnOnce(BoardView<'_>) -> R) -> R {
        let state = self.snapshot();
        render(state.board(&self.inner.viewer.skills))
    }

    /// Fetches the job collection once. Failure is terminal until the next activation.
    pub async fn activate(&self) -> Result<ActivationOutcome, TransitionError> {
        self.dispatch(ViewAction::LoadStarted)?;
        info!(viewer = %self.inner.viewer.email, "loading job collection");

        match self.inner.gateway.fetch_jobs().await {
            Ok(jobs) => {
                let fetched = jobs.len();
                if !self.settle(ViewAction::LoadSucceeded(jobs))? {
                    return Ok(ActivationOutcome::Abandoned);
                }
                let cached = self
                    .snapshot()
                    .cache
                    .ready()
                    .map(|cache| cache.len())
                    .unwrap_or_default();
                info!(fetched, cached, "job collection ready");
                Ok(ActivationOutcome::Loaded { jobs: cached })
            }
            Err(err) => {
                warn!(error = %err, "job collection failed to load");
                if !self.settle(ViewAction::LoadFailed(err.to_string()))? {
                    return Ok(ActivationOutcome::Abandoned);
                }
                Ok(ActivationOutcome::Failed)
            }
        }
    }

    pub fn set_search_term(&self, term: impl Into<String>) -> Result<(), TransitionError> {
        self.dispatch(ViewAction::SearchChanged(term.into()))
            .map(drop)
    }

    pub fn toggle_filter(
        &self,
        dimension: FilterDimension,
        value: impl Into<String>,
    ) -> Result<(), TransitionError> {
        self.dispatch(ViewAction::FilterToggled {
            dimension,
            value: value.into(),
        })
        .map(drop)
    }

    pub fn clear_filters(&self) -> Result<(), TransitionError> {
        self.dispatch(ViewAction::FiltersCleared).map(drop)
    }

    pub fn dismiss_confirmation(&self) -> Result<(), TransitionError> {
        self.dispatch(ViewAction::ConfirmationDismissed).map(drop)
    }

    /// Ends the view's lifetime. Workflows already in flight still finish their remote
    /// calls but resolve as abandoned without touching the state.
    pub fn teardown(&self) {
        if !self.inner.lifetime.is_cancelled() {
            debug!("tearing down job listing view");
        }
        self.inner.lifetime.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.inner.lifetime.is_cancelled()
    }

    pub(crate) fn gateway(&self) -> &dyn JobsGateway {
        self.inner.gateway.as_ref()
    }

    pub(crate) fn require_role(&self, role: ViewerRole) -> Result<(), TransitionError> {
        if self.inner.viewer.role == role {
            Ok(())
        } else {
            Err(TransitionError::RoleNotPermitted {
                required: role.label(),
            })
        }
    }

    /// Applies `action` and returns the resulting snapshot.
    pub(crate) fn dispatch(&self, action: ViewAction) -> Result<ViewState, TransitionError> {
        if self.is_torn_down() {
            return Err(TransitionError::TornDown);
        }
        let mut state = self.lock_state();
        let next = state.reduce(action)?;
        *state = next.clone();
        Ok(next)
    }

    /// Like `dispatch`, but a torn-down view turns the action into a no-op (`Ok(false)`).
    pub(crate) fn settle(&self, action: ViewAction) -> Result<bool, TransitionError> {
        match self.dispatch(action) {
            Ok(_) => Ok(true),
            Err(TransitionError::TornDown) => {
                debug!("ignoring completion for torn-down view");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ViewState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
