//! Explicit view-state record and its transition function.
//!
//! Every change to what the listing view shows goes through [`ViewState::reduce`], which
//! returns a new record and leaves the receiver untouched. Network effects live in the
//! workflow layer; this module only decides which transitions are legal.

use std::collections::BTreeSet;

use super::cache::{CacheState, JobCache};
use super::domain::{Confirmation, Job, JobId};
use super::facets::FilterFacets;
use super::filter::{filter_jobs, FilterCriteria, FilterDimension};
use super::rank::{partition_by_skills, RankedJobs};

/// `Closed → Open(job) → Submitting(job) → Closed`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ApplicationModal {
    #[default]
    Closed,
    Open(Job),
    Submitting(Job),
}

impl ApplicationModal {
    pub fn job(&self) -> Option<&Job> {
        match self {
            Self::Closed => None,
            Self::Open(job) | Self::Submitting(job) => Some(job),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub cache: CacheState,
    pub criteria: FilterCriteria,
    pub application: ApplicationModal,
    pub confirmation: Option<Confirmation>,
    pub deletion_in_flight: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    LoadStarted,
    LoadSucceeded(Vec<Job>),
    LoadFailed(String),
    SearchChanged(String),
    FilterToggled {
        dimension: FilterDimension,
        value: String,
    },
    FiltersCleared,
    ApplicationOpened(JobId),
    ApplicationClosed,
    ApplicationSubmitted,
    ApplicationSettled(Confirmation),
    DeletionStarted(JobId),
    DeletionSettled {
        removed: Option<JobId>,
        confirmation: Confirmation,
    },
    ConfirmationDismissed,
}

/// A transition the current state does not allow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("job collection is already loading")]
    AlreadyLoading,
    #[error("no job collection load is pending")]
    NotLoading,
    #[error("job collection is not loaded")]
    CacheNotReady,
    #[error("job {0} is not in the loaded collection")]
    UnknownJob(JobId),
    #[error("an application is already open")]
    ApplicationBusy,
    #[error("no application is open")]
    NoApplicationOpen,
    #[error("the application is already being submitted")]
    SubmissionInProgress,
    #[error("no application submission is pending")]
    NoSubmissionPending,
    #[error("another deletion is in progress")]
    DeletionInFlight,
    #[error("no deletion is pending")]
    NoDeletionPending,
    #[error("only a {required} may perform this action")]
    RoleNotPermitted { required: &'static str },
    #[error("the view has been torn down")]
    TornDown,
}

impl ViewState {
    pub fn reduce(&self, action: ViewAction) -> Result<Self, TransitionError> {
        let mut next = self.clone();

        match action {
            ViewAction::LoadStarted => {
                if matches!(self.cache, CacheState::Loading) {
                    return Err(TransitionError::AlreadyLoading);
                }
                // A refetch could be served before the pending delete and revive the job.
                if self.deletion_in_flight {
                    return Err(TransitionError::DeletionInFlight);
                }
                next.cache = CacheState::Loading;
            }
            ViewAction::LoadSucceeded(jobs) => {
                self.expect_loading()?;
                next.cache = CacheState::Ready(JobCache::from_fetched(jobs));
            }
            ViewAction::LoadFailed(reason) => {
                self.expect_loading()?;
                next.cache = CacheState::Error(reason);
            }
            ViewAction::SearchChanged(term) => next.criteria.search_term = term,
            ViewAction::FilterToggled { dimension, value } => {
                next.criteria.toggle(dimension, &value);
            }
            ViewAction::FiltersCleared => next.criteria = FilterCriteria::default(),
            ViewAction::ApplicationOpened(id) => {
                if self.application != ApplicationModal::Closed {
                    return Err(TransitionError::ApplicationBusy);
                }
                let job = self.loaded_job(&id)?;
                next.application = ApplicationModal::Open(job.clone());
            }
            ViewAction::ApplicationClosed => match &self.application {
                ApplicationModal::Submitting(_) => {
                    return Err(TransitionError::SubmissionInProgress)
                }
                _ => next.application = ApplicationModal::Closed,
            },
            ViewAction::ApplicationSubmitted => match &self.application {
                ApplicationModal::Open(job) => {
                    next.application = ApplicationModal::Submitting(job.clone());
                }
                ApplicationModal::Submitting(_) => {
                    return Err(TransitionError::SubmissionInProgress)
                }
                ApplicationModal::Closed => return Err(TransitionError::NoApplicationOpen),
            },
            ViewAction::ApplicationSettled(confirmation) => {
                if !matches!(self.application, ApplicationModal::Submitting(_)) {
                    return Err(TransitionError::NoSubmissionPending);
                }
                next.application = ApplicationModal::Closed;
                next.confirmation = Some(confirmation);
            }
            ViewAction::DeletionStarted(id) => {
                if self.deletion_in_flight {
                    return Err(TransitionError::DeletionInFlight);
                }
                self.loaded_job(&id)?;
                next.deletion_in_flight = true;
            }
            ViewAction::DeletionSettled {
                removed,
                confirmation,
            } => {
                if !self.deletion_in_flight {
                    return Err(TransitionError::NoDeletionPending);
                }
                next.deletion_in_flight = false;
                next.confirmation = Some(confirmation);
                if let (Some(id), CacheState::Ready(cache)) = (removed, &self.cache) {
                    next.cache = CacheState::Ready(cache.without(&id));
                }
            }
            ViewAction::ConfirmationDismissed => next.confirmation = None,
        }

        Ok(next)
    }

    fn expect_loading(&self) -> Result<(), TransitionError> {
        match self.cache {
            CacheState::Loading => Ok(()),
            _ => Err(TransitionError::NotLoading),
        }
    }

    /// Looks a job up in the ready cache.
    pub fn loaded_job(&self, id: &JobId) -> Result<&Job, TransitionError> {
        self.cache
            .ready()
            .ok_or(TransitionError::CacheNotReady)?
            .get(id)
            .ok_or_else(|| TransitionError::UnknownJob(id.clone()))
    }

    /// Derives what the listing shows for a viewer with `viewer_skills`.
    pub fn board(&self, viewer_skills: &BTreeSet<String>) -> BoardView<'_> {
        match &self.cache {
            CacheState::Idle => BoardView::Idle,
            CacheState::Loading => BoardView::Loading,
            CacheState::Error(reason) => BoardView::Unavailable(reason),
            CacheState::Ready(cache) => {
                let filtered = filter_jobs(cache.jobs(), &self.criteria);
                if filtered.is_empty() {
                    BoardView::NoMatches
                } else {
                    BoardView::Ranked(partition_by_skills(filtered, viewer_skills))
                }
            }
        }
    }

    pub fn facets(&self) -> Option<FilterFacets> {
        self.cache
            .ready()
            .map(|cache| FilterFacets::collect(cache.jobs()))
    }

    pub fn application_props(&self) -> ApplicationModalProps<'_> {
        ApplicationModalProps {
            is_open: self.application != ApplicationModal::Closed,
            job: self.application.job(),
            submitting: matches!(self.application, ApplicationModal::Submitting(_)),
        }
    }

    pub fn confirmation_props(&self) -> ConfirmationProps<'_> {
        ConfirmationProps {
            is_open: self.confirmation.is_some(),
            message: self
                .confirmation
                .as_ref()
                .map(|confirmation| confirmation.message.as_str())
                .unwrap_or_default(),
        }
    }
}

/// What the listing presents for the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardView<'a> {
    Idle,
    Loading,
    Unavailable(&'a str),
    NoMatches,
    Ranked(RankedJobs<'a>),
}

/// State handed to the application modal; `onSubmit`/`onClose` are the board's workflow methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplicationModalProps<'a> {
    pub is_open: bool,
    pub job: Option<&'a Job>,
    pub submitting: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationProps<'a> {
    pub is_open: bool,
    pub message: &'a str,
}
