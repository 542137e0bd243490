//! Job listing view: filtering, skill ranking, and the apply/delete workflows that keep
//! the local job cache in step with the remote job service.

mod application;
mod board;
pub mod cache;
mod deletion;
pub mod domain;
pub mod facets;
pub mod filter;
pub mod gateway;
pub mod http;
pub mod rank;
pub mod state;

#[cfg(test)]
mod tests;

pub use application::ApplicationOutcome;
pub use board::{ActivationOutcome, JobBoard};
pub use cache::{CacheState, JobCache};
pub use deletion::DeletionOutcome;
pub use domain::{
    ApplicationForm, ApplicationRequest, Confirmation, ConfirmationTone, Job, JobId,
    ViewerProfile, ViewerRole,
};
pub use facets::FilterFacets;
pub use filter::{filter_jobs, FilterCriteria, FilterDimension};
pub use gateway::{GatewayError, JobsGateway};
pub use http::HttpJobsGateway;
pub use rank::{partition_by_skills, RankedJobs};
pub use state::{
    ApplicationModal, ApplicationModalProps, BoardView, ConfirmationProps, TransitionError,
    ViewAction, ViewState,
};
