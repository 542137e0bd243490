use tracing::{info, warn};

use super::board::JobBoard;
use super::domain::{ApplicationForm, ApplicationRequest, Confirmation, Job, JobId, ViewerRole};
use super::state::{TransitionError, ViewAction};

/// How a submitted application settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationOutcome {
    Submitted(Job),
    Failed(Job),
    /// The view was torn down before the call settled. The request still went out but
    /// its result was not recorded.
    Abandoned,
}

impl JobBoard {
    /// Opens the application modal for a loaded job. Candidates only.
    pub fn open_application(&self, id: &JobId) -> Result<(), TransitionError> {
        self.require_role(ViewerRole::Candidate)?;
        self.dispatch(ViewAction::ApplicationOpened(id.clone()))
            .map(drop)
    }

    pub fn close_application(&self) -> Result<(), TransitionError> {
        self.dispatch(ViewAction::ApplicationClosed).map(drop)
    }

    /// Sends the open application with the viewer as candidate.
    ///
    /// Both outcomes close the modal and raise a confirmation; the job cache is never
    /// touched. A second submit while the first is pending is rejected.
    pub async fn submit_application(
        &self,
        form: ApplicationForm,
    ) -> Result<ApplicationOutcome, TransitionError> {
        let state = self.dispatch(ViewAction::ApplicationSubmitted)?;
        let job = state
            .application
            .job()
            .cloned()
            .ok_or(TransitionError::NoApplicationOpen)?;
        let request = ApplicationRequest::compose(&job, &self.viewer().email, form);

        let (confirmation, outcome) = match self.gateway().submit_application(&request).await {
            Ok(()) => {
                info!(job_id = %job.id, "application submitted");
                (Confirmation::applied(&job), ApplicationOutcome::Submitted(job))
            }
            Err(err) => {
                warn!(job_id = %job.id, error = %err, "application submission failed");
                (
                    Confirmation::application_failed(),
                    ApplicationOutcome::Failed(job),
                )
            }
        };

        if !self.settle(ViewAction::ApplicationSettled(confirmation))? {
            return Ok(ApplicationOutcome::Abandoned);
        }
        Ok(outcome)
    }
}
