use tracing::{debug, info, warn};

use super::board::JobBoard;
use super::domain::{Confirmation, Job, JobId, ViewerRole};
use super::state::{TransitionError, ViewAction};

/// How a deletion attempt settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionOutcome {
    /// Both remote steps succeeded and the job left the cache.
    Deleted(Job),
    /// The job resource could not be deleted; server and cache are unchanged.
    Failed(Job),
    /// The job is gone upstream but the recruiter still references it. The cache
    /// keeps showing the job until the next activation.
    DetachFailed(Job),
    /// The view was torn down before the sequence settled. Both remote steps still ran
    /// as far as they would have; only the state update was skipped.
    Abandoned,
}

impl JobBoard {
    /// Deletes a job, then detaches it from the viewer's recruiter profile.
    ///
    /// Only one deletion runs at a time; a call made while another is in flight is
    /// rejected with [`TransitionError::DeletionInFlight`]. The steps run strictly in
    /// sequence and the cache changes only when both succeed. Teardown never interrupts
    /// the sequence.
    pub async fn delete_job(&self, id: &JobId) -> Result<DeletionOutcome, TransitionError> {
        self.require_role(ViewerRole::Recruiter)?;
        let state = match self.dispatch(ViewAction::DeletionStarted(id.clone())) {
            Ok(state) => state,
            Err(err) => {
                debug!(job_id = %id, error = %err, "deletion rejected");
                return Err(err);
            }
        };
        let job = state.loaded_job(id)?.clone();
        let recruiter = self.viewer().email.clone();

        if let Err(err) = self.gateway().delete_job(&job.id).await {
            warn!(job_id = %job.id, error = %err, "job deletion failed");
            return self.finish(
                None,
                Confirmation::deletion_failed(),
                DeletionOutcome::Failed(job),
            );
        }

        // Once the job is gone upstream the detach is always attempted, even if the view
        // has been torn down in the meantime.
        match self.gateway().detach_job(&recruiter, &job.id).await {
            Ok(()) => {
                info!(job_id = %job.id, %recruiter, "job deleted");
                self.finish(
                    Some(job.id.clone()),
                    Confirmation::deleted(&job),
                    DeletionOutcome::Deleted(job),
                )
            }
            Err(err) => {
                warn!(
                    job_id = %job.id,
                    %recruiter,
                    error = %err,
                    "job deleted upstream but recruiter detach failed; cached listing is stale"
                );
                self.finish(
                    None,
                    Confirmation::deletion_failed(),
                    DeletionOutcome::DetachFailed(job),
                )
            }
        }
    }

    /// Releases the in-flight guard and records the confirmation.
    fn finish(
        &self,
        removed: Option<JobId>,
        confirmation: Confirmation,
        outcome: DeletionOutcome,
    ) -> Result<DeletionOutcome, TransitionError> {
        let applied = self.settle(ViewAction::DeletionSettled {
            removed,
            confirmation,
        })?;
        Ok(if applied {
            outcome
        } else {
            DeletionOutcome::Abandoned
        })
    }
}
