use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::workflows::listings::domain::{
    ApplicationRequest, Job, JobId, ViewerProfile, ViewerRole,
};
use crate::workflows::listings::gateway::{GatewayError, JobsGateway};
use crate::workflows::listings::{ActivationOutcome, JobBoard};

pub(super) const RECRUITER_EMAIL: &str = "recruiter@acme.test";
pub(super) const CANDIDATE_EMAIL: &str = "candidate@example.test";

pub(super) fn job(id: &str, position: &str, company: &str, skills: &[&str]) -> Job {
    Job {
        id: JobId::from(id),
        position: position.to_string(),
        company: company.to_string(),
        location: "Berlin".to_string(),
        experience: "2+ years".to_string(),
        description: format!("{position} opening"),
        skills: skills.iter().map(|s| s.to_string()).collect(),
    }
}

pub(super) fn catalog() -> Vec<Job> {
    vec![
        job("a", "Platform Engineer", "Acme", &["Go"]),
        job("b", "Rust Developer", "Globex", &["Go", "Rust"]),
        job("c", "Data Engineer", "Initech", &["Rust", "SQL"]),
    ]
}

pub(super) fn recruiter() -> ViewerProfile {
    ViewerProfile::new(RECRUITER_EMAIL, ViewerRole::Recruiter, Vec::<String>::new())
}

pub(super) fn candidate(skills: &[&str]) -> ViewerProfile {
    ViewerProfile::new(CANDIDATE_EMAIL, ViewerRole::Candidate, skills.iter().copied())
}

/// Remote call observed by the stub, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Call {
    Fetch,
    Apply(ApplicationRequest),
    Delete(JobId),
    Detach(String, JobId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Op {
    Fetch,
    Apply,
    Delete,
    Detach,
}

/// Holds one operation mid-flight until the test releases it.
#[derive(Default)]
pub(super) struct Gate {
    entered: Notify,
    release: Notify,
}

impl Gate {
    pub(super) async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    pub(super) fn release(&self) {
        self.release.notify_one();
    }
}

#[derive(Default)]
pub(super) struct StubGateway {
    jobs: Vec<Job>,
    failing: Vec<Op>,
    gate: Option<(Op, Arc<Gate>)>,
    calls: Mutex<Vec<Call>>,
    completed: Mutex<Vec<Op>>,
}

impl StubGateway {
    pub(super) fn with_jobs(jobs: Vec<Job>) -> Self {
        Self {
            jobs,
            ..Self::default()
        }
    }

    pub(super) fn failing(mut self, op: Op) -> Self {
        self.failing.push(op);
        self
    }

    pub(super) fn gated(mut self, op: Op) -> (Self, Arc<Gate>) {
        let gate = Arc::new(Gate::default());
        self.gate = Some((op, gate.clone()));
        (self, gate)
    }

    pub(super) fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    /// Operations whose call ran to the end, in completion order.
    pub(super) fn completed(&self) -> Vec<Op> {
        self.completed.lock().expect("completed mutex poisoned").clone()
    }

    async fn enter(&self, op: Op, call: Call) -> Result<(), GatewayError> {
        self.calls.lock().expect("calls mutex poisoned").push(call);

        if let Some((gated, gate)) = &self.gate {
            if *gated == op {
                gate.entered.notify_one();
                gate.release.notified().await;
            }
        }
        self.completed
            .lock()
            .expect("completed mutex poisoned")
            .push(op);

        if self.failing.contains(&op) {
            return Err(GatewayError::UnexpectedStatus {
                path: format!("{op:?}"),
                status: 500,
                expected: 200,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl JobsGateway for StubGateway {
    async fn fetch_jobs(&self) -> Result<Vec<Job>, GatewayError> {
        self.enter(Op::Fetch, Call::Fetch).await?;
        Ok(self.jobs.clone())
    }

    async fn submit_application(&self, request: &ApplicationRequest) -> Result<(), GatewayError> {
        self.enter(Op::Apply, Call::Apply(request.clone())).await
    }

    async fn delete_job(&self, id: &JobId) -> Result<(), GatewayError> {
        self.enter(Op::Delete, Call::Delete(id.clone())).await
    }

    async fn detach_job(&self, recruiter_email: &str, id: &JobId) -> Result<(), GatewayError> {
        self.enter(
            Op::Detach,
            Call::Detach(recruiter_email.to_string(), id.clone()),
        )
        .await
    }
}

/// Builds a board over `gateway` and loads the catalog.
pub(super) async fn loaded_board(gateway: Arc<StubGateway>, viewer: ViewerProfile) -> JobBoard {
    let board = JobBoard::new(gateway, viewer);
    let outcome = board.activate().await.expect("activation accepted");
    assert!(matches!(outcome, ActivationOutcome::Loaded { .. }));
    board
}

pub(super) fn cached_ids(board: &JobBoard) -> Vec<String> {
    board
        .snapshot()
        .cache
        .ready()
        .expect("cache is ready")
        .jobs()
        .iter()
        .map(|job| job.id.0.clone())
        .collect()
}
