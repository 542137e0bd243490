//! Drives `JobBoard` through the crate's public API over an in-memory job service.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use job_board::workflows::listings::{
    ActivationOutcome, ApplicationForm, ApplicationOutcome, ApplicationRequest, BoardView,
    DeletionOutcome, FilterDimension, GatewayError, Job, JobBoard, JobId, JobsGateway,
    ViewerProfile, ViewerRole,
};

#[derive(Default)]
struct MemoryJobService {
    jobs: Mutex<Vec<Job>>,
    detached: Mutex<Vec<(String, JobId)>>,
    applications: Mutex<Vec<ApplicationRequest>>,
    hold_delete: Option<(Notify, Notify)>,
}

impl MemoryJobService {
    fn seeded(jobs: Vec<Job>) -> Self {
        Self {
            jobs: Mutex::new(jobs),
            ..Self::default()
        }
    }

    fn holding_delete(mut self) -> Self {
        self.hold_delete = Some((Notify::new(), Notify::new()));
        self
    }

    async fn delete_entered(&self) {
        if let Some((entered, _)) = &self.hold_delete {
            entered.notified().await;
        }
    }

    fn release_delete(&self) {
        if let Some((_, release)) = &self.hold_delete {
            release.notify_one();
        }
    }

    fn remaining_ids(&self) -> Vec<String> {
        self.jobs
            .lock()
            .expect("jobs mutex poisoned")
            .iter()
            .map(|job| job.id.0.clone())
            .collect()
    }
}

#[async_trait]
impl JobsGateway for MemoryJobService {
    async fn fetch_jobs(&self) -> Result<Vec<Job>, GatewayError> {
        Ok(self.jobs.lock().expect("jobs mutex poisoned").clone())
    }

    async fn submit_application(&self, request: &ApplicationRequest) -> Result<(), GatewayError> {
        self.applications
            .lock()
            .expect("applications mutex poisoned")
            .push(request.clone());
        Ok(())
    }

    async fn delete_job(&self, id: &JobId) -> Result<(), GatewayError> {
        if let Some((entered, release)) = &self.hold_delete {
            entered.notify_one();
            release.notified().await;
        }
        self.jobs
            .lock()
            .expect("jobs mutex poisoned")
            .retain(|job| &job.id != id);
        Ok(())
    }

    async fn detach_job(&self, recruiter_email: &str, id: &JobId) -> Result<(), GatewayError> {
        self.detached
            .lock()
            .expect("detached mutex poisoned")
            .push((recruiter_email.to_string(), id.clone()));
        Ok(())
    }
}

fn job(id: &str, position: &str, company: &str, location: &str, skills: &[&str]) -> Job {
    Job {
        id: JobId::from(id),
        position: position.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        experience: "3 years".to_string(),
        description: String::new(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
    }
}

fn catalog() -> Vec<Job> {
    vec![
        job("j1", "Backend Engineer", "Acme", "Berlin", &["Go"]),
        job("j2", "Rust Engineer", "Globex", "Remote", &["Rust"]),
        job("j3", "Frontend Engineer", "Acme", "Remote", &["TypeScript"]),
        job("j2", "Rust Engineer (duplicate)", "Globex", "Remote", &["Rust"]),
    ]
}

fn ids(jobs: &[&Job]) -> Vec<String> {
    jobs.iter().map(|job| job.id.0.clone()).collect()
}

#[tokio::test]
async fn candidate_session_filters_ranks_and_applies() {
    let service = Arc::new(MemoryJobService::seeded(catalog()));
    let viewer = ViewerProfile::new("dev@example.test", ViewerRole::Candidate, ["Rust"]);
    let board = JobBoard::new(service.clone(), viewer);

    assert_eq!(
        board.activate().await,
        Ok(ActivationOutcome::Loaded { jobs: 3 })
    );
    let facets = board.snapshot().facets().expect("facets available");
    assert_eq!(facets.locations, ["Berlin", "Remote"]);

    board
        .toggle_filter(FilterDimension::Location, "remote")
        .expect("toggle accepted");
    board.with_board(|view| match view {
        BoardView::Ranked(ranked) => {
            assert_eq!(ids(&ranked.skill_matched), ["j2"]);
            assert_eq!(ids(&ranked.other), ["j3"]);
        }
        other => panic!("expected ranked board, got {other:?}"),
    });

    board
        .open_application(&JobId::from("j2"))
        .expect("modal opens");
    let outcome = board
        .submit_application(ApplicationForm::default().with_field("portfolio", "gh/dev"))
        .await
        .expect("submission accepted");
    assert!(matches!(outcome, ApplicationOutcome::Submitted(ref job) if job.id.0 == "j2"));
    assert_eq!(
        board.snapshot().confirmation_props().message,
        "Successfully applied to the job: Rust Engineer at Globex"
    );

    board.dismiss_confirmation().expect("dismiss accepted");
    assert!(!board.snapshot().confirmation_props().is_open);
    let applications = service
        .applications
        .lock()
        .expect("applications mutex poisoned")
        .clone();
    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0].candidate_id, "dev@example.test");
}

#[tokio::test]
async fn teardown_mid_deletion_keeps_server_consistent() {
    let service = Arc::new(MemoryJobService::seeded(catalog()).holding_delete());
    let viewer = ViewerProfile::new(
        "hiring@acme.test",
        ViewerRole::Recruiter,
        Vec::<String>::new(),
    );
    let board = JobBoard::new(service.clone(), viewer);
    board.activate().await.expect("activation accepted");

    let pending = tokio::spawn({
        let board = board.clone();
        async move { board.delete_job(&JobId::from("j1")).await }
    });
    service.delete_entered().await;
    board.teardown();
    service.release_delete();

    let outcome = pending
        .await
        .expect("deletion task joins")
        .expect("deletion accepted");
    assert_eq!(outcome, DeletionOutcome::Abandoned);

    assert_eq!(service.remaining_ids(), ["j2", "j3", "j2"]);
    assert_eq!(
        *service.detached.lock().expect("detached mutex poisoned"),
        vec![("hiring@acme.test".to_string(), JobId::from("j1"))]
    );
    assert!(board.is_torn_down());
    assert!(board.snapshot().confirmation.is_none());
}
