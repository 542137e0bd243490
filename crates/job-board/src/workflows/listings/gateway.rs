use async_trait::async_trait;

use super::domain::{ApplicationRequest, Job, JobId};

/// Remote job service consumed by the listing workflows.
///
/// Each method resolves `Ok` only for the documented success status of its endpoint.
#[async_trait]
pub trait JobsGateway: Send + Sync {
    /// `GET /api/v1/jobs`, expecting 200 with the full collection.
    async fn fetch_jobs(&self) -> Result<Vec<Job>, GatewayError>;

    /// `POST /api/v1/applications`, expecting 201.
    async fn submit_application(&self, request: &ApplicationRequest) -> Result<(), GatewayError>;

    /// `DELETE /api/v1/jobs/{id}`, expecting 204.
    async fn delete_job(&self, id: &JobId) -> Result<(), GatewayError>;

    /// `POST /api/v1/recruiters/{email}/removejob` with the job id as body, expecting 200.
    async fn detach_job(&self, recruiter_email: &str, id: &JobId) -> Result<(), GatewayError>;
}

/// Failure of a single remote call.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{path} answered {status}, expected {expected}")]
    UnexpectedStatus {
        path: String,
        status: u16,
        expected: u16,
    },
    #[error("malformed response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid service url: {0}")]
    InvalidUrl(String),
    #[error("auth token cannot be sent as a header value")]
    InvalidToken,
    #[error("unable to build http client: {0}")]
    Client(#[source] reqwest::Error),
}
