use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier wrapper for posted jobs, as issued by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A posted position as returned by `GET /api/v1/jobs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub position: String,
    pub company: String,
    pub location: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: BTreeSet<String>,
}

impl Job {
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.contains(skill)
    }

    /// `{position} at {company}`, the phrase used in confirmations.
    pub fn headline(&self) -> String {
        format!("{} at {}", self.position, self.company)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerRole {
    Candidate,
    Recruiter,
}

impl ViewerRole {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Candidate => "candidate",
            Self::Recruiter => "recruiter",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "candidate" => Some(Self::Candidate),
            "recruiter" => Some(Self::Recruiter),
            _ => None,
        }
    }
}

/// Authenticated viewer, supplied by the session collaborator and never mutated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerProfile {
    pub email: String,
    pub role: ViewerRole,
    #[serde(default)]
    pub skills: BTreeSet<String>,
}

impl ViewerProfile {
    pub fn new<I, S>(email: impl Into<String>, role: ViewerRole, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            email: email.into(),
            role,
            skills: skills.into_iter().map(Into::into).collect(),
        }
    }
}

/// Fields collected by the application modal. Forwarded to the service untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationForm {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ApplicationForm {
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// Body of `POST /api/v1/applications`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    pub job_id: JobId,
    pub candidate_id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ApplicationRequest {
    /// Combines submitted form data with the selected job's identity. The identity
    /// keys always win over same-named form fields.
    pub fn compose(job: &Job, candidate_id: &str, form: ApplicationForm) -> Self {
        let mut fields = form.fields;
        fields.remove("jobId");
        fields.remove("candidateId");
        Self {
            job_id: job.id.clone(),
            candidate_id: candidate_id.to_string(),
            fields,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationTone {
    Success,
    Failure,
}

/// Message shown on the confirmation surface after a workflow settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub tone: ConfirmationTone,
    pub message: String,
}

impl Confirmation {
    pub fn applied(job: &Job) -> Self {
        Self {
            tone: ConfirmationTone::Success,
            message: format!("Successfully applied to the job: {}", job.headline()),
        }
    }

    pub fn application_failed() -> Self {
        Self {
            tone: ConfirmationTone::Failure,
            message: "Some error occurred while applying for the job. Kindly try again!"
                .to_string(),
        }
    }

    pub fn deleted(job: &Job) -> Self {
        Self {
            tone: ConfirmationTone::Success,
            message: format!("Successfully deleted the job: {}", job.headline()),
        }
    }

    pub fn deletion_failed() -> Self {
        Self {
            tone: ConfirmationTone::Failure,
            message: "Some error occurred while deleting the job. Kindly try again!".to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.tone == ConfirmationTone::Success
    }
}
