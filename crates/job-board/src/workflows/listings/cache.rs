use std::collections::HashSet;
use std::sync::Arc;

use tracing::warn;

use super::domain::{Job, JobId};

/// Immutable snapshot of the server's job collection. Ids are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCache {
    jobs: Arc<[Job]>,
}

impl Default for JobCache {
    fn default() -> Self {
        Self {
            jobs: Arc::from(Vec::new()),
        }
    }
}

impl JobCache {
    /// Builds a cache from a fetched collection, keeping the first job for any repeated id.
    pub fn from_fetched(fetched: Vec<Job>) -> Self {
        let mut seen = HashSet::with_capacity(fetched.len());
        let mut jobs = Vec::with_capacity(fetched.len());

        for job in fetched {
            if seen.insert(job.id.clone()) {
                jobs.push(job);
            } else {
                warn!(job_id = %job.id, "dropping duplicate job id from fetched collection");
            }
        }

        Self { jobs: jobs.into() }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn get(&self, id: &JobId) -> Option<&Job> {
        self.jobs.iter().find(|job| &job.id == id)
    }

    pub fn contains(&self, id: &JobId) -> bool {
        self.get(id).is_some()
    }

    /// A new snapshot without `id`; the receiver is left untouched.
    pub fn without(&self, id: &JobId) -> Self {
        let jobs: Vec<Job> = self
            .jobs
            .iter()
            .filter(|job| &job.id != id)
            .cloned()
            .collect();
        Self { jobs: jobs.into() }
    }
}

/// Per-activation lifecycle of the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CacheState {
    #[default]
    Idle,
    Loading,
    Ready(JobCache),
    Error(String),
}

impl CacheState {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready(_) => "ready",
            Self::Error(_) => "error",
        }
    }

    /// The snapshot, only once fully loaded.
    pub fn ready(&self) -> Option<&JobCache> {
        match self {
            Self::Ready(cache) => Some(cache),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: &str, position: &str) -> Job {
        Job {
            id: JobId::from(id),
            position: position.to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            experience: String::new(),
            description: String::new(),
            skills: Default::default(),
        }
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let cache = JobCache::from_fetched(vec![
            job("a", "First"),
            job("b", "Second"),
            job("a", "Shadow"),
        ]);

        assert_eq!(cache.len(), 2);
        assert_eq!(
            cache.get(&JobId::from("a")).map(|job| job.position.as_str()),
            Some("First")
        );
    }

    #[test]
    fn without_preserves_order_and_original_snapshot() {
        let cache = JobCache::from_fetched(vec![job("a", "A"), job("b", "B"), job("c", "C")]);
        let trimmed = cache.without(&JobId::from("b"));

        let ids: Vec<&str> = trimmed.jobs().iter().map(|job| job.id.0.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
        assert_eq!(cache.len(), 3);
        assert!(!trimmed.contains(&JobId::from("b")));
    }

    #[test]
    fn only_ready_state_exposes_a_snapshot() {
        assert!(CacheState::Idle.ready().is_none());
        assert!(CacheState::Loading.ready().is_none());
        assert!(CacheState::Error("boom".to_string()).ready().is_none());
        let ready = CacheState::Ready(JobCache::default());
        assert_eq!(ready.label(), "ready");
        assert!(ready.ready().is_some());
    }
}
