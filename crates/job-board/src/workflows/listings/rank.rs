use std::collections::BTreeSet;

use super::domain::Job;

/// Filtered jobs split by overlap with the viewer's skills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedJobs<'a> {
    pub skill_matched: Vec<&'a Job>,
    pub other: Vec<&'a Job>,
}

impl<'a> RankedJobs<'a> {
    pub fn len(&self) -> usize {
        self.skill_matched.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skill_matched.is_empty() && self.other.is_empty()
    }

    /// Matched jobs first, then the rest.
    pub fn iter(&self) -> impl Iterator<Item = &'a Job> + '_ {
        self.skill_matched.iter().chain(self.other.iter()).copied()
    }
}

/// Stable single-pass partition: a job is matched when it shares any skill with the viewer.
pub fn partition_by_skills<'a, I>(filtered: I, viewer_skills: &BTreeSet<String>) -> RankedJobs<'a>
where
    I: IntoIterator<Item = &'a Job>,
{
    let mut ranked = RankedJobs {
        skill_matched: Vec::new(),
        other: Vec::new(),
    };

    for job in filtered {
        if viewer_skills.iter().any(|skill| job.has_skill(skill)) {
            ranked.skill_matched.push(job);
        } else {
            ranked.other.push(job);
        }
    }

    ranked
}
