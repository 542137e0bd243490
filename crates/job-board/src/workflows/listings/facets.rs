use std::collections::HashSet;

use serde::Serialize;

use super::domain::Job;

/// Distinct option values offered by each filter dimension, in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterFacets {
    pub companies: Vec<String>,
    pub locations: Vec<String>,
    pub skills: Vec<String>,
}

impl FilterFacets {
    pub fn collect(jobs: &[Job]) -> Self {
        let mut facets = Self::default();
        let mut seen_companies = HashSet::new();
        let mut seen_locations = HashSet::new();
        let mut seen_skills = HashSet::new();

        for job in jobs {
            if seen_companies.insert(job.company.as_str()) {
                facets.companies.push(job.company.clone());
            }
            if seen_locations.insert(job.location.as_str()) {
                facets.locations.push(job.location.clone());
            }
            for skill in &job.skills {
                if seen_skills.insert(skill.as_str()) {
                    facets.skills.push(skill.clone());
                }
            }
        }

        facets
    }
}
