use std::collections::BTreeSet;

use super::domain::Job;

/// User-selected narrowing criteria. An empty dimension passes every job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_term: String,
    pub companies: BTreeSet<String>,
    pub locations: BTreeSet<String>,
    pub skills: BTreeSet<String>,
}

/// Selectable dimension for checkbox-style toggling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDimension {
    Company,
    Location,
    Skill,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty()
            && self.companies.is_empty()
            && self.locations.is_empty()
            && self.skills.is_empty()
    }

    /// Adds `value` to the dimension when absent, removes it when present.
    pub fn toggle(&mut self, dimension: FilterDimension, value: &str) {
        let selected = match dimension {
            FilterDimension::Company => &mut self.companies,
            FilterDimension::Location => &mut self.locations,
            FilterDimension::Skill => &mut self.skills,
        };
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
    }

    pub fn matches(&self, job: &Job) -> bool {
        let needle = self.search_term.to_lowercase();
        self.matches_with_needle(job, &needle)
    }

    fn matches_with_needle(&self, job: &Job, needle: &str) -> bool {
        job.position.to_lowercase().contains(needle)
            && matches_any(&job.company, &self.companies)
            && matches_any(&job.location, &self.locations)
            && self.skills.iter().all(|skill| job.has_skill(skill))
    }
}

/// OR within the dimension: the field must contain at least one selected value.
fn matches_any(field: &str, selected: &BTreeSet<String>) -> bool {
    if selected.is_empty() {
        return true;
    }
    let field = field.to_lowercase();
    selected
        .iter()
        .any(|value| field.contains(&value.to_lowercase()))
}

/// Returns the jobs passing every dimension, in their original order.
///
/// The skill dimension requires every selected skill (AND) while company and
/// location accept any selected value (OR).
pub fn filter_jobs<'a>(jobs: &'a [Job], criteria: &FilterCriteria) -> Vec<&'a Job> {
    let needle = criteria.search_term.to_lowercase();
    jobs.iter()
        .filter(|job| criteria.matches_with_needle(job, &needle))
        .collect()
}
