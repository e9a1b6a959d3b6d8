// src/jobs.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::error::ApiError;
use crate::gateway::PortalApi;
use crate::models::{Job, ReviewStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobSort {
    #[default]
    Newest,
    Oldest,
    HighestStipend,
}

/// Client-side browse filters. Every set field must hold for a job to stay in
/// the result (AND semantics); unset fields do not constrain.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub search: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub duration: Option<String>,
    pub min_stipend: Option<i64>,
    pub max_stipend: Option<i64>,
    pub sort: JobSort,
}

impl JobFilter {
    fn matches(&self, job: &Job) -> bool {
        if let Some(term) = self.search.as_deref() {
            let term = term.trim().to_lowercase();
            if !term.is_empty() {
                let hit = [
                    &job.title,
                    &job.company_name,
                    &job.department,
                    &job.location,
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&term));
                if !hit {
                    return false;
                }
            }
        }
        if let Some(department) = self.department.as_deref() {
            if !job.department.eq_ignore_ascii_case(department) {
                return false;
            }
        }
        if let Some(location) = self.location.as_deref() {
            if !job.location.eq_ignore_ascii_case(location) {
                return false;
            }
        }
        if let Some(duration) = self.duration.as_deref() {
            if !job.duration.eq_ignore_ascii_case(duration) {
                return false;
            }
        }
        if let Some(min) = self.min_stipend {
            if job.stipend_salary < min {
                return false;
            }
        }
        if let Some(max) = self.max_stipend {
            if job.stipend_salary > max {
                return false;
            }
        }
        true
    }
}

/// Applies the browse pipeline: admin-approved postings only, then the
/// filter, then the requested ordering.
pub fn browse<'a>(jobs: &'a [Job], filter: &JobFilter) -> Vec<&'a Job> {
    let mut matches: Vec<&Job> = jobs
        .iter()
        .filter(|job| job.admin_approval_status == ReviewStatus::Approved)
        .filter(|job| filter.matches(job))
        .collect();
    match filter.sort {
        JobSort::Newest => matches.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        JobSort::Oldest => matches.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        JobSort::HighestStipend => {
            matches.sort_by(|a, b| b.stipend_salary.cmp(&a.stipend_salary))
        }
    }
    matches
}

/// Holds the fetched job list and serves filtered views of it.
pub struct JobBoard {
    api: Arc<dyn PortalApi>,
    jobs: Vec<Job>,
}

impl JobBoard {
    pub fn new(api: Arc<dyn PortalApi>) -> Self {
        Self {
            api,
            jobs: Vec::new(),
        }
    }

    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        match self.api.jobs().await {
            Ok(jobs) => {
                self.jobs = jobs;
                Ok(())
            }
            Err(err) => {
                if err.is_auth() {
                    self.jobs.clear();
                }
                Err(err)
            }
        }
    }

    pub fn browse(&self, filter: &JobFilter) -> Vec<&Job> {
        browse(&self.jobs, filter)
    }

    pub fn find(&self, id: Uuid) -> Option<&Job> {
        self.jobs
            .iter()
            .find(|job| job.id == id && job.admin_approval_status == ReviewStatus::Approved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn job(title: &str, company: &str, department: &str, location: &str) -> Job {
        Job {
            id: Uuid::new_v4(),
            title: title.to_string(),
            company_name: company.to_string(),
            department: department.to_string(),
            location: location.to_string(),
            duration: "6 months".to_string(),
            stipend_salary: 20_000,
            job_type: "Internship".to_string(),
            description: String::new(),
            requirements: String::new(),
            question_for_applicant: None,
            admin_approval_status: ReviewStatus::Approved,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn unapproved_jobs_are_invisible() {
        let mut pending = job("Data Intern", "Beta", "Data", "Pune");
        pending.admin_approval_status = ReviewStatus::Pending;
        let jobs = vec![job("Backend Intern", "Acme", "Engineering", "Chennai"), pending];

        let visible = browse(&jobs, &JobFilter::default());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Backend Intern");
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let jobs = vec![
            job("Backend Intern", "Acme", "Engineering", "Bangalore"),
            job("Design Intern", "Beta", "Design", "Pune"),
        ];
        let filter = JobFilter {
            search: Some("BANGALORE".to_string()),
            ..JobFilter::default()
        };
        let found = browse(&jobs, &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].location, "Bangalore");
    }

    #[test]
    fn search_and_department_facet_compose_with_and_semantics() {
        let jobs = vec![
            job("Backend Intern", "Bangalore Systems", "Engineering", "Remote"),
            job("Sales Intern", "Acme", "Sales", "Bangalore"),
        ];
        let filter = JobFilter {
            search: Some("bangalore".to_string()),
            department: Some("Engineering".to_string()),
            ..JobFilter::default()
        };
        // Both match the text, only one matches the department.
        let found = browse(&jobs, &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].department, "Engineering");
    }

    #[test]
    fn stipend_range_bounds_are_inclusive() {
        let mut low = job("A", "Acme", "Engineering", "Pune");
        low.stipend_salary = 10_000;
        let mut mid = job("B", "Acme", "Engineering", "Pune");
        mid.stipend_salary = 20_000;
        let mut high = job("C", "Acme", "Engineering", "Pune");
        high.stipend_salary = 40_000;

        let filter = JobFilter {
            min_stipend: Some(10_000),
            max_stipend: Some(20_000),
            ..JobFilter::default()
        };
        let jobs = [low, mid, high];
        let found = browse(&jobs, &filter);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn sort_orders_are_honoured() {
        let mut older = job("Old", "Acme", "Engineering", "Pune");
        older.created_at = Utc::now() - Duration::days(7);
        older.stipend_salary = 50_000;
        let newer = job("New", "Acme", "Engineering", "Pune");

        let jobs = vec![older, newer];

        let newest = browse(
            &jobs,
            &JobFilter {
                sort: JobSort::Newest,
                ..JobFilter::default()
            },
        );
        assert_eq!(newest[0].title, "New");

        let oldest = browse(
            &jobs,
            &JobFilter {
                sort: JobSort::Oldest,
                ..JobFilter::default()
            },
        );
        assert_eq!(oldest[0].title, "Old");

        let richest = browse(
            &jobs,
            &JobFilter {
                sort: JobSort::HighestStipend,
                ..JobFilter::default()
            },
        );
        assert_eq!(richest[0].title, "Old");
    }

    #[test]
    fn blank_search_matches_everything() {
        let jobs = vec![job("Backend Intern", "Acme", "Engineering", "Chennai")];
        let filter = JobFilter {
            search: Some("   ".to_string()),
            ..JobFilter::default()
        };
        assert_eq!(browse(&jobs, &filter).len(), 1);
    }
}
