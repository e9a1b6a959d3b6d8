// src/applications.rs

use std::collections::HashSet;
use std::sync::Arc;

use log::info;
use uuid::Uuid;

use crate::documents::documents_verified;
use crate::error::ApiError;
use crate::gateway::PortalApi;
use crate::models::{Application, ApplyRequest, Document, Job, StudentProfile};

/// Outcome of the apply gate. When ineligible, `reason` names every failing
/// check so the UI can show the right message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eligibility {
    pub eligible: bool,
    pub reason: Option<String>,
}

impl Eligibility {
    fn eligible() -> Self {
        Self {
            eligible: true,
            reason: None,
        }
    }

    fn blocked(reasons: Vec<&str>) -> Self {
        Self {
            eligible: false,
            reason: Some(reasons.join("; ")),
        }
    }
}

/// Eligibility for one (student, job) pair: no prior application, profile
/// complete, documents verified. All failing gates are reported together.
pub fn can_apply(
    job: &Job,
    profile: &StudentProfile,
    documents: &[Document],
    existing: &[Application],
) -> Eligibility {
    let mut blockers = Vec::new();
    if existing.iter().any(|app| app.job_id == job.id) {
        blockers.push("you have already applied to this job");
    }
    if !profile.is_complete() {
        blockers.push("your profile is incomplete");
    }
    if !documents_verified(documents) {
        blockers.push("your documents are not verified yet");
    }
    if blockers.is_empty() {
        Eligibility::eligible()
    } else {
        Eligibility::blocked(blockers)
    }
}

/// Tracks the student's applications and submits new ones. Submission is
/// followed by a refetch so the list carries the server-assigned id and
/// timestamp; nothing is inserted optimistically.
pub struct ApplicationWorkflow {
    api: Arc<dyn PortalApi>,
    applications: Vec<Application>,
    // Jobs applied to in this session, kept separately so a failed refetch
    // cannot re-open the duplicate-apply window.
    submitted: HashSet<Uuid>,
}

impl ApplicationWorkflow {
    pub fn new(api: Arc<dyn PortalApi>) -> Self {
        Self {
            api,
            applications: Vec::new(),
            submitted: HashSet::new(),
        }
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn has_applied(&self, job_id: Uuid) -> bool {
        self.submitted.contains(&job_id)
            || self.applications.iter().any(|app| app.job_id == job_id)
    }

    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        match self.api.my_applications().await {
            Ok(applications) => {
                self.applications = applications;
                Ok(())
            }
            Err(err) => {
                if err.is_auth() {
                    self.applications.clear();
                    self.submitted.clear();
                }
                Err(err)
            }
        }
    }

    pub fn can_apply(
        &self,
        job: &Job,
        profile: &StudentProfile,
        documents: &[Document],
    ) -> Eligibility {
        if self.submitted.contains(&job.id) {
            // Applied earlier in this session; the refetch may not have
            // landed, but the server already has the record.
            let mut blockers = vec!["you have already applied to this job"];
            if !profile.is_complete() {
                blockers.push("your profile is incomplete");
            }
            if !documents_verified(documents) {
                blockers.push("your documents are not verified yet");
            }
            return Eligibility::blocked(blockers);
        }
        can_apply(job, profile, documents, &self.applications)
    }

    /// Submits an application for `job`. The caller is expected to have run
    /// `can_apply` first; this re-checks the cheap local gates and lets the
    /// backend be the final arbiter for everything else.
    pub async fn submit(
        &mut self,
        job: &Job,
        resume_id: Uuid,
        marksheet_id: Uuid,
        certificate_ids: Vec<Uuid>,
        answer: Option<String>,
    ) -> Result<(), ApiError> {
        if self.has_applied(job.id) {
            return Err(ApiError::Validation(
                "you have already applied to this job".to_string(),
            ));
        }
        if job.question_for_applicant.is_some()
            && answer.as_deref().map(str::trim).unwrap_or("").is_empty()
        {
            return Err(ApiError::Validation(
                "an answer to the recruiter's question is required".to_string(),
            ));
        }

        let request = ApplyRequest {
            job_id: job.id,
            resume_id,
            marksheet_id,
            certificate_ids,
            answer_for_recruiter: answer,
        };
        self.api.apply(&request).await?;
        self.submitted.insert(job.id);
        info!("Applied to {} at {}", job.title, job.company_name);
        self.refresh().await
    }
}
