use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status is mutated by the recruiter side only; the student just reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Applied,
    Shortlisted,
    Rejected,
}

/// One application per (student, job) pair, bound to the documents the
/// student picked when applying.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub student_id: Uuid,
    pub resume_id: Uuid,
    pub marksheet_id: Uuid,
    #[serde(default)]
    pub certificate_ids: Vec<Uuid>,
    #[serde(default)]
    pub answer_for_recruiter: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

/// Body of the apply endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub job_id: Uuid,
    pub resume_id: Uuid,
    pub marksheet_id: Uuid,
    pub certificate_ids: Vec<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_for_recruiter: Option<String>,
}
