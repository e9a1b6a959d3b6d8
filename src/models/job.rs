use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ReviewStatus;

/// A posting as returned by the jobs endpoint. Read-only on the student side;
/// only APPROVED postings ever reach the browse view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub company_name: String,
    pub department: String,
    pub location: String,
    pub duration: String,
    /// Monthly amount in whole rupees.
    pub stipend_salary: i64,
    pub job_type: String,
    pub description: String,
    pub requirements: String,
    #[serde(default)]
    pub question_for_applicant: Option<String>,
    pub admin_approval_status: ReviewStatus,
    pub created_at: DateTime<Utc>,
}
