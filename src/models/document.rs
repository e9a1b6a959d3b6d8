use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Review state an uploaded artifact moves through. Created as PENDING,
/// flipped by an administrator, never changed by the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "PENDING",
            ReviewStatus::Approved => "APPROVED",
            ReviewStatus::Rejected => "REJECTED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Resume,
    Marksheet,
    IdentityProof,
    Other,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Resume => "resume",
            DocumentKind::Marksheet => "marksheet",
            DocumentKind::IdentityProof => "identity_proof",
            DocumentKind::Other => "other",
        }
    }
}

/// A single uploaded file artifact. Several uploads of the same kind may
/// coexist; older ones stay listed until the owner deletes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub owner_id: Uuid,
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub file_name: String,
    pub file_size: u64,
    pub content_type: String,
    pub url: String,
    pub status: ReviewStatus,
    pub uploaded_at: DateTime<Utc>,
}

/// A named supplementary credential; same lifecycle as a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub certificate_name: String,
    pub file_name: String,
    pub file_size: u64,
    pub content_type: String,
    pub url: String,
    pub status: ReviewStatus,
    pub uploaded_at: DateTime<Utc>,
}

/// Shape of the student list endpoint: documents and certificates together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentBundle {
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
}
