// src/documents.rs

use std::sync::Arc;

use log::{info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::gateway::{FileUpload, PortalApi};
use crate::models::{Certificate, Document, DocumentKind, ReviewStatus};

pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

const PDF: &str = "application/pdf";
const ACCEPTED_TYPES: [&str; 3] = [PDF, "image/jpeg", "image/png"];

/// The verification gate: an approved resume and an approved marksheet both
/// exist. Any approved instance of the kind counts; identity proofs and
/// certificates are informative but non-blocking.
pub fn documents_verified(documents: &[Document]) -> bool {
    let approved = |kind: DocumentKind| {
        documents
            .iter()
            .any(|doc| doc.kind == kind && doc.status == ReviewStatus::Approved)
    };
    approved(DocumentKind::Resume) && approved(DocumentKind::Marksheet)
}

fn validate_upload(upload: &FileUpload, kind: DocumentKind) -> Result<(), ApiError> {
    if upload.bytes.is_empty() {
        return Err(ApiError::Validation(
            "select a file before uploading".to_string(),
        ));
    }
    if upload.bytes.len() as u64 > MAX_UPLOAD_BYTES {
        return Err(ApiError::Validation(
            "file is larger than the 10MB limit".to_string(),
        ));
    }
    match kind {
        DocumentKind::Resume => {
            if upload.content_type != PDF {
                return Err(ApiError::Validation("resume must be a PDF".to_string()));
            }
        }
        _ => {
            if !ACCEPTED_TYPES.contains(&upload.content_type.as_str()) {
                return Err(ApiError::Validation(
                    "file must be a PDF, JPEG or PNG".to_string(),
                ));
            }
        }
    }
    Ok(())
}

/// Holds the student's document and certificate lists. Every mutation goes to
/// the backend first and the lists are then re-fetched wholesale; the tracker
/// never splices locally, so it cannot drift from server truth.
pub struct DocumentTracker {
    api: Arc<dyn PortalApi>,
    documents: Vec<Document>,
    certificates: Vec<Certificate>,
}

impl DocumentTracker {
    pub fn new(api: Arc<dyn PortalApi>) -> Self {
        Self {
            api,
            documents: Vec::new(),
            certificates: Vec::new(),
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn certificates(&self) -> &[Certificate] {
        &self.certificates
    }

    pub fn of_kind(&self, kind: DocumentKind) -> impl Iterator<Item = &Document> {
        self.documents.iter().filter(move |doc| doc.kind == kind)
    }

    pub fn verified(&self) -> bool {
        documents_verified(&self.documents)
    }

    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        match self.api.student_documents().await {
            Ok(bundle) => {
                self.documents = bundle.documents;
                self.certificates = bundle.certificates;
                Ok(())
            }
            Err(err) => {
                // A dead session must not keep showing someone's lists.
                if err.is_auth() {
                    self.documents.clear();
                    self.certificates.clear();
                }
                Err(err)
            }
        }
    }

    /// Uploads a document of the given kind. Client-side checks (empty file,
    /// content type, size) fail with a validation error before any request is
    /// made; a failed request leaves the local lists untouched.
    pub async fn upload(&mut self, upload: FileUpload, kind: DocumentKind) -> Result<(), ApiError> {
        validate_upload(&upload, kind)?;
        let uploaded = self.api.upload_document(upload, kind).await?;
        info!("Uploaded {} as {}", uploaded.file_name, kind.as_str());
        self.refresh().await
    }

    pub async fn upload_certificate(
        &mut self,
        upload: FileUpload,
        certificate_name: &str,
    ) -> Result<(), ApiError> {
        if certificate_name.trim().is_empty() {
            return Err(ApiError::Validation(
                "certificate name is required".to_string(),
            ));
        }
        validate_upload(&upload, DocumentKind::Other)?;
        let uploaded = self
            .api
            .upload_certificate(upload, certificate_name)
            .await?;
        info!("Uploaded certificate {}", uploaded.certificate_name);
        self.refresh().await
    }

    /// Removes a document. A 404 from the backend means someone already
    /// deleted it; the refetch reconciles either way.
    pub async fn remove(&mut self, id: Uuid) -> Result<(), ApiError> {
        match self.api.delete_document(id).await {
            Ok(()) => {}
            Err(ApiError::Server { status: 404, .. }) => {
                warn!("Document {} was already removed", id);
            }
            Err(err) => return Err(err),
        }
        self.refresh().await
    }

    pub async fn remove_certificate(&mut self, id: Uuid) -> Result<(), ApiError> {
        match self.api.delete_certificate(id).await {
            Ok(()) => {}
            Err(ApiError::Server { status: 404, .. }) => {
                warn!("Certificate {} was already removed", id);
            }
            Err(err) => return Err(err),
        }
        self.refresh().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn doc(kind: DocumentKind, status: ReviewStatus) -> Document {
        Document {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            kind,
            file_name: "file.pdf".to_string(),
            file_size: 1024,
            content_type: "application/pdf".to_string(),
            url: "https://files.example.com/file.pdf".to_string(),
            status,
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn pending_resume_alone_is_not_verified() {
        let docs = vec![doc(DocumentKind::Resume, ReviewStatus::Pending)];
        assert!(!documents_verified(&docs));
    }

    #[test]
    fn approved_resume_and_marksheet_are_verified() {
        let docs = vec![
            doc(DocumentKind::Resume, ReviewStatus::Approved),
            doc(DocumentKind::Marksheet, ReviewStatus::Approved),
        ];
        assert!(documents_verified(&docs));
    }

    #[test]
    fn approved_resume_without_marksheet_is_not_verified() {
        let docs = vec![doc(DocumentKind::Resume, ReviewStatus::Approved)];
        assert!(!documents_verified(&docs));
    }

    #[test]
    fn any_approved_instance_of_a_kind_counts() {
        let docs = vec![
            doc(DocumentKind::Resume, ReviewStatus::Rejected),
            doc(DocumentKind::Resume, ReviewStatus::Approved),
            doc(DocumentKind::Marksheet, ReviewStatus::Approved),
        ];
        assert!(documents_verified(&docs));
    }

    #[test]
    fn empty_file_is_rejected() {
        let upload = FileUpload {
            file_name: "resume.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: Vec::new(),
        };
        assert!(matches!(
            validate_upload(&upload, DocumentKind::Resume),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn resume_must_be_pdf() {
        let upload = FileUpload {
            file_name: "resume.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        };
        assert!(matches!(
            validate_upload(&upload, DocumentKind::Resume),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn marksheet_accepts_images() {
        let upload = FileUpload {
            file_name: "marksheet.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![1, 2, 3],
        };
        assert!(validate_upload(&upload, DocumentKind::Marksheet).is_ok());
    }

    #[test]
    fn oversized_file_is_rejected() {
        let upload = FileUpload {
            file_name: "resume.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: vec![0; (MAX_UPLOAD_BYTES + 1) as usize],
        };
        assert!(matches!(
            validate_upload(&upload, DocumentKind::Resume),
            Err(ApiError::Validation(_))
        ));
    }
}
