// Administrator review flow against an in-memory backend.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use placementhub_client::admin::AdminReview;
use placementhub_client::error::ApiError;
use placementhub_client::gateway::AdminApi;
use placementhub_client::models::{Certificate, Document, DocumentKind, ReviewStatus};

struct FakeAdminBackend {
    documents: Mutex<Vec<Document>>,
    certificates: Mutex<Vec<Certificate>>,
}

#[async_trait]
impl AdminApi for FakeAdminBackend {
    async fn all_documents(&self) -> Result<Vec<Document>, ApiError> {
        Ok(self.documents.lock().unwrap().clone())
    }

    async fn all_certificates(&self) -> Result<Vec<Certificate>, ApiError> {
        Ok(self.certificates.lock().unwrap().clone())
    }

    async fn set_document_status(
        &self,
        id: Uuid,
        status: ReviewStatus,
    ) -> Result<Document, ApiError> {
        let mut documents = self.documents.lock().unwrap();
        let doc = documents
            .iter_mut()
            .find(|doc| doc.id == id)
            .ok_or(ApiError::Server {
                status: 404,
                message: "Document not found".to_string(),
            })?;
        doc.status = status;
        Ok(doc.clone())
    }

    async fn set_certificate_status(
        &self,
        id: Uuid,
        status: ReviewStatus,
    ) -> Result<Certificate, ApiError> {
        let mut certificates = self.certificates.lock().unwrap();
        let cert = certificates
            .iter_mut()
            .find(|cert| cert.id == id)
            .ok_or(ApiError::Server {
                status: 404,
                message: "Certificate not found".to_string(),
            })?;
        cert.status = status;
        Ok(cert.clone())
    }
}

fn pending_document() -> Document {
    Document {
        id: Uuid::new_v4(),
        owner_id: Uuid::new_v4(),
        kind: DocumentKind::Resume,
        file_name: "resume.pdf".to_string(),
        file_size: 4096,
        content_type: "application/pdf".to_string(),
        url: "https://files.example.com/resume.pdf".to_string(),
        status: ReviewStatus::Pending,
        uploaded_at: Utc::now(),
    }
}

#[tokio::test]
async fn approving_a_document_empties_the_pending_queue() {
    let doc = pending_document();
    let backend = Arc::new(FakeAdminBackend {
        documents: Mutex::new(vec![doc.clone()]),
        certificates: Mutex::new(Vec::new()),
    });

    let mut review = AdminReview::new(backend);
    review.refresh().await.expect("initial fetch");
    assert_eq!(review.pending_documents().len(), 1);

    review
        .review_document(doc.id, ReviewStatus::Approved)
        .await
        .expect("review succeeds");
    assert!(review.pending_documents().is_empty());
    assert_eq!(review.documents()[0].status, ReviewStatus::Approved);
}

#[tokio::test]
async fn sending_a_document_back_to_pending_is_not_a_verdict() {
    let doc = pending_document();
    let backend = Arc::new(FakeAdminBackend {
        documents: Mutex::new(vec![doc.clone()]),
        certificates: Mutex::new(Vec::new()),
    });

    let mut review = AdminReview::new(backend);
    review.refresh().await.expect("initial fetch");

    let err = review
        .review_document(doc.id, ReviewStatus::Pending)
        .await
        .expect_err("pending is not a verdict");
    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(review.documents()[0].status, ReviewStatus::Pending);
}
