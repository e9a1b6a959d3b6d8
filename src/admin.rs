// src/admin.rs

use std::sync::Arc;

use log::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::gateway::AdminApi;
use crate::models::{Certificate, Document, ReviewStatus};

/// Administrator review queues over every student's uploads. Review actions
/// go to the backend first; the queues are then re-fetched.
pub struct AdminReview {
    api: Arc<dyn AdminApi>,
    documents: Vec<Document>,
    certificates: Vec<Certificate>,
}

impl AdminReview {
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
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

    pub fn pending_documents(&self) -> Vec<&Document> {
        self.documents
            .iter()
            .filter(|doc| doc.status == ReviewStatus::Pending)
            .collect()
    }

    pub fn pending_certificates(&self) -> Vec<&Certificate> {
        self.certificates
            .iter()
            .filter(|cert| cert.status == ReviewStatus::Pending)
            .collect()
    }

    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        let fetched = async {
            let documents = self.api.all_documents().await?;
            let certificates = self.api.all_certificates().await?;
            Ok::<_, ApiError>((documents, certificates))
        }
        .await;
        match fetched {
            Ok((documents, certificates)) => {
                self.documents = documents;
                self.certificates = certificates;
                Ok(())
            }
            Err(err) => {
                if err.is_auth() {
                    self.documents.clear();
                    self.certificates.clear();
                }
                Err(err)
            }
        }
    }

    /// A review verdict is APPROVED or REJECTED; moving something back to
    /// PENDING is not an admin action.
    pub async fn review_document(&mut self, id: Uuid, status: ReviewStatus) -> Result<(), ApiError> {
        if status == ReviewStatus::Pending {
            return Err(ApiError::Validation(
                "choose APPROVED or REJECTED".to_string(),
            ));
        }
        let updated = self.api.set_document_status(id, status).await?;
        info!("Marked document {} as {}", updated.id, status.as_str());
        self.refresh().await
    }

    pub async fn review_certificate(
        &mut self,
        id: Uuid,
        status: ReviewStatus,
    ) -> Result<(), ApiError> {
        if status == ReviewStatus::Pending {
            return Err(ApiError::Validation(
                "choose APPROVED or REJECTED".to_string(),
            ));
        }
        let updated = self.api.set_certificate_status(id, status).await?;
        info!("Marked certificate {} as {}", updated.id, status.as_str());
        self.refresh().await
    }
}
