// src/recruiter.rs

use std::sync::Arc;

use log::{info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::gateway::RecruiterApi;
use crate::models::{Document, RecruiterProfile};

/// Recruiter-side state: company profile plus recruiter documents. Saves are
/// upserts; the stored copy is replaced with whatever the backend echoes so
/// server-side normalisation is never lost.
pub struct RecruiterWorkspace {
    api: Arc<dyn RecruiterApi>,
    profile: RecruiterProfile,
    documents: Vec<Document>,
}

impl RecruiterWorkspace {
    pub fn new(api: Arc<dyn RecruiterApi>) -> Self {
        Self {
            api,
            profile: RecruiterProfile::default(),
            documents: Vec::new(),
        }
    }

    pub fn profile(&self) -> &RecruiterProfile {
        &self.profile
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        let fetched = async {
            let profile = self.api.recruiter_profile().await?;
            let documents = self.api.recruiter_documents().await?;
            Ok::<_, ApiError>((profile, documents))
        }
        .await;
        match fetched {
            Ok((profile, documents)) => {
                self.profile = profile;
                self.documents = documents;
                Ok(())
            }
            Err(err) => {
                if err.is_auth() {
                    self.profile = RecruiterProfile::default();
                    self.documents.clear();
                }
                Err(err)
            }
        }
    }

    pub async fn save_profile(&mut self, profile: &RecruiterProfile) -> Result<(), ApiError> {
        self.profile = self.api.save_recruiter_profile(profile).await?;
        info!("Saved recruiter profile");
        Ok(())
    }

    pub async fn remove_document(&mut self, id: Uuid) -> Result<(), ApiError> {
        match self.api.delete_recruiter_document(id).await {
            Ok(()) => {}
            Err(ApiError::Server { status: 404, .. }) => {
                warn!("Recruiter document {} was already removed", id);
            }
            Err(err) => return Err(err),
        }
        self.documents = self.api.recruiter_documents().await?;
        Ok(())
    }
}
