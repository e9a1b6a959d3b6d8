// src/gateway.rs

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::multipart;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{extract_message, ApiError};
use crate::models::{
    Application, ApplyRequest, Certificate, Document, DocumentBundle, DocumentKind, Job, Message,
    RecruiterProfile, ReviewStatus, SendMessageRequest, StudentProfile,
};
use crate::session::{decode_session, Role, Session, SessionStore};

/// A file picked for upload, already read into memory.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Student-facing backend operations. `ApiClient` is the production
/// implementation; the trackers only see this trait, so tests drive them
/// against an in-memory backend instead of a live server.
#[async_trait]
pub trait PortalApi: Send + Sync {
    async fn student_documents(&self) -> Result<DocumentBundle, ApiError>;
    async fn upload_document(
        &self,
        upload: FileUpload,
        kind: DocumentKind,
    ) -> Result<Document, ApiError>;
    async fn upload_certificate(
        &self,
        upload: FileUpload,
        certificate_name: &str,
    ) -> Result<Certificate, ApiError>;
    async fn delete_document(&self, id: Uuid) -> Result<(), ApiError>;
    async fn delete_certificate(&self, id: Uuid) -> Result<(), ApiError>;

    async fn student_profile(&self) -> Result<StudentProfile, ApiError>;
    async fn save_student_profile(
        &self,
        profile: &StudentProfile,
    ) -> Result<StudentProfile, ApiError>;

    async fn jobs(&self) -> Result<Vec<Job>, ApiError>;
    async fn apply(&self, request: &ApplyRequest) -> Result<Application, ApiError>;
    async fn my_applications(&self) -> Result<Vec<Application>, ApiError>;

    async fn thread(&self, application_id: Uuid) -> Result<Vec<Message>, ApiError>;
    async fn send_message(&self, request: &SendMessageRequest) -> Result<Message, ApiError>;
}

/// Administrator review operations.
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn all_documents(&self) -> Result<Vec<Document>, ApiError>;
    async fn all_certificates(&self) -> Result<Vec<Certificate>, ApiError>;
    async fn set_document_status(
        &self,
        id: Uuid,
        status: ReviewStatus,
    ) -> Result<Document, ApiError>;
    async fn set_certificate_status(
        &self,
        id: Uuid,
        status: ReviewStatus,
    ) -> Result<Certificate, ApiError>;
}

/// Recruiter profile and recruiter document operations.
#[async_trait]
pub trait RecruiterApi: Send + Sync {
    async fn recruiter_profile(&self) -> Result<RecruiterProfile, ApiError>;
    async fn save_recruiter_profile(
        &self,
        profile: &RecruiterProfile,
    ) -> Result<RecruiterProfile, ApiError>;
    async fn recruiter_documents(&self) -> Result<Vec<Document>, ApiError>;
    async fn delete_recruiter_document(&self, id: Uuid) -> Result<(), ApiError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
    role: Role,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetPasswordRequest<'a> {
    email: &'a str,
    new_password: &'a str,
}

/// Thin wrapper over the portal's REST API: one method per endpoint, bearer
/// header injected from the session store, every failure normalized into
/// `ApiError` before it reaches a caller.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(config: &Config, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|err| ApiError::Network(format!("failed to build HTTP client: {}", err)))?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Protected calls fail before the wire when no token is stored at all.
    fn bearer(&self) -> Result<String, ApiError> {
        self.session
            .token()
            .ok_or_else(|| ApiError::Auth("not logged in".to_string()))
    }

    async fn parse<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(self.failure(response).await);
        }
        let status = status.as_u16();
        response.json::<T>().await.map_err(|err| ApiError::Server {
            status,
            message: format!("unexpected response body: {}", err),
        })
    }

    async fn expect_ok(&self, response: reqwest::Response) -> Result<(), ApiError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(self.failure(response).await)
        }
    }

    async fn failure(&self, response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = extract_message(&body);
        if status == 401 {
            // The backend no longer accepts the token; drop it so the route
            // guard sees "no session" instead of retrying a dead credential.
            warn!("Request rejected with 401; clearing stored session");
            self.session.teardown();
            return ApiError::Auth(message.unwrap_or_else(|| "session expired".to_string()));
        }
        let message = message.unwrap_or_else(|| "request failed".to_string());
        debug!("Request failed with status {}: {}", status, message);
        ApiError::Server { status, message }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let token = self.bearer()?;
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?;
        self.parse(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let token = self.bearer()?;
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        self.parse(response).await
    }

    async fn delete_expect_ok(&self, path: &str) -> Result<(), ApiError> {
        let token = self.bearer()?;
        let response = self
            .http
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await?;
        self.expect_ok(response).await
    }

    // ---- Auth ----

    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/api/auth/register"))
            .json(request)
            .send()
            .await?;
        self.expect_ok(response).await
    }

    /// Logs in, stores the returned token, and hands back the decoded session.
    pub async fn login(&self, email: &str, password: &str, role: Role) -> Result<Session, ApiError> {
        let body = LoginRequest {
            email,
            password,
            role,
        };
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&body)
            .send()
            .await?;
        let login: LoginResponse = self.parse(response).await?;
        let session = decode_session(&login.token)?;
        self.session.set(&login.token);
        debug!("Logged in as {}", session.subject_email);
        Ok(session)
    }

    pub async fn reset_password(
        &self,
        email: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), ApiError> {
        if new_password != confirm_password {
            return Err(ApiError::Validation("passwords do not match".to_string()));
        }
        let body = ResetPasswordRequest {
            email,
            new_password,
        };
        let response = self
            .http
            .post(self.url("/api/auth/reset-password"))
            .json(&body)
            .send()
            .await?;
        self.expect_ok(response).await
    }

    pub fn logout(&self) {
        self.session.teardown();
    }

    async fn upload_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        upload: FileUpload,
        extra_field: (&'static str, String),
    ) -> Result<T, ApiError> {
        let token = self.bearer()?;
        let FileUpload {
            file_name,
            content_type,
            bytes,
        } = upload;
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(&content_type)
            .map_err(|_| {
                ApiError::Validation(format!("unrecognised content type: {}", content_type))
            })?;
        let (name, value) = extra_field;
        let form = multipart::Form::new().part("file", part).text(name, value);
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        self.parse(response).await
    }
}

#[async_trait]
impl PortalApi for ApiClient {
    async fn student_documents(&self) -> Result<DocumentBundle, ApiError> {
        self.get_json("/api/documents/student/list").await
    }

    async fn upload_document(
        &self,
        upload: FileUpload,
        kind: DocumentKind,
    ) -> Result<Document, ApiError> {
        self.upload_multipart(
            "/api/documents/upload",
            upload,
            ("type", kind.as_str().to_string()),
        )
        .await
    }

    async fn upload_certificate(
        &self,
        upload: FileUpload,
        certificate_name: &str,
    ) -> Result<Certificate, ApiError> {
        self.upload_multipart(
            "/api/documents/certificates/upload",
            upload,
            ("certificateName", certificate_name.to_string()),
        )
        .await
    }

    async fn delete_document(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete_expect_ok(&format!("/api/documents/{}", id))
            .await
    }

    async fn delete_certificate(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete_expect_ok(&format!("/api/documents/certificates/{}", id))
            .await
    }

    async fn student_profile(&self) -> Result<StudentProfile, ApiError> {
        self.get_json("/api/profile").await
    }

    async fn save_student_profile(
        &self,
        profile: &StudentProfile,
    ) -> Result<StudentProfile, ApiError> {
        self.post_json("/api/profile", profile).await
    }

    async fn jobs(&self) -> Result<Vec<Job>, ApiError> {
        self.get_json("/api/jobs").await
    }

    async fn apply(&self, request: &ApplyRequest) -> Result<Application, ApiError> {
        self.post_json("/api/applications/apply", request).await
    }

    async fn my_applications(&self) -> Result<Vec<Application>, ApiError> {
        self.get_json("/api/applications/my-applications").await
    }

    async fn thread(&self, application_id: Uuid) -> Result<Vec<Message>, ApiError> {
        self.get_json(&format!("/api/messages/{}", application_id))
            .await
    }

    async fn send_message(&self, request: &SendMessageRequest) -> Result<Message, ApiError> {
        self.post_json("/api/messages/send", request).await
    }
}

#[async_trait]
impl AdminApi for ApiClient {
    async fn all_documents(&self) -> Result<Vec<Document>, ApiError> {
        self.get_json("/api/documents/admin/all-documents").await
    }

    async fn all_certificates(&self) -> Result<Vec<Certificate>, ApiError> {
        self.get_json("/api/documents/admin/all-certificates")
            .await
    }

    async fn set_document_status(
        &self,
        id: Uuid,
        status: ReviewStatus,
    ) -> Result<Document, ApiError> {
        let token = self.bearer()?;
        let response = self
            .http
            .patch(self.url(&format!("/api/documents/admin/document-status/{}", id)))
            .query(&[("status", status.as_str())])
            .bearer_auth(token)
            .send()
            .await?;
        self.parse(response).await
    }

    async fn set_certificate_status(
        &self,
        id: Uuid,
        status: ReviewStatus,
    ) -> Result<Certificate, ApiError> {
        let token = self.bearer()?;
        let response = self
            .http
            .patch(self.url(&format!(
                "/api/documents/admin/certificate-status/{}",
                id
            )))
            .query(&[("status", status.as_str())])
            .bearer_auth(token)
            .send()
            .await?;
        self.parse(response).await
    }
}

#[async_trait]
impl RecruiterApi for ApiClient {
    async fn recruiter_profile(&self) -> Result<RecruiterProfile, ApiError> {
        self.get_json("/api/recruiter/profile").await
    }

    async fn save_recruiter_profile(
        &self,
        profile: &RecruiterProfile,
    ) -> Result<RecruiterProfile, ApiError> {
        self.post_json("/api/recruiter/profile", profile).await
    }

    async fn recruiter_documents(&self) -> Result<Vec<Document>, ApiError> {
        self.get_json("/api/recruiter/profile/documents").await
    }

    async fn delete_recruiter_document(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete_expect_ok(&format!("/api/recruiter/profile/documents/{}", id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStore;

    fn client() -> ApiClient {
        let config = Config {
            api_base_url: "http://localhost:8080/".to_string(),
            request_timeout_secs: 30,
            token_file: String::new(),
        };
        ApiClient::new(&config, Arc::new(SessionStore::ephemeral())).expect("client builds")
    }

    #[test]
    fn base_url_trailing_slash_is_normalised() {
        let client = client();
        assert_eq!(
            client.url("/api/jobs"),
            "http://localhost:8080/api/jobs"
        );
    }

    #[tokio::test]
    async fn protected_call_without_token_fails_before_the_wire() {
        let client = client();
        let err = client.student_documents().await.expect_err("no token");
        assert!(err.is_auth());
    }

    #[tokio::test]
    async fn mismatched_passwords_never_reach_the_network() {
        let client = client();
        let err = client
            .reset_password("ravi@college.edu", "newpass1", "newpass2")
            .await
            .expect_err("mismatch");
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
