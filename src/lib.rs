// src/lib.rs
//
// Client-side core of the placement portal: session guard, document
// lifecycle, application workflow, messaging, and the REST gateway that
// backs them. The backend stays the source of truth for every list; the
// modules here mutate, then re-fetch.

pub mod admin;
pub mod applications;
pub mod config;
pub mod documents;
pub mod error;
pub mod gateway;
pub mod jobs;
pub mod messaging;
pub mod models;
pub mod recruiter;
pub mod session;

pub use crate::applications::{can_apply, ApplicationWorkflow, Eligibility};
pub use crate::config::Config;
pub use crate::documents::{documents_verified, DocumentTracker};
pub use crate::error::ApiError;
pub use crate::gateway::{ApiClient, FileUpload, PortalApi};
pub use crate::jobs::{browse, JobBoard, JobFilter, JobSort};
pub use crate::messaging::MessageThread;
pub use crate::session::{decode_session, Role, RouteDecision, Session, SessionStore};
