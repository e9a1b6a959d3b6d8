mod application;
mod document;
mod job;
mod message;
mod profile;

pub use application::{Application, ApplicationStatus, ApplyRequest};
pub use document::{Certificate, Document, DocumentBundle, DocumentKind, ReviewStatus};
pub use job::Job;
pub use message::{Message, SendMessageRequest};
pub use profile::{RecruiterProfile, StudentProfile};
