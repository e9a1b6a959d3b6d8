// src/session.rs

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Student,
    Recruiter,
    Admin,
}

/// Payload of the bearer token issued at login. The backend puts the account
/// email in either `sub` or `email` depending on the endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
    pub exp: i64,
}

/// Identity derived from a decoded token. Never persisted; rebuilt from the
/// stored token on every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub subject_email: String,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}

/// Decodes the claims segment of a bearer token. The client never holds the
/// signing secret, so the signature is not checked here; the backend re-checks
/// it on every authenticated call anyway. A token that is not three dot-joined
/// segments, not base64url, not JSON, or missing its subject is rejected.
pub fn decode_session(token: &str) -> Result<Session, ApiError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|err| ApiError::Auth(format!("malformed token: {}", err)))?;

    let claims = data.claims;
    let subject_email = claims
        .email
        .or(claims.sub)
        .filter(|subject| !subject.is_empty())
        .ok_or_else(|| ApiError::Auth("token carries no subject".to_string()))?;
    let expires_at = Utc
        .timestamp_opt(claims.exp, 0)
        .single()
        .ok_or_else(|| ApiError::Auth("token expiry out of range".to_string()))?;

    Ok(Session {
        subject_email,
        role: claims.role,
        expires_at,
    })
}

pub const LOGIN_ROUTE: &str = "/login";
pub const REGISTER_ROUTE: &str = "/register";

/// Dashboard prefixes and the role each one belongs to.
const PROTECTED_PREFIXES: [(&str, Role); 3] = [
    ("/student", Role::Student),
    ("/recruiter", Role::Recruiter),
    ("/admin", Role::Admin),
];

pub fn dashboard_for(role: Role) -> &'static str {
    match role {
        Role::Student => "/student/dashboard",
        Role::Recruiter => "/recruiter/dashboard",
        Role::Admin => "/admin/dashboard",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(&'static str),
}

/// Route table: protected prefixes need a live session of the matching role;
/// the auth surfaces bounce an already-signed-in user to their dashboard.
/// Everything else is public.
pub fn route_decision(path: &str, session: Option<&Session>) -> RouteDecision {
    let live = session.filter(|current| !current.is_expired());

    if let Some((_, audience)) = PROTECTED_PREFIXES
        .iter()
        .find(|(prefix, _)| path.starts_with(prefix))
    {
        return match live {
            None => RouteDecision::Redirect(LOGIN_ROUTE),
            Some(current) if current.role != *audience => {
                RouteDecision::Redirect(dashboard_for(current.role))
            }
            Some(_) => RouteDecision::Allow,
        };
    }

    if path.starts_with(LOGIN_ROUTE) || path.starts_with(REGISTER_ROUTE) {
        if let Some(current) = live {
            return RouteDecision::Redirect(dashboard_for(current.role));
        }
    }

    RouteDecision::Allow
}

/// Where the bearer token lives between runs. The store is the only reader
/// and writer; no other module touches the raw storage.
pub trait TokenStorage: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> Option<String> {
        fs::read_to_string(&self.path)
            .ok()
            .map(|contents| contents.trim().to_string())
            .filter(|token| !token.is_empty())
    }

    fn save(&self, token: &str) {
        if let Err(err) = fs::write(&self.path, token) {
            warn!("Failed to persist token to {:?}: {}", self.path, err);
        }
    }

    fn clear(&self) {
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != ErrorKind::NotFound {
                warn!("Failed to clear persisted token at {:?}: {}", self.path, err);
            }
        }
    }
}

struct NoStorage;

impl TokenStorage for NoStorage {
    fn load(&self) -> Option<String> {
        None
    }
    fn save(&self, _token: &str) {}
    fn clear(&self) {}
}

/// Process-wide session state: `init` on startup, `set` on login, `teardown`
/// on logout or when a stored token turns out to be expired or malformed.
pub struct SessionStore {
    storage: Box<dyn TokenStorage>,
    token: RwLock<Option<String>>,
}

impl SessionStore {
    pub fn init(storage: Box<dyn TokenStorage>) -> Self {
        let token = storage.load();
        Self {
            storage,
            token: RwLock::new(token),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::init(Box::new(FileTokenStorage::new(&config.token_file)))
    }

    /// Store that never persists anything. Handy for tests and one-shot use.
    pub fn ephemeral() -> Self {
        Self::init(Box::new(NoStorage))
    }

    pub fn set(&self, token: &str) {
        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(token.to_string());
        self.storage.save(token);
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn teardown(&self) {
        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
        self.storage.clear();
    }

    /// Current live session, if any. A stored token that no longer decodes or
    /// has expired is dropped on the spot so the next check sees "no session"
    /// instead of a perpetually failing decode.
    pub fn current_session(&self) -> Option<Session> {
        let token = self.token()?;
        match decode_session(&token) {
            Ok(session) if !session.is_expired() => Some(session),
            Ok(_) => {
                warn!("Stored token has expired; clearing session");
                self.teardown();
                None
            }
            Err(err) => {
                warn!("Stored token failed to decode ({}); clearing session", err);
                self.teardown();
                None
            }
        }
    }

    pub fn authorize(&self, path: &str) -> RouteDecision {
        route_decision(path, self.current_session().as_ref())
    }
}
