//! Client for the hosted telephony recording API
//!
//! Three stateless operations against the `/api/v2/logs` endpoint family:
//! search a calendar day, fetch one recording's audio, delete one recording.
//! Every exchange is a single POST authenticated by two opaque header values.

mod client;
mod models;

pub use client::RecordingApiClient;

use async_trait::async_trait;

use crate::catalog::RecordingRecord;
use crate::secrets::{SecretStore, KEY_AUTH_SECRET, KEY_AUTH_TOKEN};
use crate::{CallboxError, Result};

/// Header carrying the auth token on every request
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Header carrying the auth secret on every request
pub const AUTH_SECRET_HEADER: &str = "X-Auth-Secret";

/// Opaque API credentials.
///
/// Held only for the duration of a session; the content is never inspected
/// beyond a non-empty check.
#[derive(Clone)]
pub struct Credentials {
    token: String,
    secret: String,
}

impl Credentials {
    /// Build credentials, rejecting empty values up front so a misconfigured
    /// session fails before the first network round trip.
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let secret = secret.into();
        if token.trim().is_empty() || secret.trim().is_empty() {
            return Err(CallboxError::Config(
                "API credentials must not be empty".to_string(),
            ));
        }
        Ok(Self { token, secret })
    }

    /// Load both credential values from a secret store.
    pub fn from_store(store: &dyn SecretStore) -> Result<Self> {
        let token = store
            .get(KEY_AUTH_TOKEN)?
            .ok_or_else(|| CallboxError::Config("auth token is not configured".to_string()))?;
        let secret = store
            .get(KEY_AUTH_SECRET)?
            .ok_or_else(|| CallboxError::Config("auth secret is not configured".to_string()))?;
        Self::new(token, secret)
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }

    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Secrets never reach logs.
        f.debug_struct("Credentials").finish_non_exhaustive()
    }
}

/// Source of playable audio bytes for a recording id.
///
/// The playback engine depends on this seam rather than on the concrete
/// client, so tests can drive it without a server.
#[async_trait]
pub trait AudioSource: Send + Sync {
    /// Fetch one recording's audio as a complete playable file.
    async fn fetch_audio(&self, id: i64, credentials: &Credentials) -> Result<Vec<u8>>;
}

/// Result of a search: zero matches is a normal state that callers message
/// differently from a failure, so it gets its own arm instead of an error.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// The day had no matching calls
    Empty,
    /// One or more matching calls, in server order
    Records(Vec<RecordingRecord>),
}

impl SearchOutcome {
    pub fn into_records(self) -> Vec<RecordingRecord> {
        match self {
            Self::Empty => Vec::new(),
            Self::Records(records) => records,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}
