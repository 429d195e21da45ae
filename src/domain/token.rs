use crate::domain::signing::SigningKey;
use crate::error::{ApnsError, Result};
use jsonwebtoken::{Algorithm, Header, encode};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// APNs rate-limits providers that renew tokens more often than every 20
/// minutes and rejects tokens older than 60.
pub const MIN_RENEWAL_MINS: u64 = 20;
pub const MAX_RENEWAL_MINS: u64 = 59;

/// Claim set of an APNs provider authentication token.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Apple Developer team identifier.
    pub iss: String,
    /// Issued-at, UTC Unix seconds.
    pub iat: u64,
}

impl Claims {
    pub fn new(team_id: &str) -> Self {
        let iat = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::from_secs(0))
            .as_secs();

        Self { iss: team_id.to_string(), iat }
    }

    /// Signs the claims into the three-part compact token format.
    ///
    /// # Errors
    /// Returns [`ApnsError::Signing`] if the signing operation fails.
    pub fn encode(&self, key: &SigningKey, key_id: &str) -> Result<String> {
        let mut header = Header::new(Algorithm::ES256);
        header.kid = Some(key_id.to_string());

        encode(&header, self, key.encoding_key()).map_err(ApnsError::Signing)
    }
}

/// A signed, cached provider token together with its generation timestamp.
///
/// Staleness is judged on wall-clock time elapsed since generation, never on
/// how many sends used the token.
#[derive(Debug, Clone)]
pub struct AuthToken {
    value: String,
    generated_at: SystemTime,
}

impl AuthToken {
    pub fn new(value: String) -> Self {
        Self { value, generated_at: SystemTime::now() }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// A clock that moved backwards yields an unmeasurable elapsed time;
    /// that is treated as stale so the token gets re-signed.
    pub fn is_stale(&self, renewal_interval: Duration) -> bool {
        self.generated_at.elapsed().map_or(true, |elapsed| elapsed > renewal_interval)
    }

    #[cfg(test)]
    pub(crate) fn backdate(&mut self, by: Duration) {
        self.generated_at -= by;
    }
}
