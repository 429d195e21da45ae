use crate::domain::signing::SigningKey;
use crate::domain::token::{AuthToken, Claims, MAX_RENEWAL_MINS, MIN_RENEWAL_MINS};
use crate::error::{ApnsError, Result};
use opentelemetry::{global, metrics::Counter};
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Debug)]
struct Metrics {
    renewals_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("apns-provider");
        Self {
            renewals_total: meter
                .u64_counter("apns_token_renewals_total")
                .with_description("Total number of auth token signings")
                .build(),
        }
    }
}

/// Generates and caches the signed APNs provider authentication token.
///
/// The service is the sole owner and mutator of the cached token. The cache
/// is a critical section: concurrent sends near the staleness boundary
/// observe either the pre- or post-renewal token, and renewal is never
/// performed twice for the same expiry.
#[derive(Debug)]
pub struct TokenService {
    key: SigningKey,
    team_id: String,
    key_id: String,
    renewal_interval: Duration,
    cached: Mutex<Option<AuthToken>>,
    metrics: Metrics,
}

impl TokenService {
    /// # Errors
    /// Returns [`ApnsError::InvalidRenewalInterval`] when `renewal_mins` is
    /// outside [20, 59]. Out-of-range values are rejected, never clamped.
    pub fn new(key: SigningKey, team_id: String, key_id: String, renewal_mins: u64) -> Result<Self> {
        if !(MIN_RENEWAL_MINS..=MAX_RENEWAL_MINS).contains(&renewal_mins) {
            return Err(ApnsError::InvalidRenewalInterval(renewal_mins));
        }

        Ok(Self {
            key,
            team_id,
            key_id,
            renewal_interval: Duration::from_secs(renewal_mins * 60),
            cached: Mutex::new(None),
            metrics: Metrics::new(),
        })
    }

    /// Returns the current auth token, re-signing it only when no token
    /// exists yet or the cached one has outlived the renewal interval.
    ///
    /// # Errors
    /// Returns [`ApnsError::Signing`] if token generation fails.
    pub async fn token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref()
            && !token.is_stale(self.renewal_interval)
        {
            return Ok(token.value().to_string());
        }

        let claims = Claims::new(&self.team_id);
        let value = claims.encode(&self.key, &self.key_id)?;
        tracing::debug!(iat = claims.iat, "Signed a fresh APNs auth token");
        self.metrics.renewals_total.add(1, &[]);

        *cached = Some(AuthToken::new(value.clone()));
        Ok(value)
    }

    #[cfg(test)]
    pub(crate) async fn backdate_cached(&self, by: Duration) {
        if let Some(token) = self.cached.lock().await.as_mut() {
            token.backdate(by);
        }
    }
}
