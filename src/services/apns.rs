use crate::adapters::http::HttpTransport;
use crate::config::ApnsConfig;
use crate::domain::notification::Notification;
use crate::domain::payload;
use crate::domain::signing::SigningKey;
use crate::error::{ApnsError, Result};
use crate::services::token::TokenService;
use crate::services::transport::{PushRequest, Transport};
use opentelemetry::{KeyValue, global, metrics::Counter};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug)]
struct Metrics {
    sends_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("apns-provider");
        Self {
            sends_total: meter
                .u64_counter("apns_push_sends_total")
                .with_description("Total notification send attempts by outcome")
                .build(),
        }
    }
}

/// Error body APNs returns alongside failure status codes.
#[derive(Debug, Deserialize)]
struct RejectionBody {
    reason: String,
}

/// The APNs provider: builds token-authenticated HTTP/2 requests, dispatches
/// them through the transport, and interprets the response.
#[derive(Debug)]
pub struct ApnsProvider {
    token_service: TokenService,
    transport: Arc<dyn Transport>,
    topic: String,
    host: String,
    max_payload_bytes: usize,
    metrics: Metrics,
}

impl ApnsProvider {
    /// Creates a provider from configuration, with an optional transport
    /// override (tests inject a mock here; production uses the default
    /// HTTP/2 adapter).
    ///
    /// # Errors
    /// Returns [`ApnsError::KeyImport`] if the signing key cannot be
    /// imported and [`ApnsError::InvalidRenewalInterval`] if the renewal
    /// interval is out of range. Both are fatal; no provider is built.
    pub fn new(config: &ApnsConfig, transport: Option<Arc<dyn Transport>>) -> Result<Self> {
        let key = SigningKey::from_pem(&config.signing_key_pem)?;
        let token_service = TokenService::new(
            key,
            config.team_id.clone(),
            config.key_id.clone(),
            config.renewal_interval_mins,
        )?;

        let transport = match transport {
            Some(t) => t,
            None => Arc::new(HttpTransport::new()?),
        };

        tracing::info!(
            topic = %config.topic,
            host = %config.host,
            renewal_mins = config.renewal_interval_mins,
            "Initialized APNs provider"
        );

        Ok(Self {
            token_service,
            transport,
            topic: config.topic.clone(),
            host: config.host.clone(),
            max_payload_bytes: config.max_payload_bytes,
            metrics: Metrics::new(),
        })
    }

    /// Sends an alert notification to a device and returns the
    /// provider-assigned notification identifier.
    ///
    /// Each call is a single attempt; retry and backoff policy belong to the
    /// caller. A payload over the size ceiling fails before any network
    /// activity.
    ///
    /// # Errors
    /// Returns [`ApnsError::Rejected`] when APNs answers with a failure
    /// status, [`ApnsError::MissingApnsId`] when a success response carries
    /// no parsable `apns-id` header, and payload or transport errors
    /// otherwise.
    #[tracing::instrument(
        skip_all,
        fields(device = %device_prefix(device_token), apns_id = tracing::field::Empty)
    )]
    pub async fn send_alert(&self, notification: &Notification, device_token: &str) -> Result<Uuid> {
        let token = self.token_service.token().await?;
        let body = payload::encode_alert(notification, self.max_payload_bytes)?;

        // A fresh request id per attempt lets callers correlate their own
        // retries; it is independent of the apns-id the response carries.
        let request_id = Uuid::new_v4();
        tracing::Span::current().record("apns_id", tracing::field::display(request_id));

        let request = PushRequest {
            url: format!("https://{}:443/3/device/{}", self.host, device_token),
            headers: vec![
                ("authorization", format!("bearer {token}")),
                ("apns-push-type", "alert".to_string()),
                ("apns-id", request_id.to_string()),
                ("apns-topic", self.topic.clone()),
                ("apns-expiration", "0".to_string()),
                ("content-type", "application/json".to_string()),
            ],
            body,
        };

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                self.metrics.sends_total.add(1, &[KeyValue::new("status", "error")]);
                return Err(e);
            }
        };

        if response.status >= 400 {
            let reason =
                serde_json::from_slice::<RejectionBody>(&response.body).ok().map(|b| b.reason);
            self.metrics.sends_total.add(1, &[KeyValue::new("status", "rejected")]);
            tracing::warn!(
                status = response.status,
                reason = reason.as_deref().unwrap_or("unknown"),
                "APNs rejected the notification"
            );
            return Err(ApnsError::Rejected { status: response.status, reason });
        }

        match response.header("apns-id").and_then(|value| Uuid::parse_str(value).ok()) {
            Some(id) => {
                self.metrics.sends_total.add(1, &[KeyValue::new("status", "sent")]);
                tracing::debug!(response_apns_id = %id, "Notification accepted by APNs");
                Ok(id)
            }
            None => {
                self.metrics.sends_total.add(1, &[KeyValue::new("status", "missing_id")]);
                tracing::error!(
                    status = response.status,
                    "APNs accepted the notification but returned no parsable apns-id header"
                );
                Err(ApnsError::MissingApnsId(response.status))
            }
        }
    }
}

fn device_prefix(device_token: &str) -> String {
    device_token.chars().take(8).collect()
}
