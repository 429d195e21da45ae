use thiserror::Error;

use crate::domain::token::{MAX_RENEWAL_MINS, MIN_RENEWAL_MINS};

#[derive(Error, Debug)]
pub enum ApnsError {
    #[error("Failed to import signing key: {0}")]
    KeyImport(#[source] jsonwebtoken::errors::Error),
    #[error(
        "Token renewal interval must be between {MIN_RENEWAL_MINS} and {MAX_RENEWAL_MINS} minutes, got {0}"
    )]
    InvalidRenewalInterval(u64),
    #[error("Encoded payload is {size} bytes, limit is {limit}")]
    PayloadTooLarge { size: usize, limit: usize },
    #[error("Custom data key {0:?} collides with a reserved payload field")]
    ReservedKey(String),
    #[error("Failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Failed to sign authentication token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
    #[error("APNs rejected the notification with status {status}: {}", reason.as_deref().unwrap_or("no reason given"))]
    Rejected { status: u16, reason: Option<String> },
    #[error("APNs response (status {0}) is missing a parsable apns-id header")]
    MissingApnsId(u16),
    #[error("Transport error: {0}")]
    Transport(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ApnsError>;
