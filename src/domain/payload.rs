use crate::domain::notification::Notification;
use crate::error::{ApnsError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sound played for every alert; badge/category support is out of scope.
pub const DEFAULT_SOUND: &str = "default";

/// Default APNs payload ceiling in bytes. VoIP pushes may use 5120.
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 4096;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
struct Alert {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
struct Aps {
    alert: Alert,
    sound: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
struct Payload {
    aps: Aps,
    #[serde(flatten)]
    custom: HashMap<String, String>,
}

/// Serializes a notification into the APNs alert payload shape.
///
/// The size check is on the UTF-8 byte length of the encoded document, since
/// that is what APNs enforces, not the character count.
///
/// # Errors
/// Returns [`ApnsError::ReservedKey`] if a custom data key collides with
/// `aps`, and [`ApnsError::PayloadTooLarge`] if the encoded document exceeds
/// `limit` bytes.
pub fn encode_alert(notification: &Notification, limit: usize) -> Result<Vec<u8>> {
    if notification.custom_data.contains_key("aps") {
        return Err(ApnsError::ReservedKey("aps".to_string()));
    }

    let payload = Payload {
        aps: Aps {
            alert: Alert {
                title: notification.title.clone(),
                subtitle: notification.subtitle.clone(),
                body: notification.body.clone(),
            },
            sound: DEFAULT_SOUND.to_string(),
        },
        custom: notification.custom_data.clone(),
    };

    let bytes = serde_json::to_vec(&payload)?;
    if bytes.len() > limit {
        return Err(ApnsError::PayloadTooLarge { size: bytes.len(), limit });
    }

    Ok(bytes)
}
