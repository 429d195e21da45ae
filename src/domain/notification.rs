use std::collections::HashMap;

/// An alert-style push notification as supplied by the caller.
///
/// All alert fields are optional; absent fields are omitted from the encoded
/// payload entirely. Custom data keys are merged at the top level of the
/// payload next to `aps`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub body: Option<String>,
    pub custom_data: HashMap<String, String>,
}

impl Notification {
    pub fn alert(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: Some(body.into()),
            ..Self::default()
        }
    }
}
