use apns_provider::config::ApnsConfig;
use std::sync::Once;

pub const P256_PEM: &str = include_str!("fixtures/p256.pem");

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("apns_provider=debug".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).init();
    });
}

#[allow(dead_code)]
pub fn test_config() -> ApnsConfig {
    ApnsConfig {
        team_id: "ABC123WXYZ".to_string(),
        key_id: "DEF456".to_string(),
        signing_key_pem: P256_PEM.to_string(),
        topic: "com.example.app".to_string(),
        host: "api.sandbox.push.apple.com".to_string(),
        renewal_interval_mins: 45,
        max_payload_bytes: 4096,
    }
}
