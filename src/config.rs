use crate::domain::payload::DEFAULT_MAX_PAYLOAD_BYTES;
use clap::Args;

/// Configuration for an APNs provider instance.
///
/// Designed to be `#[command(flatten)]`-ed into the embedding application's
/// top-level parser, so every field can also come from the environment.
#[derive(Clone, Debug, Args)]
pub struct ApnsConfig {
    /// Apple Developer team identifier (the `iss` claim of the auth token)
    #[arg(long, env = "APNS_TEAM_ID")]
    pub team_id: String,

    /// Identifier of the signing key registered with Apple
    #[arg(long, env = "APNS_KEY_ID")]
    pub key_id: String,

    /// PEM-encoded PKCS8 P-256 private key used to sign auth tokens
    #[arg(long, env = "APNS_SIGNING_KEY", hide_env_values = true)]
    pub signing_key_pem: String,

    /// App bundle identifier, sent as the apns-topic header
    #[arg(long, env = "APNS_TOPIC")]
    pub topic: String,

    /// APNs host to send notifications to
    #[arg(long, env = "APNS_HOST", default_value = "api.sandbox.push.apple.com")]
    pub host: String,

    /// How long a signed auth token is reused before renewal, in minutes.
    /// APNs requires renewal no more often than every 20 minutes and no
    /// less often than every 60, so values outside [20, 59] are rejected.
    #[arg(long, env = "APNS_TOKEN_RENEWAL_MINS", default_value_t = 45)]
    pub renewal_interval_mins: u64,

    /// Maximum encoded payload size in bytes (VoIP pushes may raise this to 5120)
    #[arg(long, env = "APNS_MAX_PAYLOAD_BYTES", default_value_t = DEFAULT_MAX_PAYLOAD_BYTES)]
    pub max_payload_bytes: usize,
}
