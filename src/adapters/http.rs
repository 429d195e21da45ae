use crate::error::Result;
use crate::services::transport::{PushRequest, PushResponse, Transport};
use async_trait::async_trait;
use std::collections::HashMap;

/// Default transport: a pooled `reqwest` client pinned to HTTP/2.
///
/// APNs refuses HTTP/1.1, so the client is built with prior knowledge rather
/// than relying on ALPN negotiation. Connections are reused across sends.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// # Errors
    /// Returns a transport error if the underlying client cannot be built.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .http2_prior_knowledge()
            .build()
            .map_err(anyhow::Error::from)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: PushRequest) -> Result<PushResponse> {
        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }

        let response = builder.body(request.body).send().await.map_err(anyhow::Error::from)?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value.to_str().ok().map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await.map_err(anyhow::Error::from)?;

        Ok(PushResponse { status, headers, body })
    }
}
