use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

/// A fully assembled outbound notification request.
#[derive(Debug, Clone)]
pub struct PushRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

/// The provider response, with header names lowercased by the transport.
#[derive(Debug, Clone)]
pub struct PushResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl PushResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// The HTTP/2 transport the provider dispatches through.
///
/// APNs expects long-lived HTTP/2 connections, so implementations are
/// expected to reuse connections across calls. Timeouts and retries are the
/// caller's concern, not the transport's.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    async fn send(&self, request: PushRequest) -> Result<PushResponse>;
}
