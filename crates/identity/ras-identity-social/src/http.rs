//! HTTP transport used by the provider adapters.

use crate::error::{SocialError, SocialResult};
use async_trait::async_trait;
use ras_identity_core::Provider;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::trace;

/// Status and fully read body of a provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Turn a non-2xx response into [`SocialError::ProviderHttp`] without
    /// decoding the body.
    pub fn error_for_status(self, provider: Provider) -> SocialResult<Self> {
        if self.is_success() {
            return Ok(self);
        }

        Err(SocialError::ProviderHttp {
            provider,
            status: self.status,
            body: self.text(),
        })
    }

    pub fn json<T: DeserializeOwned>(&self, provider: Provider) -> SocialResult<T> {
        serde_json::from_slice(&self.body).map_err(|source| SocialError::Decode { provider, source })
    }
}

/// Minimal request capability the adapters need.
///
/// Implementations read the whole body before returning, so no connection or
/// stream outlives the call.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> SocialResult<HttpResponse>;

    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> SocialResult<HttpResponse>;
}

/// [`HttpTransport`] backed by a shared `reqwest` client.
#[derive(Clone)]
pub struct ReqwestTransport {
    http_client: Client,
}

impl ReqwestTransport {
    pub fn new(http_timeout_seconds: u64) -> SocialResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(http_timeout_seconds))
            .build()?;

        Ok(Self { http_client })
    }

    pub fn from_client(http_client: Client) -> Self {
        Self { http_client }
    }

    async fn read(response: reqwest::Response) -> SocialResult<HttpResponse> {
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        trace!(status, bytes = body.len(), "Read provider response");
        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> SocialResult<HttpResponse> {
        let response = self.http_client.get(url).query(query).send().await?;
        Self::read(response).await
    }

    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> SocialResult<HttpResponse> {
        let response = self.http_client.post(url).form(form).send().await?;
        Self::read(response).await
    }
}
