//! Entry point routing credentials to the provider adapters.

use crate::apple::{self, AppleCredentials};
use crate::config::SocialConfig;
use crate::error::{SocialError, SocialResult};
use crate::facebook;
use crate::google;
use crate::http::{HttpTransport, ReqwestTransport};
use async_trait::async_trait;
use ras_identity_core::{Identity, IdentityResolver, Provider};
use std::sync::Arc;
use tracing::debug;

/// Resolves social sign-in credentials into identities.
///
/// Holds no per-call state, so one client can serve concurrent resolutions.
#[derive(Clone)]
pub struct SocialIdentityClient {
    config: SocialConfig,
    transport: Arc<dyn HttpTransport>,
}

impl SocialIdentityClient {
    /// Client using a `reqwest` transport with the configured timeout.
    pub fn new(config: SocialConfig) -> SocialResult<Self> {
        let transport = ReqwestTransport::new(config.http_timeout_seconds)?;
        Self::with_transport(config, Arc::new(transport))
    }

    pub fn with_transport(
        config: SocialConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> SocialResult<Self> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &SocialConfig {
        &self.config
    }

    pub async fn resolve_google(&self, access_token: &str) -> SocialResult<Identity> {
        google::fetch_identity(self.transport.as_ref(), &self.config, access_token).await
    }

    pub async fn resolve_facebook(&self, access_token: &str) -> SocialResult<Identity> {
        facebook::fetch_identity(self.transport.as_ref(), &self.config, access_token).await
    }

    /// Exchange a Sign in with Apple authorization code.
    pub async fn resolve_apple(
        &self,
        authorization_code: &str,
        credentials: &AppleCredentials,
    ) -> SocialResult<Identity> {
        apple::fetch_identity(
            self.transport.as_ref(),
            &self.config,
            authorization_code,
            credentials,
        )
        .await
    }

    /// Resolve an access token for a provider that accepts one directly.
    ///
    /// Apple needs developer credentials and an authorization code, so it goes
    /// through [`SocialIdentityClient::resolve_apple`] and is rejected here
    /// along with the reserved `Email` provider.
    pub async fn resolve(&self, provider: Provider, access_token: &str) -> SocialResult<Identity> {
        debug!("Resolving identity for provider: {}", provider);

        match provider {
            Provider::Google => self.resolve_google(access_token).await,
            Provider::Facebook => self.resolve_facebook(access_token).await,
            Provider::Apple | Provider::Email => Err(SocialError::UnsupportedProvider(provider)),
        }
    }
}

#[async_trait]
impl IdentityResolver for SocialIdentityClient {
    type Error = SocialError;

    async fn resolve(&self, provider: Provider, credential: &str) -> SocialResult<Identity> {
        SocialIdentityClient::resolve(self, provider, credential).await
    }
}
