//! Social identity configuration.

use crate::error::{SocialError, SocialResult};
use serde::{Deserialize, Serialize};
use url::Url;

pub const APPLE_TOKEN_ENDPOINT: &str = "https://appleid.apple.com/auth/token";
pub const FACEBOOK_GRAPH_ENDPOINT: &str = "https://graph.facebook.com/me";
pub const GOOGLE_USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

/// Provider endpoints and transport settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialConfig {
    pub apple_token_endpoint: String,
    /// Must exactly match the redirect URI registered for the Apple service ID.
    pub apple_redirect_uri: String,
    pub facebook_graph_endpoint: String,
    /// Graph API fields requested for the signed-in user
    pub facebook_fields: Vec<String>,
    pub google_userinfo_endpoint: String,
    pub http_timeout_seconds: u64,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            apple_token_endpoint: APPLE_TOKEN_ENDPOINT.to_string(),
            apple_redirect_uri: String::new(),
            facebook_graph_endpoint: FACEBOOK_GRAPH_ENDPOINT.to_string(),
            facebook_fields: vec!["name".to_string(), "email".to_string()],
            google_userinfo_endpoint: GOOGLE_USERINFO_ENDPOINT.to_string(),
            http_timeout_seconds: 30,
        }
    }
}

impl SocialConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_apple_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.apple_redirect_uri = redirect_uri.into();
        self
    }

    pub fn with_apple_token_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.apple_token_endpoint = endpoint.into();
        self
    }

    pub fn with_facebook_graph_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.facebook_graph_endpoint = endpoint.into();
        self
    }

    pub fn with_facebook_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.facebook_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_google_userinfo_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.google_userinfo_endpoint = endpoint.into();
        self
    }

    pub fn with_http_timeout(mut self, seconds: u64) -> Self {
        self.http_timeout_seconds = seconds;
        self
    }

    /// Point every provider endpoint at one base URL, keeping the real paths.
    /// Used against mock servers.
    pub fn with_base_url(self, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        self.with_apple_token_endpoint(format!("{base}/auth/token"))
            .with_facebook_graph_endpoint(format!("{base}/me"))
            .with_google_userinfo_endpoint(format!("{base}/oauth2/v3/userinfo"))
    }

    /// Check that every configured endpoint is an absolute URL.
    pub fn validate(&self) -> SocialResult<()> {
        Url::parse(&self.apple_token_endpoint)?;
        Url::parse(&self.facebook_graph_endpoint)?;
        Url::parse(&self.google_userinfo_endpoint)?;

        if !self.apple_redirect_uri.is_empty() {
            Url::parse(&self.apple_redirect_uri)?;
        }

        if self.http_timeout_seconds == 0 {
            return Err(SocialError::Config(
                "HTTP timeout must be at least one second".to_string(),
            ));
        }

        Ok(())
    }
}
