//! Social identity error types.

use ras_identity_core::Provider;
use thiserror::Error;

pub type SocialResult<T> = Result<T, SocialError>;

#[derive(Debug, Error)]
pub enum SocialError {
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{provider} returned HTTP status {status}")]
    ProviderHttp {
        provider: Provider,
        status: u16,
        /// Raw response text, kept for diagnostics.
        body: String,
    },

    #[error("{provider} API error: {message}{}", fmt_details(.details))]
    ProviderApi {
        provider: Provider,
        message: String,
        details: Option<String>,
    },

    #[error("Invalid {provider} response body: {source}")]
    Decode {
        provider: Provider,
        #[source]
        source: serde_json::Error,
    },

    #[error("{provider} response is missing required field '{field}'")]
    MissingField {
        provider: Provider,
        field: &'static str,
    },

    #[error("Invalid signing key: {0}")]
    KeyParse(#[source] jsonwebtoken::errors::Error),

    #[error("Failed to sign client assertion: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("Invalid ID token: {0}")]
    TokenDecode(String),

    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(Provider),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
}

fn fmt_details(details: &Option<String>) -> String {
    details
        .as_deref()
        .map(|d| format!(" ({d})"))
        .unwrap_or_default()
}

impl SocialError {
    /// Provider the failure is attributable to, if any.
    pub fn provider(&self) -> Option<Provider> {
        match self {
            SocialError::ProviderHttp { provider, .. }
            | SocialError::ProviderApi { provider, .. }
            | SocialError::Decode { provider, .. }
            | SocialError::MissingField { provider, .. }
            | SocialError::UnsupportedProvider(provider) => Some(*provider),
            SocialError::KeyParse(_) | SocialError::Signing(_) | SocialError::TokenDecode(_) => {
                Some(Provider::Apple)
            }
            SocialError::Network(_) | SocialError::Config(_) | SocialError::Url(_) => None,
        }
    }

    /// True when the provider refused the user's credential, as opposed to an
    /// outage, a malformed response or a local misconfiguration.
    pub fn is_credential_rejection(&self) -> bool {
        match self {
            SocialError::ProviderApi { .. } => true,
            SocialError::ProviderHttp { status, .. } => matches!(status, 400 | 401 | 403),
            _ => false,
        }
    }
}
