//! Core identity types and the resolver trait for social sign-in providers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Sign-in provider a credential was issued by.
///
/// `Email` is reserved: it is part of the model so callers can store it, but no
/// resolver handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Facebook,
    Email,
    Google,
    Apple,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Facebook => "facebook",
            Provider::Email => "email",
            Provider::Google => "google",
            Provider::Apple => "apple",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown provider: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "facebook" => Ok(Provider::Facebook),
            "email" => Ok(Provider::Email),
            "google" => Ok(Provider::Google),
            "apple" => Ok(Provider::Apple),
            _ => Err(UnknownProvider(s.to_string())),
        }
    }
}

/// Canonical user record produced by a successful resolution.
///
/// `provider_id` is only unique within its provider. `email` and `name` are
/// empty when the provider withholds them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub provider_id: String,
    pub email: String,
    pub name: String,
}

impl Identity {
    pub fn has_email(&self) -> bool {
        !self.email.is_empty()
    }
}

/// Turns a provider credential into an [`Identity`].
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn resolve(
        &self,
        provider: Provider,
        credential: &str,
    ) -> Result<Identity, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parsing() {
        assert_eq!("google".parse::<Provider>(), Ok(Provider::Google));
        assert_eq!("Apple".parse::<Provider>(), Ok(Provider::Apple));
        assert_eq!("FACEBOOK".parse::<Provider>(), Ok(Provider::Facebook));
        assert_eq!("email".parse::<Provider>(), Ok(Provider::Email));
        assert_eq!(
            "github".parse::<Provider>(),
            Err(UnknownProvider("github".to_string()))
        );
    }

    #[test]
    fn test_provider_display_matches_serde() {
        for provider in [
            Provider::Facebook,
            Provider::Email,
            Provider::Google,
            Provider::Apple,
        ] {
            let json = serde_json::to_value(provider).unwrap();
            assert_eq!(json, serde_json::Value::String(provider.to_string()));
        }
    }

    #[test]
    fn test_identity_email_presence() {
        let identity = Identity {
            provider_id: "000111".to_string(),
            ..Default::default()
        };
        assert!(!identity.has_email());
        assert!(identity.name.is_empty());
    }
}
