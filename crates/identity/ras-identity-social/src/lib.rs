//! Social sign-in identity resolution.
//!
//! Turns a Google or Facebook access token, or a Sign in with Apple
//! authorization code, into a canonical [`Identity`]. Each call is a fresh,
//! independent round trip to the provider: nothing is cached or retried, and
//! every failure is returned to the caller as a [`SocialError`].
//!
//! The Apple ID token is read without verifying its signature. It arrives in
//! the direct response of the token endpoint, so its claims are trusted as
//! part of that response. Callers that need verification against Apple's
//! published keys must add it on top.

mod apple;
mod client;
mod config;
mod error;
mod facebook;
mod google;
mod http;
mod types;

#[cfg(test)]
mod fixtures;

pub use apple::{
    APPLE_AUDIENCE, AppleCredentials, CLIENT_SECRET_TTL_SECONDS, ClientAssertionClaims,
    SigningKeyInput, mint_client_secret, parse_unverified_claims,
};
pub use client::SocialIdentityClient;
pub use config::SocialConfig;
pub use error::{SocialError, SocialResult};
pub use http::{HttpResponse, HttpTransport, ReqwestTransport};
pub use types::{
    FacebookApiError, FacebookPicture, FacebookPictureData, FacebookResponse, GoogleResponse,
};

// Re-export common types for convenience
pub use ras_identity_core::{Identity, IdentityResolver, Provider};
