//! Sign in with Apple.
//!
//! Apple has no static client secret. Every exchange mints a fresh ES256
//! client assertion signed with the developer's private key, posts it with the
//! authorization code to the token endpoint, and reads the user from the
//! claims of the returned `id_token`.

use crate::config::SocialConfig;
use crate::error::{SocialError, SocialResult};
use crate::http::HttpTransport;
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ras_identity_core::{Identity, Provider};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Audience of the client assertion, Apple's OIDC issuer.
pub const APPLE_AUDIENCE: &str = "https://appleid.apple.com";

/// Lifetime of a client assertion: 180 days, the longest Apple accepts.
pub const CLIENT_SECRET_TTL_SECONDS: i64 = 180 * 24 * 60 * 60;

/// Private key used to sign client assertions.
#[derive(Clone)]
pub enum SigningKeyInput {
    /// PEM block holding a PKCS8 EC private key, e.g. the contents of a `.p8` file.
    Pem(Vec<u8>),
    /// A key that has already been parsed.
    Parsed(EncodingKey),
}

impl SigningKeyInput {
    pub fn from_pem(pem: impl Into<Vec<u8>>) -> Self {
        SigningKeyInput::Pem(pem.into())
    }

    fn encoding_key(&self) -> SocialResult<Cow<'_, EncodingKey>> {
        match self {
            SigningKeyInput::Pem(pem) => EncodingKey::from_ec_pem(pem)
                .map(Cow::Owned)
                .map_err(SocialError::KeyParse),
            SigningKeyInput::Parsed(key) => Ok(Cow::Borrowed(key)),
        }
    }
}

impl From<EncodingKey> for SigningKeyInput {
    fn from(key: EncodingKey) -> Self {
        SigningKeyInput::Parsed(key)
    }
}

impl fmt::Debug for SigningKeyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SigningKeyInput::Pem(_) => f.write_str("Pem(<redacted>)"),
            SigningKeyInput::Parsed(_) => f.write_str("Parsed(<redacted>)"),
        }
    }
}

/// Developer account material for Sign in with Apple.
#[derive(Debug, Clone)]
pub struct AppleCredentials {
    /// Services ID (or bundle ID) the code was issued to.
    pub client_id: String,
    pub team_id: String,
    /// Identifier of the signing key, sent as the `kid` header.
    pub key_id: String,
    pub signing_key: SigningKeyInput,
}

impl AppleCredentials {
    pub fn new(
        client_id: impl Into<String>,
        team_id: impl Into<String>,
        key_id: impl Into<String>,
        signing_key: impl Into<SigningKeyInput>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            team_id: team_id.into(),
            key_id: key_id.into(),
            signing_key: signing_key.into(),
        }
    }
}

/// Claims of the client assertion sent as `client_secret`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientAssertionClaims {
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub aud: String,
    pub sub: String,
}

impl ClientAssertionClaims {
    pub fn new(team_id: &str, client_id: &str, issued_at: DateTime<Utc>) -> Self {
        let iat = issued_at.timestamp();

        Self {
            iss: team_id.to_string(),
            iat,
            exp: iat + CLIENT_SECRET_TTL_SECONDS,
            aud: APPLE_AUDIENCE.to_string(),
            sub: client_id.to_string(),
        }
    }
}

/// Sign a client assertion issued at `issued_at`.
pub fn mint_client_secret(
    credentials: &AppleCredentials,
    issued_at: DateTime<Utc>,
) -> SocialResult<String> {
    let key = credentials.signing_key.encoding_key()?;

    let mut header = Header::new(Algorithm::ES256);
    header.kid = Some(credentials.key_id.clone());

    let claims =
        ClientAssertionClaims::new(&credentials.team_id, &credentials.client_id, issued_at);

    // PEM parsing only checks the envelope; the key material is read at signing.
    encode(&header, &claims, &key).map_err(|e| {
        if matches!(e.kind(), ErrorKind::InvalidEcdsaKey) {
            SocialError::KeyParse(e)
        } else {
            SocialError::Signing(e)
        }
    })
}

/// Read the claims of a compact token without checking its signature, expiry,
/// issuer or audience.
pub fn parse_unverified_claims(token: &str) -> SocialResult<Map<String, Value>> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.required_spec_claims = HashSet::new();

    decode::<Map<String, Value>>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| SocialError::TokenDecode(e.to_string()))
}

pub(crate) async fn fetch_identity(
    transport: &dyn HttpTransport,
    config: &SocialConfig,
    authorization_code: &str,
    credentials: &AppleCredentials,
) -> SocialResult<Identity> {
    if config.apple_redirect_uri.is_empty() {
        return Err(SocialError::Config(
            "Apple redirect URI not configured".to_string(),
        ));
    }

    let client_secret = mint_client_secret(credentials, Utc::now())?;
    let claims = exchange_code(
        transport,
        config,
        &credentials.client_id,
        &client_secret,
        authorization_code,
    )
    .await?;

    let identity = identity_from_claims(&claims)?;
    debug!(
        "Resolved Apple identity for subject: {}",
        identity.provider_id
    );
    Ok(identity)
}

/// Trade an authorization code for the claims of Apple's ID token.
async fn exchange_code(
    transport: &dyn HttpTransport,
    config: &SocialConfig,
    client_id: &str,
    client_secret: &str,
    code: &str,
) -> SocialResult<Map<String, Value>> {
    let form = [
        ("client_id", client_id),
        ("client_secret", client_secret),
        ("code", code),
        ("grant_type", "authorization_code"),
        ("redirect_uri", config.apple_redirect_uri.as_str()),
    ];

    debug!(client_id, "Exchanging Apple authorization code");
    let response = transport
        .post_form(&config.apple_token_endpoint, &form)
        .await?;

    // Apple reports rejected codes as an `error` body with a 4xx status.
    let body: Map<String, Value> = match response.json(Provider::Apple) {
        Ok(body) => body,
        Err(e) => {
            response.error_for_status(Provider::Apple)?;
            return Err(e);
        }
    };

    if let Some(error) = body.get("error") {
        return Err(SocialError::ProviderApi {
            provider: Provider::Apple,
            message: json_text(error),
            details: body.get("error_description").map(json_text),
        });
    }

    response.error_for_status(Provider::Apple)?;

    let id_token = body
        .get("id_token")
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .ok_or(SocialError::MissingField {
            provider: Provider::Apple,
            field: "id_token",
        })?;

    parse_unverified_claims(id_token)
}

fn identity_from_claims(claims: &Map<String, Value>) -> SocialResult<Identity> {
    let sub = claims
        .get("sub")
        .and_then(Value::as_str)
        .filter(|sub| !sub.is_empty())
        .ok_or(SocialError::MissingField {
            provider: Provider::Apple,
            field: "sub",
        })?;

    // Apple only includes email when the scope was granted.
    let email = claims
        .get("email")
        .and_then(Value::as_str)
        .unwrap_or_default();

    Ok(Identity {
        provider_id: sub.to_string(),
        email: email.to_string(),
        name: String::new(),
    })
}

fn json_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
