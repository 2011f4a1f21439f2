//! Provider response envelopes and their normalization into [`Identity`].

use crate::error::{SocialError, SocialResult};
use ras_identity_core::{Identity, Provider};
use serde::{Deserialize, Deserializer, Serialize};

/// Graph API `/me` response.
///
/// Facebook reports failures as an `error` object inside the body, sometimes
/// with a 200 status, so [`FacebookResponse::into_identity`] checks it before
/// reading any user field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacebookResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub picture: FacebookPicture,
    pub birthday: String,
    #[serde(deserialize_with = "null_as_default")]
    pub error: FacebookApiError,
}

/// `null` decodes like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacebookPicture {
    pub data: FacebookPictureData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacebookPictureData {
    pub url: String,
}

/// In-band Graph API error object. Empty `message` means no error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacebookApiError {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub code: i64,
    pub error_subcode: i64,
    pub fbtrace_id: String,
}

impl FacebookApiError {
    pub fn is_present(&self) -> bool {
        !self.message.is_empty()
    }

    fn details(&self) -> Option<String> {
        let mut parts = Vec::new();
        if !self.kind.is_empty() {
            parts.push(format!("type={}", self.kind));
        }
        if self.code != 0 {
            parts.push(format!("code={}", self.code));
        }
        if self.error_subcode != 0 {
            parts.push(format!("subcode={}", self.error_subcode));
        }
        if !self.fbtrace_id.is_empty() {
            parts.push(format!("fbtrace_id={}", self.fbtrace_id));
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

impl FacebookResponse {
    /// Fails with the embedded error when there is one, otherwise normalizes.
    pub fn into_identity(self) -> SocialResult<Identity> {
        if self.error.is_present() {
            return Err(SocialError::ProviderApi {
                provider: Provider::Facebook,
                details: self.error.details(),
                message: self.error.message,
            });
        }

        Ok(Identity {
            provider_id: self.id,
            email: self.email,
            name: self.name,
        })
    }
}

/// Google OpenID Connect userinfo response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleResponse {
    pub sub: String,
    pub email: String,
    pub name: String,
}

impl From<GoogleResponse> for Identity {
    fn from(response: GoogleResponse) -> Self {
        Identity {
            provider_id: response.sub,
            email: response.email,
            name: response.name,
        }
    }
}
