//! Google userinfo lookup.

use crate::config::SocialConfig;
use crate::error::SocialResult;
use crate::http::HttpTransport;
use crate::types::GoogleResponse;
use ras_identity_core::{Identity, Provider};
use tracing::debug;

pub(crate) async fn fetch_identity(
    transport: &dyn HttpTransport,
    config: &SocialConfig,
    access_token: &str,
) -> SocialResult<Identity> {
    debug!("Requesting Google userinfo");
    let response = transport
        .get(
            &config.google_userinfo_endpoint,
            &[("access_token", access_token)],
        )
        .await?
        .error_for_status(Provider::Google)?;

    // No in-band error object on this endpoint: a decodable body is an identity.
    let envelope: GoogleResponse = response.json(Provider::Google)?;
    let identity = Identity::from(envelope);

    debug!(
        "Resolved Google identity for subject: {}",
        identity.provider_id
    );
    Ok(identity)
}
