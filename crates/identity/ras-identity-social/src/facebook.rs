//! Facebook Graph API profile lookup.

use crate::config::SocialConfig;
use crate::error::SocialResult;
use crate::http::HttpTransport;
use crate::types::FacebookResponse;
use ras_identity_core::{Identity, Provider};
use tracing::debug;

pub(crate) async fn fetch_identity(
    transport: &dyn HttpTransport,
    config: &SocialConfig,
    access_token: &str,
) -> SocialResult<Identity> {
    let fields = config.facebook_fields.join(",");
    let query = [
        ("access_token", access_token),
        ("format", "json"),
        ("fields", fields.as_str()),
    ];

    debug!(fields = %fields, "Requesting Facebook profile");
    let response = transport
        .get(&config.facebook_graph_endpoint, &query)
        .await?
        .error_for_status(Provider::Facebook)?;

    let envelope: FacebookResponse = response.json(Provider::Facebook)?;
    let identity = envelope.into_identity()?;

    debug!(
        "Resolved Facebook identity for subject: {}",
        identity.provider_id
    );
    Ok(identity)
}
