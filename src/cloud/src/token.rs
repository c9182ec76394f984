use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::CloudError;
use crate::error::Result;

const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub expires_in: u64,
}

/// Fetches an access token for the ambient service identity from the GCE
/// metadata server. Only works on GCP compute.
pub async fn fetch_access_token(client: &Client) -> Result<AccessToken> {
    let resp = client
        .get(METADATA_TOKEN_URL)
        .header("Metadata-Flavor", "Google")
        .send()
        .await?;

    if !resp.status().is_success() {
        return Err(CloudError::Upstream {
            status: resp.status().as_u16(),
            body: resp.text().await?,
        });
    }

    let token = resp.json::<AccessToken>().await?;
    debug!("obtained access token, expires in {}s", token.expires_in);

    Ok(token)
}
