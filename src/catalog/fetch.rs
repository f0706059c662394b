use std::fs;
use std::path::Path;

use crate::catalog::CatalogError;

/// Download a plaintext element catalog. The body is returned whatever the
/// HTTP status; a missing entry is reported later by the lookup.
pub async fn fetch_catalog(url: &str) -> Result<String, CatalogError> {
    let client = reqwest::Client::builder()
        .user_agent(format!("sky-track/{}", env!("CARGO_PKG_VERSION")))
        .build()?;

    log::info!("Fetching element catalog from {}", url);
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        log::warn!("Catalog request to {} returned {}", url, status);
    }

    let body = response.text().await?;
    log::debug!("Catalog has {} lines", body.lines().count());
    Ok(body)
}

/// Read a catalog saved on disk, in the same three-line format.
pub fn read_catalog(path: &Path) -> Result<String, CatalogError> {
    log::info!("Reading element catalog from {}", path.display());
    Ok(fs::read_to_string(path)?)
}
