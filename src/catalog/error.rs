use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog download failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("catalog file read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Satellite '{0}' not found!")]
    SatelliteNotFound(String),
    #[error("catalog entry for '{0}' is missing its element lines")]
    TruncatedEntry(String),
}
