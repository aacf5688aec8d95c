use super::domain::Directory;

/// External collaborator seam: whatever system authors and stores the
/// directory catalog. The registry reduces every failure here to
/// "keep the previous snapshot", so implementations are free to fail.
pub trait CatalogProvider: Send + Sync {
    fn fetch_directory_catalog(&self) -> Result<Vec<Directory>, CatalogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog provider unavailable: {0}")]
    Unavailable(String),
    #[error("catalog payload malformed: {0}")]
    Malformed(String),
}
