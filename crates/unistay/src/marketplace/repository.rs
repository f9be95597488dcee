use super::domain::{Listing, ListingId};

/// Storage abstraction supplying listing snapshots to the engine. The engine
/// only ever reads; writes exist so hosting layers can maintain the
/// collection the marketplace serves from.
pub trait ListingRepository: Send + Sync {
    fn insert(&self, listing: Listing) -> Result<Listing, RepositoryError>;
    fn update(&self, listing: Listing) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ListingId) -> Result<Option<Listing>, RepositoryError>;
    /// Snapshot of the listings eligible for browsing and recommendations.
    /// Status filtering happens here, upstream of the pipelines.
    fn active(&self) -> Result<Vec<Listing>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("listing already exists")]
    Conflict,
    #[error("listing not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
