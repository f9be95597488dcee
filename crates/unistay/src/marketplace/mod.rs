//! Marketplace engine: data model, scoring, pipelines, and the embeddable
//! HTTP router.

pub mod domain;
pub mod geo;
pub mod matching;
pub mod repository;
pub mod router;
pub mod search;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    BudgetRange, Coordinates, GenderPreference, HostSummary, LifestylePreferences, Listing,
    ListingId, ListingLocation, ListingStatus, MatchingPreferences, NearbyUniversity, PriceRange,
    RankedListing, RoomType, SearchFilters, SocialLevel, SortStrategy, UniversityFilter, UserId,
    UserLocation, UserProfile, UtilitiesInfo,
};
pub use matching::pipeline::{filter_listings_for_user, sort_listings};
pub use matching::{MatchBreakdown, MatchEngine, MatchFactor, ScoreComponent};
pub use repository::{ListingRepository, RepositoryError};
pub use router::{marketplace_router, ListingView};
pub use search::{browse, SearchError};
pub use service::{MarketplaceService, MarketplaceServiceError, MatchReport};
