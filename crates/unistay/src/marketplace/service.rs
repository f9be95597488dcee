use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ListingId, RankedListing, SearchFilters, UserProfile};
use super::matching::{MatchEngine, ScoreComponent};
use super::repository::{ListingRepository, RepositoryError};
use super::search;
use crate::directory::UniversityDirectory;

/// Service composing the listing repository with the scorer and pipelines.
///
/// Every entry point fixes "now" once per invocation; the `*_at` variants
/// take the instant explicitly so callers and tests stay reproducible.
pub struct MarketplaceService<R> {
    repository: Arc<R>,
    engine: Arc<MatchEngine>,
    recommendation_limit: usize,
}

impl<R> MarketplaceService<R>
where
    R: ListingRepository + 'static,
{
    pub fn new(
        repository: Arc<R>,
        directory: Arc<UniversityDirectory>,
        recommendation_limit: usize,
    ) -> Self {
        Self {
            repository,
            engine: Arc::new(MatchEngine::new(directory)),
            recommendation_limit,
        }
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    /// Run the browse pipeline over the active-listing snapshot.
    pub fn search(
        &self,
        user: Option<&UserProfile>,
        filters: &SearchFilters,
    ) -> Result<Vec<RankedListing>, MarketplaceServiceError> {
        self.search_at(user, filters, Utc::now())
    }

    pub fn search_at(
        &self,
        user: Option<&UserProfile>,
        filters: &SearchFilters,
        now: DateTime<Utc>,
    ) -> Result<Vec<RankedListing>, MarketplaceServiceError> {
        let listings = self.repository.active()?;
        Ok(search::browse(&self.engine, user, listings, filters, now))
    }

    /// Bounded, relevance-first recommendation list. `limit` falls back to
    /// the configured default when absent.
    pub fn recommendations(
        &self,
        user: &UserProfile,
        limit: Option<usize>,
    ) -> Result<Vec<RankedListing>, MarketplaceServiceError> {
        self.recommendations_at(user, limit, Utc::now())
    }

    pub fn recommendations_at(
        &self,
        user: &UserProfile,
        limit: Option<usize>,
        now: DateTime<Utc>,
    ) -> Result<Vec<RankedListing>, MarketplaceServiceError> {
        let limit = limit.unwrap_or(self.recommendation_limit);
        let listings = self.repository.active()?;
        Ok(self.engine.recommendations(user, &listings, limit, now))
    }

    /// Explainable match report for one listing.
    pub fn match_report(
        &self,
        user: &UserProfile,
        listing_id: &ListingId,
    ) -> Result<MatchReport, MarketplaceServiceError> {
        self.match_report_at(user, listing_id, Utc::now())
    }

    pub fn match_report_at(
        &self,
        user: &UserProfile,
        listing_id: &ListingId,
        now: DateTime<Utc>,
    ) -> Result<MatchReport, MarketplaceServiceError> {
        let listing = self
            .repository
            .fetch(listing_id)?
            .ok_or(RepositoryError::NotFound)?;

        let breakdown = self.engine.match_breakdown(user, &listing);
        let relevance_score = self.engine.relevance_score(user, &listing, now);

        Ok(MatchReport {
            listing_id: listing.id.clone(),
            listing_title: listing.title.clone(),
            match_score: breakdown.total,
            relevance_score,
            components: breakdown.components,
        })
    }
}

/// Scoring summary for one user/listing pair, suitable for API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub listing_id: ListingId,
    pub listing_title: String,
    pub match_score: u8,
    pub relevance_score: u8,
    pub components: Vec<ScoreComponent>,
}

/// Error raised by the marketplace service.
#[derive(Debug, thiserror::Error)]
pub enum MarketplaceServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
