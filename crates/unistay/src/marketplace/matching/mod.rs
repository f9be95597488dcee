//! Match and relevance scoring.
//!
//! Two independent 0-100 signals per user/listing pair: the match score is
//! an absolute compatibility rating safe to compare across sessions; the
//! relevance score is a contextual ranking signal favoring same-university,
//! same-location, and recently posted listings. Both are pure functions of
//! their inputs plus an explicit `now` for recency, and both degrade to zero
//! rather than failing when the essentials (user university, listing
//! location) are absent.

pub mod pipeline;
pub(crate) mod rules;
pub(crate) mod weights;

use crate::directory::UniversityDirectory;
use crate::marketplace::domain::{Listing, RankedListing, SortStrategy, UserProfile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The five weighted dimensions of the match rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFactor {
    UniversityProximity,
    Budget,
    RoomType,
    Lifestyle,
    Amenities,
}

/// Discrete contribution to a match score, kept so results can be explained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: MatchFactor,
    pub points: f64,
    pub notes: String,
}

/// Full scoring output: the component trail plus the normalized total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchBreakdown {
    pub components: Vec<ScoreComponent>,
    pub total: u8,
}

impl MatchBreakdown {
    fn empty() -> Self {
        Self {
            components: Vec::new(),
            total: 0,
        }
    }
}

/// Stateless scorer over the university directory.
pub struct MatchEngine {
    directory: Arc<UniversityDirectory>,
}

impl MatchEngine {
    pub fn new(directory: Arc<UniversityDirectory>) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &UniversityDirectory {
        &self.directory
    }

    /// Absolute compatibility with the component trail. Scores zero when the
    /// user has no university affiliation or the listing has no location.
    pub fn match_breakdown(&self, user: &UserProfile, listing: &Listing) -> MatchBreakdown {
        let Some(university) = user.university.as_deref() else {
            return MatchBreakdown::empty();
        };
        let Some(location) = listing.location.as_ref() else {
            return MatchBreakdown::empty();
        };

        let components = rules::score_rubric(user, university, location, listing, &self.directory);
        let sum: f64 = components.iter().map(|component| component.points).sum();
        let total = ((sum / weights::MAX_TOTAL) * 100.0).round() as u8;

        MatchBreakdown { components, total }
    }

    pub fn match_score(&self, user: &UserProfile, listing: &Listing) -> u8 {
        self.match_breakdown(user, listing).total
    }

    /// Contextual ranking signal; the default sort key for browsing and the
    /// fixed sort key for recommendations.
    pub fn relevance_score(&self, user: &UserProfile, listing: &Listing, now: DateTime<Utc>) -> u8 {
        rules::relevance(user, listing, now)
    }

    /// Attach both scores to copies of the given listings. Inputs are never
    /// mutated; the annotation lives for one ranking pass.
    pub fn annotate(
        &self,
        user: &UserProfile,
        listings: Vec<Listing>,
        now: DateTime<Utc>,
    ) -> Vec<RankedListing> {
        listings
            .into_iter()
            .map(|listing| {
                let match_score = self.match_score(user, &listing);
                let relevance_score = self.relevance_score(user, &listing, now);
                RankedListing {
                    listing,
                    match_score: Some(match_score),
                    relevance_score: Some(relevance_score),
                }
            })
            .collect()
    }

    /// Filter, score, and rank: the bounded top-N recommendation list.
    /// Recommendations are always relevance-first; the strategy is not a
    /// parameter on purpose.
    pub fn recommendations(
        &self,
        user: &UserProfile,
        listings: &[Listing],
        limit: usize,
        now: DateTime<Utc>,
    ) -> Vec<RankedListing> {
        let filtered = pipeline::filter_listings_for_user(user, listings);
        let ranked = self.annotate(user, filtered, now);
        let mut sorted = pipeline::sort_listings(&ranked, SortStrategy::Relevance, Some(user));
        sorted.truncate(limit);
        sorted
    }
}
