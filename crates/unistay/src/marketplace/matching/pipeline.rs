//! Filtering and ordering over listing collections.
//!
//! Everything here is snapshot-in, new-collection-out: inputs are never
//! mutated and ordering relies on the stable standard-library sort, so equal
//! keys keep their incoming order.

use crate::marketplace::domain::{
    Coordinates, Listing, RankedListing, SortStrategy, UserProfile,
};
use crate::marketplace::geo::{self, DistanceUnit};
use std::cmp::Ordering;

/// Listings eligible to be shown to `user`: locationless listings and the
/// user's own listings are always dropped, and the user's matching
/// preferences (max distance, same-university requirement, budget range) are
/// applied when present.
pub fn filter_listings_for_user(user: &UserProfile, listings: &[Listing]) -> Vec<Listing> {
    listings
        .iter()
        .filter(|listing| eligible(user, listing))
        .cloned()
        .collect()
}

fn eligible(user: &UserProfile, listing: &Listing) -> bool {
    let Some(location) = listing.location.as_ref() else {
        return false;
    };
    if listing.host.id == user.id {
        return false;
    }

    let Some(prefs) = user.matching_preferences.as_ref() else {
        return true;
    };

    if let Some(max_distance) = prefs.max_distance_miles {
        if let Some(coordinates) = user_coordinates(user) {
            if !location.has_valid_coordinates() {
                return false;
            }
            let miles = geo::distance_between(
                coordinates,
                &location.coordinates(),
                DistanceUnit::Miles,
            );
            if miles > max_distance {
                return false;
            }
        }
    }

    if prefs.same_university_only {
        let satisfied = user.university.as_deref().is_some_and(|university| {
            location
                .nearby_universities
                .iter()
                .any(|nearby| nearby.name == university)
        });
        if !satisfied {
            return false;
        }
    }

    if let Some(range) = prefs.budget_range {
        if !range.contains(listing.total_monthly_cost()) {
            return false;
        }
    }

    true
}

fn user_coordinates(user: &UserProfile) -> Option<&Coordinates> {
    user.location
        .as_ref()
        .and_then(|home| home.coordinates.as_ref())
}

/// Return a newly ordered copy of `listings` under the given strategy.
///
/// Score-based strategies read the annotation attached by
/// `MatchEngine::annotate` and treat missing scores as zero. The distance
/// strategy needs the user's coordinates; without them the input order is
/// returned unchanged rather than erroring.
pub fn sort_listings(
    listings: &[RankedListing],
    strategy: SortStrategy,
    user: Option<&UserProfile>,
) -> Vec<RankedListing> {
    let mut sorted = listings.to_vec();

    match strategy {
        SortStrategy::Relevance => {
            sorted.sort_by(|a, b| b.relevance_rank().cmp(&a.relevance_rank()));
        }
        SortStrategy::Match => {
            sorted.sort_by(|a, b| b.match_rank().cmp(&a.match_rank()));
        }
        SortStrategy::Distance => {
            let Some(coordinates) = user.and_then(user_coordinates) else {
                return sorted;
            };
            sorted.sort_by(|a, b| {
                let da = distance_from(coordinates, &a.listing);
                let db = distance_from(coordinates, &b.listing);
                da.partial_cmp(&db).unwrap_or(Ordering::Equal)
            });
        }
        SortStrategy::PriceAsc => {
            sorted.sort_by(|a, b| a.listing.price.cmp(&b.listing.price));
        }
        SortStrategy::PriceDesc => {
            sorted.sort_by(|a, b| b.listing.price.cmp(&a.listing.price));
        }
        SortStrategy::Newest => {
            sorted.sort_by(|a, b| b.listing.created_at.cmp(&a.listing.created_at));
        }
    }

    sorted
}

fn distance_from(coordinates: &Coordinates, listing: &Listing) -> f64 {
    listing
        .location
        .as_ref()
        .map(|location| {
            geo::distance_between(coordinates, &location.coordinates(), DistanceUnit::Miles)
        })
        .unwrap_or(0.0)
}
