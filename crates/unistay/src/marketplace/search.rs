//! The full browse pipeline: declarative filters over a listing snapshot,
//! then scoring and ordering appropriate to the viewer.
//!
//! Filtering is best-effort by contract. Anything that fails inside the
//! filter pass (today that means an unparseable move-in date) is logged and
//! the unfiltered snapshot is returned in input order; a browse request never
//! surfaces an error or an artificially empty page.

use super::domain::{
    Coordinates, Listing, RankedListing, SearchFilters, SortStrategy, UserProfile,
};
use super::geo::{self, DistanceUnit};
use super::matching::{pipeline, MatchEngine};
use chrono::{DateTime, NaiveDate, Utc};
use tracing::warn;

/// Errors raised while applying [`SearchFilters`]. These never escape
/// [`browse`]; they exist so the fallback path has something to log.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("invalid move-in date '{value}': expected YYYY-MM-DD")]
    InvalidMoveInDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Apply `filters` to `listings` for an optionally authenticated viewer.
///
/// Authenticated viewers get self-listings removed, both scores attached,
/// and the full sort-strategy set (defaulting to relevance). Anonymous
/// viewers get unscored results and only the price/newest fallback sorts,
/// since the score-based strategies are meaningless without a user context.
pub fn browse(
    engine: &MatchEngine,
    user: Option<&UserProfile>,
    listings: Vec<Listing>,
    filters: &SearchFilters,
    now: DateTime<Utc>,
) -> Vec<RankedListing> {
    match apply_filters(user, &listings, filters) {
        Ok(filtered) => rank(engine, user, filtered, filters, now),
        Err(err) => {
            warn!(error = %err, "listing filter failed; returning unfiltered results");
            listings.into_iter().map(RankedListing::unscored).collect()
        }
    }
}

fn apply_filters(
    user: Option<&UserProfile>,
    listings: &[Listing],
    filters: &SearchFilters,
) -> Result<Vec<Listing>, SearchError> {
    let move_in_by = filters
        .move_in_by
        .as_deref()
        .map(parse_move_in_date)
        .transpose()?;

    Ok(listings
        .iter()
        .filter(|listing| passes(user, listing, filters, move_in_by))
        .cloned()
        .collect())
}

fn parse_move_in_date(raw: &str) -> Result<NaiveDate, SearchError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|source| {
        SearchError::InvalidMoveInDate {
            value: raw.to_string(),
            source,
        }
    })
}

fn passes(
    user: Option<&UserProfile>,
    listing: &Listing,
    filters: &SearchFilters,
    move_in_by: Option<NaiveDate>,
) -> bool {
    if let Some(query) = non_empty(filters.query.as_deref()) {
        if !matches_query(listing, query) {
            return false;
        }
    }

    if let Some(location_text) = non_empty(filters.location.as_deref()) {
        if !matches_location(listing, location_text) {
            return false;
        }
    }

    if let Some(university) = filters.university.as_ref() {
        if !matches_university(listing, university.name()) {
            return false;
        }
    }

    if let Some(max_distance) = filters.max_distance_miles {
        if let Some(origin) = usable_user_coordinates(user) {
            let Some(location) = listing
                .location
                .as_ref()
                .filter(|location| location.has_valid_coordinates())
            else {
                return false;
            };
            let miles =
                geo::distance_between(origin, &location.coordinates(), DistanceUnit::Miles);
            if miles > max_distance {
                return false;
            }
        }
    }

    if let Some(price) = filters.price.as_ref() {
        if !price.contains(listing.price) {
            return false;
        }
    }

    if !filters.room_types.is_empty() && !filters.room_types.contains(&listing.room_type) {
        return false;
    }

    // Amenities are conjunctive: every requested amenity must be present.
    if !filters
        .amenities
        .iter()
        .all(|wanted| listing.amenities.iter().any(|have| have == wanted))
    {
        return false;
    }

    if let Some(available_from) = filters.available_from {
        if listing.available_from < available_from {
            return false;
        }
    }

    if let Some(move_in_by) = move_in_by {
        if listing.available_from > move_in_by {
            return false;
        }
    }

    true
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches_query(listing: &Listing, query: &str) -> bool {
    contains_ignore_case(&listing.title, query)
        || contains_ignore_case(&listing.description, query)
        || listing
            .location
            .as_ref()
            .is_some_and(|location| contains_ignore_case(&location.city, query))
}

fn matches_location(listing: &Listing, text: &str) -> bool {
    let Some(location) = listing.location.as_ref() else {
        return false;
    };

    contains_ignore_case(&location.city, text)
        || contains_ignore_case(&location.street_address, text)
        || location
            .nearby_universities
            .iter()
            .any(|nearby| contains_ignore_case(&nearby.name, text))
}

fn matches_university(listing: &Listing, name: &str) -> bool {
    if listing
        .host
        .university
        .as_deref()
        .is_some_and(|hosted| hosted.eq_ignore_ascii_case(name))
    {
        return true;
    }

    listing.location.as_ref().is_some_and(|location| {
        location
            .nearby_universities
            .iter()
            .any(|nearby| nearby.name.eq_ignore_ascii_case(name))
    })
}

fn usable_user_coordinates(user: Option<&UserProfile>) -> Option<&Coordinates> {
    user.and_then(|user| user.location.as_ref())
        .and_then(|home| home.coordinates.as_ref())
        .filter(|coordinates| coordinates.is_usable())
}

fn rank(
    engine: &MatchEngine,
    user: Option<&UserProfile>,
    filtered: Vec<Listing>,
    filters: &SearchFilters,
    now: DateTime<Utc>,
) -> Vec<RankedListing> {
    match user {
        Some(user) => {
            let visible: Vec<Listing> = filtered
                .into_iter()
                .filter(|listing| listing.host.id != user.id)
                .collect();
            let ranked = engine.annotate(user, visible, now);
            let strategy = filters.sort.unwrap_or(SortStrategy::Relevance);
            pipeline::sort_listings(&ranked, strategy, Some(user))
        }
        None => {
            let ranked: Vec<RankedListing> =
                filtered.into_iter().map(RankedListing::unscored).collect();
            match filters.sort {
                Some(
                    strategy @ (SortStrategy::PriceAsc
                    | SortStrategy::PriceDesc
                    | SortStrategy::Newest),
                ) => pipeline::sort_listings(&ranked, strategy, None),
                _ => ranked,
            }
        }
    }
}
