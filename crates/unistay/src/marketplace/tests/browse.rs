use super::common::*;
use crate::marketplace::domain::{
    PriceRange, RankedListing, RoomType, SearchFilters, SortStrategy, UniversityFilter,
};
use crate::marketplace::search::browse;
use chrono::NaiveDate;

fn ids(listings: &[RankedListing]) -> Vec<&str> {
    listings
        .iter()
        .map(|ranked| ranked.listing.id.0.as_str())
        .collect()
}

#[test]
fn empty_filters_return_everything_except_own_listings() {
    let engine = engine();
    let user = student("u-1");
    let listings = vec![
        listing("l-1", "host-1"),
        listing("l-2", "u-1"),
        listing("l-3", "host-2"),
    ];

    let results = browse(
        &engine,
        Some(&user),
        listings,
        &SearchFilters::default(),
        fixed_now(),
    );

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|entry| entry.listing.host.id != user.id));
    assert!(results.iter().all(|entry| entry.match_score.is_some()));
    assert!(results
        .iter()
        .all(|entry| entry.relevance_score.is_some()));
}

#[test]
fn amenity_filter_requires_every_requested_amenity() {
    let engine = engine();
    let mut parking = listing("l-parking", "host-1");
    parking.amenities.push("Parking".to_string());

    let filters = SearchFilters {
        amenities: vec!["Wi-Fi".to_string(), "Parking".to_string()],
        ..SearchFilters::default()
    };

    let results = browse(
        &engine,
        None,
        vec![listing("l-wifi-only", "host-1"), parking],
        &filters,
        fixed_now(),
    );

    assert_eq!(ids(&results), vec!["l-parking"]);
}

#[test]
fn custom_university_filter_matches_like_a_named_one() {
    let engine = engine();
    let mut columbus = listing("l-osu", "host-1");
    columbus.location = Some(columbus_location());
    columbus.host.university = None;

    let listings = vec![listing("l-cal", "host-1"), columbus];

    let named = SearchFilters {
        university: Some(UniversityFilter::Named("Ohio State".to_string())),
        ..SearchFilters::default()
    };
    let custom = SearchFilters {
        university: Some(UniversityFilter::Custom("ohio state".to_string())),
        ..SearchFilters::default()
    };

    let from_named = browse(&engine, None, listings.clone(), &named, fixed_now());
    let from_custom = browse(&engine, None, listings, &custom, fixed_now());

    assert_eq!(ids(&from_named), vec!["l-osu"]);
    assert_eq!(ids(&from_named), ids(&from_custom));
}

#[test]
fn university_filter_also_matches_the_host_affiliation() {
    let engine = engine();
    // Hosted by a Berkeley student but physically in Columbus.
    let mut expat = listing("l-expat", "host-1");
    expat.location = Some(columbus_location());

    let filters = SearchFilters {
        university: Some(UniversityFilter::Named("UC Berkeley".to_string())),
        ..SearchFilters::default()
    };

    let results = browse(&engine, None, vec![expat], &filters, fixed_now());
    assert_eq!(ids(&results), vec!["l-expat"]);
}

#[test]
fn query_matches_title_case_insensitively() {
    let engine = engine();
    let mut other = listing("l-2", "host-1");
    other.title = "Quiet studio downtown".to_string();
    other.description = "No frills".to_string();

    let filters = SearchFilters {
        query: Some("SUNNY".to_string()),
        ..SearchFilters::default()
    };

    let results = browse(
        &engine,
        None,
        vec![listing("l-1", "host-1"), other],
        &filters,
        fixed_now(),
    );
    assert_eq!(ids(&results), vec!["l-1"]);
}

#[test]
fn location_text_matches_street_and_nearby_university_names() {
    let engine = engine();
    let mut columbus = listing("l-osu", "host-1");
    columbus.location = Some(columbus_location());

    let by_street = SearchFilters {
        location: Some("durant".to_string()),
        ..SearchFilters::default()
    };
    let results = browse(
        &engine,
        None,
        vec![listing("l-cal", "host-1"), columbus.clone()],
        &by_street,
        fixed_now(),
    );
    assert_eq!(ids(&results), vec!["l-cal"]);

    let by_university = SearchFilters {
        location: Some("ohio".to_string()),
        ..SearchFilters::default()
    };
    let results = browse(
        &engine,
        None,
        vec![listing("l-cal", "host-1"), columbus],
        &by_university,
        fixed_now(),
    );
    assert_eq!(ids(&results), vec!["l-osu"]);
}

#[test]
fn single_bound_price_ranges_default_the_other_side() {
    let engine = engine();
    let mut cheap = listing("l-cheap", "host-1");
    cheap.price = 400;
    let mut dear = listing("l-dear", "host-1");
    dear.price = 1600;

    let min_only = SearchFilters {
        price: Some(PriceRange {
            min: Some(500),
            max: None,
        }),
        ..SearchFilters::default()
    };
    let results = browse(
        &engine,
        None,
        vec![cheap.clone(), dear.clone()],
        &min_only,
        fixed_now(),
    );
    assert_eq!(ids(&results), vec!["l-dear"]);

    let max_only = SearchFilters {
        price: Some(PriceRange {
            min: None,
            max: Some(500),
        }),
        ..SearchFilters::default()
    };
    let results = browse(&engine, None, vec![cheap, dear], &max_only, fixed_now());
    assert_eq!(ids(&results), vec!["l-cheap"]);
}

#[test]
fn room_type_filter_keeps_only_requested_types() {
    let engine = engine();
    let mut studio = listing("l-studio", "host-1");
    studio.room_type = RoomType::Studio;

    let filters = SearchFilters {
        room_types: vec![RoomType::Studio, RoomType::Apartment],
        ..SearchFilters::default()
    };

    let results = browse(
        &engine,
        None,
        vec![listing("l-single", "host-1"), studio],
        &filters,
        fixed_now(),
    );
    assert_eq!(ids(&results), vec!["l-studio"]);
}

#[test]
fn move_in_bounds_are_independent_and_can_empty_the_result() {
    let engine = engine();
    // Available from 2025-10-01 per the fixture.
    let listings = vec![listing("l-1", "host-1")];

    let lower = SearchFilters {
        available_from: Some(NaiveDate::from_ymd_opt(2025, 9, 20).expect("valid date")),
        ..SearchFilters::default()
    };
    assert_eq!(
        browse(&engine, None, listings.clone(), &lower, fixed_now()).len(),
        1
    );

    let upper = SearchFilters {
        move_in_by: Some("2025-09-25".to_string()),
        ..SearchFilters::default()
    };
    assert!(browse(&engine, None, listings.clone(), &upper, fixed_now()).is_empty());

    // Both at once form a window no listing satisfies.
    let window = SearchFilters {
        available_from: Some(NaiveDate::from_ymd_opt(2025, 10, 2).expect("valid date")),
        move_in_by: Some("2025-10-05".to_string()),
        ..SearchFilters::default()
    };
    assert!(browse(&engine, None, listings, &window, fixed_now()).is_empty());
}

#[test]
fn malformed_move_in_date_falls_back_to_the_unfiltered_set() {
    let engine = engine();
    let user = student("u-1");
    let listings = vec![
        listing("l-1", "host-1"),
        listing("l-own", "u-1"),
    ];

    let filters = SearchFilters {
        move_in_by: Some("next month".to_string()),
        ..SearchFilters::default()
    };

    let results = browse(&engine, Some(&user), listings, &filters, fixed_now());

    // Best-effort fallback: everything comes back, unscored, in input order.
    assert_eq!(ids(&results), vec!["l-1", "l-own"]);
    assert!(results.iter().all(|entry| entry.match_score.is_none()));
}

#[test]
fn browse_max_distance_needs_usable_viewer_coordinates() {
    let engine = engine();
    let user = student("u-1");

    let mut columbus = listing("l-osu", "host-1");
    columbus.location = Some(columbus_location());
    let mut unset = listing("l-unset", "host-1");
    if let Some(location) = unset.location.as_mut() {
        location.latitude = 0.0;
        location.longitude = 0.0;
    }

    let filters = SearchFilters {
        max_distance_miles: Some(5.0),
        ..SearchFilters::default()
    };

    let results = browse(
        &engine,
        Some(&user),
        vec![listing("l-cal", "host-1"), columbus.clone(), unset.clone()],
        &filters,
        fixed_now(),
    );
    assert_eq!(ids(&results), vec!["l-cal"]);

    // Anonymous viewers have no origin, so the cutoff is inert.
    let results = browse(
        &engine,
        None,
        vec![listing("l-cal", "host-1"), columbus, unset],
        &filters,
        fixed_now(),
    );
    assert_eq!(results.len(), 3);
}

#[test]
fn anonymous_browse_supports_only_the_fallback_sorts() {
    let engine = engine();
    let mut cheap = listing("l-cheap", "host-1");
    cheap.price = 400;
    let mut dear = listing("l-dear", "host-1");
    dear.price = 1600;

    let by_price = SearchFilters {
        sort: Some(SortStrategy::PriceAsc),
        ..SearchFilters::default()
    };
    let results = browse(
        &engine,
        None,
        vec![dear.clone(), cheap.clone()],
        &by_price,
        fixed_now(),
    );
    assert_eq!(ids(&results), vec!["l-cheap", "l-dear"]);
    assert!(results.iter().all(|entry| entry.relevance_score.is_none()));

    // Score-based strategies are meaningless without a viewer: input order.
    let by_match = SearchFilters {
        sort: Some(SortStrategy::Match),
        ..SearchFilters::default()
    };
    let results = browse(&engine, None, vec![dear, cheap], &by_match, fixed_now());
    assert_eq!(ids(&results), vec!["l-dear", "l-cheap"]);
}

#[test]
fn authenticated_browse_honors_the_requested_sort() {
    let engine = engine();
    let user = student("u-1");
    let mut cheap = listing("l-cheap", "host-1");
    cheap.price = 400;
    let mut dear = listing("l-dear", "host-1");
    dear.price = 1600;

    let filters = SearchFilters {
        sort: Some(SortStrategy::PriceDesc),
        ..SearchFilters::default()
    };

    let results = browse(
        &engine,
        Some(&user),
        vec![cheap, dear],
        &filters,
        fixed_now(),
    );
    assert_eq!(ids(&results), vec!["l-dear", "l-cheap"]);
    assert!(results.iter().all(|entry| entry.match_score.is_some()));
}
