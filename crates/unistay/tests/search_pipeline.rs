//! End-to-end browse scenarios: declarative filters applied over the active
//! snapshot, with the best-effort fallback exercised through the service.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

    use unistay::directory::UniversityDirectory;
    use unistay::marketplace::{
        Coordinates, GenderPreference, HostSummary, LifestylePreferences, Listing,
        ListingId, ListingLocation, ListingRepository, ListingStatus, MarketplaceService,
        NearbyUniversity, RepositoryError, RoomType, UserId, UserLocation, UserProfile,
        UtilitiesInfo,
    };

    pub fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 15, 12, 0, 0)
            .single()
            .expect("valid instant")
    }

    pub fn campus_listing(id: &str, host_id: &str, price: u32) -> Listing {
        Listing {
            id: ListingId(id.to_string()),
            host: HostSummary {
                id: UserId(host_id.to_string()),
                display_name: "Jordan Host".to_string(),
                university: Some("UC Berkeley".to_string()),
            },
            title: "Sunny room near campus".to_string(),
            description: "Furnished room two blocks from Telegraph Ave".to_string(),
            location: Some(ListingLocation {
                street_address: "2650 Durant Ave".to_string(),
                city: "Berkeley".to_string(),
                state: "CA".to_string(),
                country: "USA".to_string(),
                latitude: 37.8674,
                longitude: -122.2576,
                nearby_universities: vec![NearbyUniversity {
                    name: "UC Berkeley".to_string(),
                    distance_miles: 0.31,
                }],
            }),
            price,
            security_deposit: None,
            utilities: UtilitiesInfo {
                included: true,
                monthly_cost: None,
            },
            room_type: RoomType::Single,
            max_occupants: 1,
            amenities: vec!["Wi-Fi".to_string(), "Laundry".to_string()],
            images: Vec::new(),
            available_from: NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date"),
            available_to: None,
            created_at: fixed_now() - Duration::days(2),
            updated_at: fixed_now() - Duration::days(2),
            gender_preference: GenderPreference::Any,
            smoking_allowed: false,
            pets_allowed: false,
            study_friendly: true,
            status: ListingStatus::Active,
        }
    }

    pub fn student(id: &str) -> UserProfile {
        UserProfile {
            id: UserId(id.to_string()),
            display_name: "Avery Student".to_string(),
            university: Some("UC Berkeley".to_string()),
            enrollment_year: Some(2026),
            location: Some(UserLocation {
                city: Some("Berkeley".to_string()),
                state: Some("CA".to_string()),
                country: Some("USA".to_string()),
                coordinates: Some(Coordinates {
                    latitude: 37.8712,
                    longitude: -122.2687,
                }),
            }),
            preferences: LifestylePreferences::default(),
            matching_preferences: None,
        }
    }

    #[derive(Default, Clone)]
    pub struct MemoryRepository {
        listings: Arc<Mutex<HashMap<ListingId, Listing>>>,
    }

    impl ListingRepository for MemoryRepository {
        fn insert(&self, listing: Listing) -> Result<Listing, RepositoryError> {
            let mut guard = self.listings.lock().expect("repository mutex poisoned");
            if guard.contains_key(&listing.id) {
                return Err(RepositoryError::Conflict);
            }
            guard.insert(listing.id.clone(), listing.clone());
            Ok(listing)
        }

        fn update(&self, listing: Listing) -> Result<(), RepositoryError> {
            let mut guard = self.listings.lock().expect("repository mutex poisoned");
            guard.insert(listing.id.clone(), listing);
            Ok(())
        }

        fn fetch(&self, id: &ListingId) -> Result<Option<Listing>, RepositoryError> {
            let guard = self.listings.lock().expect("repository mutex poisoned");
            Ok(guard.get(id).cloned())
        }

        fn active(&self) -> Result<Vec<Listing>, RepositoryError> {
            let guard = self.listings.lock().expect("repository mutex poisoned");
            let mut listings: Vec<Listing> = guard
                .values()
                .filter(|listing| listing.status == ListingStatus::Active)
                .cloned()
                .collect();
            listings.sort_by(|a, b| a.id.0.cmp(&b.id.0));
            Ok(listings)
        }
    }

    pub fn service_with(listings: Vec<Listing>) -> MarketplaceService<MemoryRepository> {
        let repository = Arc::new(MemoryRepository::default());
        for listing in listings {
            repository.insert(listing).expect("seed listing");
        }
        MarketplaceService::new(
            repository,
            Arc::new(UniversityDirectory::builtin()),
            6,
        )
    }
}

use common::{campus_listing, fixed_now, service_with, student};
use unistay::marketplace::{PriceRange, SearchFilters, SortStrategy};

fn ids(results: &[unistay::marketplace::RankedListing]) -> Vec<&str> {
    results
        .iter()
        .map(|entry| entry.listing.id.0.as_str())
        .collect()
}

#[test]
fn empty_filters_pass_every_active_listing_through() {
    let service = service_with(vec![
        campus_listing("l-1", "host-1", 950),
        campus_listing("l-2", "host-2", 800),
    ]);

    let results = service
        .search_at(None, &SearchFilters::default(), fixed_now())
        .expect("search");

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|entry| entry.match_score.is_none()));
}

#[test]
fn signed_in_search_scores_and_hides_own_listings() {
    let service = service_with(vec![
        campus_listing("l-own", "u-1", 950),
        campus_listing("l-other", "host-2", 800),
    ]);

    let user = student("u-1");
    let results = service
        .search_at(Some(&user), &SearchFilters::default(), fixed_now())
        .expect("search");

    assert_eq!(ids(&results), vec!["l-other"]);
    assert!(results[0].match_score.is_some());
    assert!(results[0].relevance_score.is_some());
}

#[test]
fn price_window_and_sort_compose() {
    let service = service_with(vec![
        campus_listing("l-cheap", "host-1", 450),
        campus_listing("l-mid", "host-1", 900),
        campus_listing("l-dear", "host-1", 1500),
    ]);

    let filters = SearchFilters {
        price: Some(PriceRange {
            min: Some(400),
            max: Some(1000),
        }),
        sort: Some(SortStrategy::PriceDesc),
        ..SearchFilters::default()
    };

    let results = service
        .search_at(None, &filters, fixed_now())
        .expect("search");
    assert_eq!(ids(&results), vec!["l-mid", "l-cheap"]);
}

#[test]
fn malformed_move_in_date_degrades_to_the_unfiltered_snapshot() {
    let service = service_with(vec![
        campus_listing("l-1", "host-1", 950),
        campus_listing("l-2", "host-2", 800),
    ]);

    let filters = SearchFilters {
        move_in_by: Some("whenever".to_string()),
        price: Some(PriceRange {
            min: Some(900),
            max: None,
        }),
        ..SearchFilters::default()
    };

    let results = service
        .search_at(None, &filters, fixed_now())
        .expect("search");

    // The bad date voids the whole filter pass, price window included.
    assert_eq!(results.len(), 2);
}
