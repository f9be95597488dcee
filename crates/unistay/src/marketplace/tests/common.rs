use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::directory::UniversityDirectory;
use crate::marketplace::domain::{
    Coordinates, GenderPreference, HostSummary, LifestylePreferences, Listing, ListingId,
    ListingLocation, ListingStatus, NearbyUniversity, RoomType, SocialLevel, UserId, UserLocation,
    UserProfile, UtilitiesInfo,
};
use crate::marketplace::matching::MatchEngine;
use crate::marketplace::repository::{ListingRepository, RepositoryError};
use crate::marketplace::router::marketplace_router;
use crate::marketplace::service::MarketplaceService;

/// Pinned evaluation instant so recency scoring stays deterministic.
pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 15, 12, 0, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn directory() -> Arc<UniversityDirectory> {
    Arc::new(UniversityDirectory::builtin())
}

pub(super) fn engine() -> MatchEngine {
    MatchEngine::new(directory())
}

pub(super) fn berkeley_location() -> ListingLocation {
    ListingLocation {
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
    }
}

pub(super) fn columbus_location() -> ListingLocation {
    ListingLocation {
        street_address: "88 E Lane Ave".to_string(),
        city: "Columbus".to_string(),
        state: "OH".to_string(),
        country: "USA".to_string(),
        latitude: 40.0050,
        longitude: -83.0120,
        nearby_universities: vec![NearbyUniversity {
            name: "Ohio State".to_string(),
            distance_miles: 1.05,
        }],
    }
}

pub(super) fn listing(id: &str, host_id: &str) -> Listing {
    Listing {
        id: ListingId(id.to_string()),
        host: HostSummary {
            id: UserId(host_id.to_string()),
            display_name: "Jordan Host".to_string(),
            university: Some("UC Berkeley".to_string()),
        },
        title: "Sunny room near campus".to_string(),
        description: "Furnished room two blocks from Telegraph Ave".to_string(),
        location: Some(berkeley_location()),
        price: 950,
        security_deposit: Some(500),
        utilities: UtilitiesInfo {
            included: true,
            monthly_cost: None,
        },
        room_type: RoomType::Single,
        max_occupants: 1,
        amenities: vec![
            "Wi-Fi".to_string(),
            "Laundry".to_string(),
            "Desk".to_string(),
        ],
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

pub(super) fn student(id: &str) -> UserProfile {
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
        preferences: LifestylePreferences {
            smoking: Some(false),
            pets: Some(false),
            study_friendly: Some(true),
            social_level: Some(SocialLevel::Quiet),
            max_budget: Some(1200),
            preferred_room_types: vec![RoomType::Single],
            preferred_amenities: vec!["Wi-Fi".to_string(), "Laundry".to_string()],
        },
        matching_preferences: None,
    }
}

/// A profile stripped of everything the rubric keys on, to exercise the
/// documented fallbacks.
pub(super) fn blank_profile(id: &str) -> UserProfile {
    UserProfile {
        id: UserId(id.to_string()),
        display_name: "Blank".to_string(),
        university: None,
        enrollment_year: None,
        location: None,
        preferences: LifestylePreferences::default(),
        matching_preferences: None,
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
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

pub(super) struct UnavailableRepository;

impl ListingRepository for UnavailableRepository {
    fn insert(&self, _listing: Listing) -> Result<Listing, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _listing: Listing) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ListingId) -> Result<Option<Listing>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn active(&self) -> Result<Vec<Listing>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    MarketplaceService<MemoryRepository>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = MarketplaceService::new(repository.clone(), directory(), 6);
    (service, repository)
}

pub(super) fn seeded_service(listings: Vec<Listing>) -> MarketplaceService<MemoryRepository> {
    let (service, repository) = build_service();
    for listing in listings {
        repository.insert(listing).expect("seed listing");
    }
    service
}

pub(super) fn marketplace_router_with_service(
    service: MarketplaceService<MemoryRepository>,
) -> axum::Router {
    marketplace_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
