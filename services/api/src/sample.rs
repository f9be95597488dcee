//! Seed data shared by the development server and the CLI demo.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use unistay::directory::UniversityDirectory;
use unistay::marketplace::{
    Coordinates, GenderPreference, HostSummary, LifestylePreferences, Listing, ListingId,
    ListingLocation, ListingStatus, RoomType, SocialLevel, UserId, UserLocation, UserProfile,
    UtilitiesInfo,
};

#[allow(clippy::too_many_arguments)]
fn base_listing(
    id: &str,
    host_id: &str,
    host_university: &str,
    title: &str,
    street_address: &str,
    city: &str,
    state: &str,
    latitude: f64,
    longitude: f64,
    price: u32,
    room_type: RoomType,
    days_old: i64,
    now: DateTime<Utc>,
) -> Listing {
    let created_at = now - Duration::days(days_old);
    Listing {
        id: ListingId(id.to_string()),
        host: HostSummary {
            id: UserId(host_id.to_string()),
            display_name: format!("Host {host_id}"),
            university: Some(host_university.to_string()),
        },
        title: title.to_string(),
        description: format!("{title} on {street_address}"),
        location: Some(ListingLocation {
            street_address: street_address.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            country: "USA".to_string(),
            latitude,
            longitude,
            nearby_universities: Vec::new(),
        }),
        price,
        security_deposit: Some(price / 2),
        utilities: UtilitiesInfo {
            included: true,
            monthly_cost: None,
        },
        room_type,
        max_occupants: 1,
        amenities: vec!["Wi-Fi".to_string(), "Laundry".to_string()],
        images: Vec::new(),
        available_from: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap_or_default(),
        available_to: None,
        created_at,
        updated_at: created_at,
        gender_preference: GenderPreference::Any,
        smoking_allowed: false,
        pets_allowed: false,
        study_friendly: true,
        status: ListingStatus::Active,
    }
}

/// Build the seed listing set, stamped with nearby universities from the
/// given directory.
pub(crate) fn seed_listings(
    directory: &UniversityDirectory,
    nearby_radius_miles: f64,
    now: DateTime<Utc>,
) -> Vec<Listing> {
    let mut listings = vec![
        base_listing(
            "lst-berkeley-single",
            "host-maya",
            "UC Berkeley",
            "Sunny single near Telegraph Ave",
            "2650 Durant Ave",
            "Berkeley",
            "CA",
            37.8674,
            -122.2576,
            950,
            RoomType::Single,
            2,
            now,
        ),
        base_listing(
            "lst-berkeley-shared",
            "host-omar",
            "UC Berkeley",
            "Shared room in Northside co-op",
            "1730 La Loma Ave",
            "Berkeley",
            "CA",
            37.8761,
            -122.2566,
            650,
            RoomType::Shared,
            12,
            now,
        ),
        base_listing(
            "lst-berkeley-studio",
            "host-maya",
            "UC Berkeley",
            "Quiet studio by the Downtown BART",
            "2111 Addison St",
            "Berkeley",
            "CA",
            37.8705,
            -122.2687,
            1850,
            RoomType::Studio,
            40,
            now,
        ),
        base_listing(
            "lst-columbus-apartment",
            "host-dana",
            "Ohio State",
            "Two-bed apartment off High Street",
            "88 E Lane Ave",
            "Columbus",
            "OH",
            40.0050,
            -83.0120,
            1100,
            RoomType::Apartment,
            5,
            now,
        ),
        base_listing(
            "lst-austin-shared",
            "host-ben",
            "UT Austin",
            "Shared room in West Campus",
            "2400 Nueces St",
            "Austin",
            "TX",
            30.2890,
            -97.7460,
            700,
            RoomType::Shared,
            18,
            now,
        ),
        base_listing(
            "lst-seattle-single",
            "host-ana",
            "University of Washington",
            "Single room in the U District",
            "4545 15th Ave NE",
            "Seattle",
            "WA",
            47.6622,
            -122.3120,
            1150,
            RoomType::Single,
            3,
            now,
        ),
    ];

    // One non-active listing so the repository's status filter is visible.
    let mut rented = base_listing(
        "lst-berkeley-rented",
        "host-omar",
        "UC Berkeley",
        "Room already spoken for",
        "2420 Piedmont Ave",
        "Berkeley",
        "CA",
        37.8665,
        -122.2530,
        900,
        RoomType::Single,
        60,
        now,
    );
    rented.status = ListingStatus::Rented;
    listings.push(rented);

    for listing in &mut listings {
        if let Some(location) = listing.location.as_mut() {
            directory.annotate(location, nearby_radius_miles);
        }
    }

    listings
}

/// The demo's viewer: a Berkeley student with a modest budget.
pub(crate) fn demo_student() -> UserProfile {
    UserProfile {
        id: UserId("user-avery".to_string()),
        display_name: "Avery".to_string(),
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
            preferred_room_types: vec![RoomType::Single, RoomType::Studio],
            preferred_amenities: vec!["Wi-Fi".to_string(), "Laundry".to_string()],
        },
        matching_preferences: None,
    }
}
