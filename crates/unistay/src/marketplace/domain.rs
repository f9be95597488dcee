use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for marketplace users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Identifier wrapper for housing listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingId(pub String);

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Usable for distance math: finite, in range, and not the 0/0
    /// "unset" sentinel.
    pub fn is_usable(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude.abs() <= 90.0
            && self.longitude.abs() <= 180.0
            && !(self.latitude == 0.0 && self.longitude == 0.0)
    }
}

/// Prospective tenant profile as supplied by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub display_name: String,
    /// Free-text university affiliation; absent profiles are still scoreable
    /// but score zero on both rubrics.
    #[serde(default)]
    pub university: Option<String>,
    #[serde(default)]
    pub enrollment_year: Option<u16>,
    #[serde(default)]
    pub location: Option<UserLocation>,
    #[serde(default)]
    pub preferences: LifestylePreferences,
    #[serde(default)]
    pub matching_preferences: Option<MatchingPreferences>,
}

/// Where the user currently lives; every field is independently optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserLocation {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

/// Lifestyle and budget preferences feeding the match rubric. Absent fields
/// fall back to the rubric's documented defaults rather than failing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LifestylePreferences {
    #[serde(default)]
    pub smoking: Option<bool>,
    #[serde(default)]
    pub pets: Option<bool>,
    #[serde(default)]
    pub study_friendly: Option<bool>,
    #[serde(default)]
    pub social_level: Option<SocialLevel>,
    /// Maximum monthly budget in whole currency units. Zero is treated as
    /// unset, matching the flat budget fallback.
    #[serde(default)]
    pub max_budget: Option<u32>,
    #[serde(default)]
    pub preferred_room_types: Vec<RoomType>,
    #[serde(default)]
    pub preferred_amenities: Vec<String>,
}

/// Hard constraints the recommendation filter honors when present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchingPreferences {
    #[serde(default)]
    pub max_distance_miles: Option<f64>,
    #[serde(default)]
    pub same_university_only: bool,
    #[serde(default)]
    pub similar_enrollment_year: bool,
    #[serde(default)]
    pub budget_range: Option<BudgetRange>,
}

/// Inclusive monthly-cost window applied to a listing's total cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: u32,
    pub max: u32,
}

impl BudgetRange {
    pub fn contains(&self, amount: u32) -> bool {
        amount >= self.min && amount <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialLevel {
    Quiet,
    Moderate,
    Social,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Single,
    Shared,
    Studio,
    Apartment,
}

impl RoomType {
    pub const fn label(self) -> &'static str {
        match self {
            RoomType::Single => "single",
            RoomType::Shared => "shared",
            RoomType::Studio => "studio",
            RoomType::Apartment => "apartment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderPreference {
    Male,
    Female,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Active,
    Inactive,
    Rented,
}

impl ListingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ListingStatus::Active => "active",
            ListingStatus::Inactive => "inactive",
            ListingStatus::Rented => "rented",
        }
    }
}

/// The host reference the engine reads: a snapshot, shared not owned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostSummary {
    pub id: UserId,
    pub display_name: String,
    #[serde(default)]
    pub university: Option<String>,
}

/// Precomputed {university, distance} pair stamped onto listing locations by
/// the directory collaborator upstream of the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyUniversity {
    pub name: String,
    pub distance_miles: f64,
}

/// Physical location of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingLocation {
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub nearby_universities: Vec<NearbyUniversity>,
}

impl ListingLocation {
    /// Whether the coordinates are usable for distance math. The 0/0 origin
    /// is "unset" by convention, not a point in the Gulf of Guinea.
    pub fn has_valid_coordinates(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude.abs() <= 90.0
            && self.longitude.abs() <= 180.0
            && !(self.latitude == 0.0 && self.longitude == 0.0)
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Utilities terms attached to a listing's rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UtilitiesInfo {
    pub included: bool,
    #[serde(default)]
    pub monthly_cost: Option<u32>,
}

/// A housing unit as advertised on the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub host: HostSummary,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: Option<ListingLocation>,
    pub price: u32,
    #[serde(default)]
    pub security_deposit: Option<u32>,
    #[serde(default)]
    pub utilities: UtilitiesInfo,
    pub room_type: RoomType,
    pub max_occupants: u8,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub available_from: NaiveDate,
    #[serde(default)]
    pub available_to: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "GenderPreference::default_any")]
    pub gender_preference: GenderPreference,
    #[serde(default)]
    pub smoking_allowed: bool,
    #[serde(default)]
    pub pets_allowed: bool,
    #[serde(default)]
    pub study_friendly: bool,
    pub status: ListingStatus,
}

impl GenderPreference {
    fn default_any() -> Self {
        GenderPreference::Any
    }
}

impl Listing {
    /// Rent plus non-included utilities: the basis for every budget
    /// comparison in the rubric and the matching-preference filter.
    pub fn total_monthly_cost(&self) -> u32 {
        let utilities = if self.utilities.included {
            0
        } else {
            self.utilities.monthly_cost.unwrap_or(0)
        };
        self.price + utilities
    }
}

/// A listing annotated with the per-session scores. The annotation lives on a
/// copy for the duration of one ranking pass and is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedListing {
    pub listing: Listing,
    #[serde(default)]
    pub match_score: Option<u8>,
    #[serde(default)]
    pub relevance_score: Option<u8>,
}

impl RankedListing {
    pub fn unscored(listing: Listing) -> Self {
        Self {
            listing,
            match_score: None,
            relevance_score: None,
        }
    }

    /// Match score for sorting purposes; absent scores rank as zero.
    pub fn match_rank(&self) -> u8 {
        self.match_score.unwrap_or(0)
    }

    /// Relevance score for sorting purposes; absent scores rank as zero.
    pub fn relevance_rank(&self) -> u8 {
        self.relevance_score.unwrap_or(0)
    }
}

/// University constraint inside [`SearchFilters`]: a directory name or a
/// free-text escape hatch for unlisted schools. Both match identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UniversityFilter {
    Named(String),
    Custom(String),
}

impl UniversityFilter {
    pub fn name(&self) -> &str {
        match self {
            UniversityFilter::Named(name) | UniversityFilter::Custom(name) => name,
        }
    }
}

/// Optional price window; a missing bound defaults to zero / unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceRange {
    #[serde(default)]
    pub min: Option<u32>,
    #[serde(default)]
    pub max: Option<u32>,
}

impl PriceRange {
    pub fn contains(&self, price: u32) -> bool {
        price >= self.min.unwrap_or(0) && price <= self.max.unwrap_or(u32::MAX)
    }
}

/// Sort strategies accepted by the browse and recommendation surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortStrategy {
    Relevance,
    Match,
    Distance,
    PriceAsc,
    PriceDesc,
    Newest,
}

impl SortStrategy {
    pub const fn label(self) -> &'static str {
        match self {
            SortStrategy::Relevance => "relevance",
            SortStrategy::Match => "match",
            SortStrategy::Distance => "distance",
            SortStrategy::PriceAsc => "price-asc",
            SortStrategy::PriceDesc => "price-desc",
            SortStrategy::Newest => "newest",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "relevance" => Some(Self::Relevance),
            "match" => Some(Self::Match),
            "distance" => Some(Self::Distance),
            "price-asc" => Some(Self::PriceAsc),
            "price-desc" => Some(Self::PriceDesc),
            "newest" => Some(Self::Newest),
            _ => None,
        }
    }
}

/// Declarative subset description for the browse pipeline. A default value
/// filters nothing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub university: Option<UniversityFilter>,
    #[serde(default)]
    pub max_distance_miles: Option<f64>,
    #[serde(default)]
    pub price: Option<PriceRange>,
    #[serde(default)]
    pub room_types: Vec<RoomType>,
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Lower bound: listing must become available on or after this date.
    #[serde(default)]
    pub available_from: Option<NaiveDate>,
    /// Upper bound as an ISO `YYYY-MM-DD` string: listing must be available
    /// by this date. Parsed inside the pipeline; a malformed value triggers
    /// the best-effort fallback rather than an error response.
    #[serde(default)]
    pub move_in_by: Option<String>,
    #[serde(default)]
    pub sort: Option<SortStrategy>,
}
