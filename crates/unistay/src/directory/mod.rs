//! Static university reference data.
//!
//! The directory is read-only, process-startup-constant data: either the
//! compiled-in seed set or a CSV supplied through configuration. It is the
//! collaborator that precomputes each listing's nearby-university list; the
//! scorer and pipelines only ever consume that annotation.

mod parser;

use crate::marketplace::domain::{Coordinates, ListingLocation, NearbyUniversity, RoomType};
use crate::marketplace::geo::{self, DistanceUnit};
use std::collections::BTreeMap;
use std::io::Read;

/// One entry of the static university directory.
#[derive(Debug, Clone, PartialEq)]
pub struct University {
    pub id: String,
    pub name: String,
    pub city: String,
    pub state: String,
    pub coordinates: Coordinates,
    pub student_count: u32,
    pub popular_areas: Vec<String>,
    pub average_rent: BTreeMap<RoomType, u32>,
}

/// Lookup table over the known universities.
#[derive(Debug, Clone, Default)]
pub struct UniversityDirectory {
    universities: Vec<University>,
}

impl UniversityDirectory {
    pub fn new(universities: Vec<University>) -> Self {
        Self { universities }
    }

    /// Parse a directory from CSV. Expected header:
    /// `id,name,city,state,latitude,longitude,student_count,popular_areas,`
    /// `rent_single,rent_shared,rent_studio,rent_apartment` with popular
    /// areas separated by semicolons.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DirectoryError> {
        let universities = parser::parse_records(reader)?;
        if universities.is_empty() {
            return Err(DirectoryError::Empty);
        }
        Ok(Self { universities })
    }

    /// Compiled-in seed records used when no CSV is configured.
    pub fn builtin() -> Self {
        let seed = [
            (
                "uc-berkeley",
                "UC Berkeley",
                "Berkeley",
                "CA",
                37.8719,
                -122.2585,
                45_000,
                "Southside;Northside;Downtown Berkeley",
                [1450, 950, 1900, 2600],
            ),
            (
                "stanford",
                "Stanford University",
                "Stanford",
                "CA",
                37.4275,
                -122.1697,
                17_000,
                "Palo Alto;Menlo Park;College Terrace",
                [1700, 1100, 2300, 3100],
            ),
            (
                "ohio-state",
                "Ohio State",
                "Columbus",
                "OH",
                40.0067,
                -83.0305,
                61_000,
                "University District;Short North;Clintonville",
                [750, 500, 950, 1300],
            ),
            (
                "ut-austin",
                "UT Austin",
                "Austin",
                "TX",
                30.2849,
                -97.7341,
                52_000,
                "West Campus;North Campus;Hyde Park",
                [1000, 700, 1300, 1800],
            ),
            (
                "michigan",
                "University of Michigan",
                "Ann Arbor",
                "MI",
                42.2780,
                -83.7382,
                48_000,
                "Kerrytown;Burns Park;South U",
                [950, 650, 1250, 1700],
            ),
            (
                "uw-seattle",
                "University of Washington",
                "Seattle",
                "WA",
                47.6553,
                -122.3035,
                49_000,
                "U District;Ravenna;Wallingford",
                [1100, 800, 1500, 2100],
            ),
            (
                "nyu",
                "NYU",
                "New York",
                "NY",
                40.7295,
                -73.9965,
                52_000,
                "Greenwich Village;East Village;Brooklyn Heights",
                [2100, 1500, 2800, 3800],
            ),
            (
                "georgia-tech",
                "Georgia Tech",
                "Atlanta",
                "GA",
                33.7756,
                -84.3963,
                44_000,
                "Midtown;Home Park;West Midtown",
                [1000, 700, 1400, 1900],
            ),
        ];

        let universities = seed
            .into_iter()
            .map(
                |(id, name, city, state, latitude, longitude, student_count, areas, rents)| {
                    let [single, shared, studio, apartment] = rents;
                    let average_rent = BTreeMap::from([
                        (RoomType::Single, single),
                        (RoomType::Shared, shared),
                        (RoomType::Studio, studio),
                        (RoomType::Apartment, apartment),
                    ]);
                    University {
                        id: id.to_string(),
                        name: name.to_string(),
                        city: city.to_string(),
                        state: state.to_string(),
                        coordinates: Coordinates {
                            latitude,
                            longitude,
                        },
                        student_count,
                        popular_areas: areas.split(';').map(str::to_string).collect(),
                        average_rent,
                    }
                },
            )
            .collect();

        Self { universities }
    }

    /// Case-insensitive exact lookup by name.
    pub fn find(&self, name: &str) -> Option<&University> {
        let trimmed = name.trim();
        self.universities
            .iter()
            .find(|university| university.name.eq_ignore_ascii_case(trimmed))
    }

    /// All universities within `radius_miles` of a point, closest first.
    /// This is the upstream precomputation that feeds a listing's
    /// `nearby_universities` annotation.
    pub fn nearby(&self, coordinates: &Coordinates, radius_miles: f64) -> Vec<NearbyUniversity> {
        let mut entries: Vec<NearbyUniversity> = self
            .universities
            .iter()
            .map(|university| NearbyUniversity {
                name: university.name.clone(),
                distance_miles: geo::distance_between(
                    coordinates,
                    &university.coordinates,
                    DistanceUnit::Miles,
                ),
            })
            .filter(|entry| entry.distance_miles <= radius_miles)
            .collect();

        entries.sort_by(|a, b| {
            a.distance_miles
                .partial_cmp(&b.distance_miles)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        entries
    }

    /// Stamp a listing location with its nearby universities. Locations
    /// without usable coordinates are left unannotated.
    pub fn annotate(&self, location: &mut ListingLocation, radius_miles: f64) {
        if location.has_valid_coordinates() {
            location.nearby_universities = self.nearby(&location.coordinates(), radius_miles);
        }
    }

    pub fn len(&self) -> usize {
        self.universities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.universities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &University> {
        self.universities.iter()
    }
}

/// Errors raised while loading the directory.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("university '{university}' has out-of-range coordinates")]
    InvalidCoordinates { university: String },
    #[error("directory contains no universities")]
    Empty,
}
