use super::{DirectoryError, University};
use crate::marketplace::domain::{Coordinates, RoomType};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<University>, DirectoryError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<UniversityRow>() {
        let row = record?;
        records.push(row.into_university()?);
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct UniversityRow {
    id: String,
    name: String,
    city: String,
    state: String,
    latitude: f64,
    longitude: f64,
    student_count: u32,
    #[serde(default)]
    popular_areas: String,
    #[serde(default)]
    rent_single: Option<u32>,
    #[serde(default)]
    rent_shared: Option<u32>,
    #[serde(default)]
    rent_studio: Option<u32>,
    #[serde(default)]
    rent_apartment: Option<u32>,
}

impl UniversityRow {
    fn into_university(self) -> Result<University, DirectoryError> {
        if !self.latitude.is_finite()
            || !self.longitude.is_finite()
            || self.latitude.abs() > 90.0
            || self.longitude.abs() > 180.0
        {
            return Err(DirectoryError::InvalidCoordinates {
                university: self.name,
            });
        }

        let popular_areas = self
            .popular_areas
            .split(';')
            .map(str::trim)
            .filter(|area| !area.is_empty())
            .map(str::to_string)
            .collect();

        let mut average_rent = BTreeMap::new();
        for (room_type, rent) in [
            (RoomType::Single, self.rent_single),
            (RoomType::Shared, self.rent_shared),
            (RoomType::Studio, self.rent_studio),
            (RoomType::Apartment, self.rent_apartment),
        ] {
            if let Some(rent) = rent {
                average_rent.insert(room_type, rent);
            }
        }

        Ok(University {
            id: self.id,
            name: self.name,
            city: self.city,
            state: self.state,
            coordinates: Coordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            },
            student_count: self.student_count,
            popular_areas,
            average_rent,
        })
    }
}
