use super::weights;
use super::{MatchFactor, ScoreComponent};
use crate::directory::UniversityDirectory;
use crate::marketplace::domain::{Listing, ListingLocation, UserProfile};
use crate::marketplace::geo::{self, DistanceUnit};
use chrono::{DateTime, Duration, Utc};

pub(crate) fn score_rubric(
    user: &UserProfile,
    university: &str,
    location: &ListingLocation,
    listing: &Listing,
    directory: &UniversityDirectory,
) -> Vec<ScoreComponent> {
    vec![
        university_proximity(university, location, directory),
        budget(user, listing),
        room_type(user, listing),
        lifestyle(user, listing),
        amenities(user, listing),
    ]
}

fn proximity_points(miles: f64) -> f64 {
    for (limit, points) in weights::PROXIMITY_BANDS {
        if miles <= limit {
            return points;
        }
    }
    weights::PROXIMITY_FLOOR
}

fn university_proximity(
    university: &str,
    location: &ListingLocation,
    directory: &UniversityDirectory,
) -> ScoreComponent {
    if let Some(known) = directory.find(university) {
        if location.has_valid_coordinates() {
            let miles = geo::distance_between(
                &known.coordinates,
                &location.coordinates(),
                DistanceUnit::Miles,
            );
            return ScoreComponent {
                factor: MatchFactor::UniversityProximity,
                points: proximity_points(miles),
                notes: format!("{:.1} mi from {}", miles, known.name),
            };
        }
    }

    // No coordinates on one side or the other: fall back to the listing's
    // precomputed nearby-university names.
    if location
        .nearby_universities
        .iter()
        .any(|nearby| nearby.name == university)
    {
        ScoreComponent {
            factor: MatchFactor::UniversityProximity,
            points: weights::PROXIMITY_NAME_MATCH,
            notes: format!("listed as near {university}"),
        }
    } else {
        ScoreComponent {
            factor: MatchFactor::UniversityProximity,
            points: weights::PROXIMITY_FLOOR,
            notes: "no proximity data".to_string(),
        }
    }
}

fn budget(user: &UserProfile, listing: &Listing) -> ScoreComponent {
    let total = f64::from(listing.total_monthly_cost());

    match user.preferences.max_budget {
        Some(budget) if budget > 0 => {
            let budget_f = f64::from(budget);
            if total <= budget_f {
                let utilization = total / budget_f;
                if utilization <= weights::BUDGET_COMFORT_UTILIZATION {
                    ScoreComponent {
                        factor: MatchFactor::Budget,
                        points: weights::BUDGET_COMFORT,
                        notes: format!(
                            "total {total:.0} uses {:.0}% of the {budget} budget",
                            utilization * 100.0
                        ),
                    }
                } else {
                    ScoreComponent {
                        factor: MatchFactor::Budget,
                        points: weights::BUDGET_TIGHT,
                        notes: format!("total {total:.0} fits the {budget} budget tightly"),
                    }
                }
            } else {
                let over = total - budget_f;
                let penalty = ((over / budget_f) * weights::BUDGET_WEIGHT).min(weights::BUDGET_WEIGHT);
                ScoreComponent {
                    factor: MatchFactor::Budget,
                    points: (weights::BUDGET_WEIGHT - penalty).max(0.0),
                    notes: format!("total {total:.0} exceeds the {budget} budget by {over:.0}"),
                }
            }
        }
        _ => ScoreComponent {
            factor: MatchFactor::Budget,
            points: weights::BUDGET_UNSET,
            notes: "no budget preference".to_string(),
        },
    }
}

fn room_type(user: &UserProfile, listing: &Listing) -> ScoreComponent {
    if user
        .preferences
        .preferred_room_types
        .contains(&listing.room_type)
    {
        ScoreComponent {
            factor: MatchFactor::RoomType,
            points: weights::ROOM_TYPE_MATCH,
            notes: format!("preferred room type ({})", listing.room_type.label()),
        }
    } else {
        ScoreComponent {
            factor: MatchFactor::RoomType,
            points: weights::ROOM_TYPE_FLEX,
            notes: format!("{} not in preferred set", listing.room_type.label()),
        }
    }
}

fn lifestyle(user: &UserProfile, listing: &Listing) -> ScoreComponent {
    let mut points = 0.0;
    let mut aligned = Vec::new();

    if user.preferences.study_friendly == Some(listing.study_friendly) {
        points += weights::LIFESTYLE_STUDY;
        aligned.push("study");
    }
    if user.preferences.smoking == Some(listing.smoking_allowed) {
        points += weights::LIFESTYLE_SMOKING;
        aligned.push("smoking");
    }
    if user.preferences.pets == Some(listing.pets_allowed) {
        points += weights::LIFESTYLE_PETS;
        aligned.push("pets");
    }

    let notes = if aligned.is_empty() {
        "no declared lifestyle overlap".to_string()
    } else {
        format!("aligned on {}", aligned.join(", "))
    };

    ScoreComponent {
        factor: MatchFactor::Lifestyle,
        points,
        notes,
    }
}

fn amenities(user: &UserProfile, listing: &Listing) -> ScoreComponent {
    let preferred = &user.preferences.preferred_amenities;
    if preferred.is_empty() {
        return ScoreComponent {
            factor: MatchFactor::Amenities,
            points: weights::AMENITY_DEFAULT,
            notes: "no amenity preferences".to_string(),
        };
    }

    let hits = preferred
        .iter()
        .filter(|amenity| listing.amenities.iter().any(|have| have == *amenity))
        .count();

    ScoreComponent {
        factor: MatchFactor::Amenities,
        points: (hits as f64 / preferred.len() as f64) * weights::AMENITY_WEIGHT,
        notes: format!("{hits} of {} preferred amenities", preferred.len()),
    }
}

pub(crate) fn relevance(user: &UserProfile, listing: &Listing, now: DateTime<Utc>) -> u8 {
    let Some(university) = user.university.as_deref() else {
        return 0;
    };
    let Some(location) = listing.location.as_ref() else {
        return 0;
    };

    let mut score: u32 = 0;

    if location
        .nearby_universities
        .iter()
        .any(|nearby| nearby.name == university)
    {
        score += weights::RELEVANCE_SAME_UNIVERSITY;
    } else {
        let user_city = user.location.as_ref().and_then(|home| home.city.as_deref());
        let user_state = user.location.as_ref().and_then(|home| home.state.as_deref());

        if user_city.is_some_and(|city| city.eq_ignore_ascii_case(&location.city)) {
            score += weights::RELEVANCE_SAME_CITY;
        } else if user_state.is_some_and(|state| state.eq_ignore_ascii_case(&location.state)) {
            score += weights::RELEVANCE_SAME_STATE;
        }
    }

    let age = now.signed_duration_since(listing.created_at);
    if age <= Duration::days(weights::RELEVANCE_FRESH_DAYS) {
        score += weights::RELEVANCE_FRESH;
    } else if age <= Duration::days(weights::RELEVANCE_RECENT_DAYS) {
        score += weights::RELEVANCE_RECENT;
    }

    score.min(weights::RELEVANCE_CAP) as u8
}
