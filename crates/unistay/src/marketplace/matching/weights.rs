//! Rubric point allocations. These are business rules, not tunables: every
//! constant below is part of the scoring contract and the 0-100
//! normalization depends on each branch contributing its documented value.

/// Distance bands for the university-proximity dimension, as
/// (miles upper bound, points) pairs checked in order.
pub(crate) const PROXIMITY_BANDS: [(f64, f64); 5] = [
    (1.0, 35.0),
    (3.0, 30.0),
    (5.0, 25.0),
    (10.0, 20.0),
    (20.0, 15.0),
];

pub(crate) const UNIVERSITY_WEIGHT: f64 = 35.0;
pub(crate) const PROXIMITY_FLOOR: f64 = 5.0;
pub(crate) const PROXIMITY_NAME_MATCH: f64 = 28.0;

pub(crate) const BUDGET_WEIGHT: f64 = 25.0;
pub(crate) const BUDGET_COMFORT_UTILIZATION: f64 = 0.8;
pub(crate) const BUDGET_COMFORT: f64 = 25.0;
pub(crate) const BUDGET_TIGHT: f64 = 20.0;
pub(crate) const BUDGET_UNSET: f64 = 15.0;

pub(crate) const ROOM_TYPE_WEIGHT: f64 = 15.0;
pub(crate) const ROOM_TYPE_MATCH: f64 = 15.0;
pub(crate) const ROOM_TYPE_FLEX: f64 = 5.0;

pub(crate) const LIFESTYLE_WEIGHT: f64 = 15.0;
pub(crate) const LIFESTYLE_STUDY: f64 = 8.0;
pub(crate) const LIFESTYLE_SMOKING: f64 = 4.0;
pub(crate) const LIFESTYLE_PETS: f64 = 3.0;

pub(crate) const AMENITY_WEIGHT: f64 = 10.0;
pub(crate) const AMENITY_DEFAULT: f64 = 5.0;

/// Sum of the five dimension weights; the normalization denominator.
pub(crate) const MAX_TOTAL: f64 =
    UNIVERSITY_WEIGHT + BUDGET_WEIGHT + ROOM_TYPE_WEIGHT + LIFESTYLE_WEIGHT + AMENITY_WEIGHT;

pub(crate) const RELEVANCE_SAME_UNIVERSITY: u32 = 50;
pub(crate) const RELEVANCE_SAME_CITY: u32 = 30;
pub(crate) const RELEVANCE_SAME_STATE: u32 = 20;

pub(crate) const RELEVANCE_FRESH_DAYS: i64 = 7;
pub(crate) const RELEVANCE_RECENT_DAYS: i64 = 30;
pub(crate) const RELEVANCE_FRESH: u32 = 20;
pub(crate) const RELEVANCE_RECENT: u32 = 10;

pub(crate) const RELEVANCE_CAP: u32 = 100;
