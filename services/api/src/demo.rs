use crate::infra::load_directory;
use crate::sample;
use chrono::{NaiveDate, TimeZone, Utc};
use clap::Args;
use std::sync::Arc;
use unistay::config::AppConfig;
use unistay::error::AppError;
use unistay::marketplace::geo::{distance_between, format_distance, suggest_transport, DistanceUnit};
use unistay::marketplace::{browse, ListingStatus, MatchEngine, SearchFilters};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Cap the recommendation list (defaults to the configured limit)
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Fix the evaluation date (YYYY-MM-DD, defaults to now)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { limit, today } = args;

    let config = AppConfig::load()?;
    let directory = Arc::new(load_directory(&config.search)?);

    let now = match today {
        Some(date) => {
            let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default();
            Utc.from_utc_datetime(&noon)
        }
        None => Utc::now(),
    };

    let seeded = sample::seed_listings(&directory, config.search.nearby_radius_miles, now);
    let active: Vec<_> = seeded
        .iter()
        .filter(|listing| listing.status == ListingStatus::Active)
        .cloned()
        .collect();

    let student = sample::demo_student();
    let engine = MatchEngine::new(directory.clone());

    println!("Unistay marketplace demo");
    println!(
        "  University directory: {} campuses; {} seeded listings ({} active)",
        directory.len(),
        seeded.len(),
        active.len()
    );

    let results = browse(
        &engine,
        Some(&student),
        active.clone(),
        &SearchFilters::default(),
        now,
    );
    println!("\nBrowse results for {} (relevance order):", student.display_name);
    for entry in &results {
        let city = entry
            .listing
            .location
            .as_ref()
            .map(|location| location.city.as_str())
            .unwrap_or("unknown");
        println!(
            "  relevance {:>3}  match {:>3}  {:<38} {city} ${}",
            entry.relevance_rank(),
            entry.match_rank(),
            entry.listing.title,
            entry.listing.price
        );
    }

    let limit = limit.unwrap_or(config.search.recommendation_limit);
    let recommendations = engine.recommendations(&student, &active, limit, now);
    let origin = student
        .location
        .as_ref()
        .and_then(|home| home.coordinates.as_ref());

    println!("\nTop {} recommendations:", recommendations.len());
    for entry in &recommendations {
        let commute = origin
            .zip(
                entry
                    .listing
                    .location
                    .as_ref()
                    .filter(|location| location.has_valid_coordinates()),
            )
            .map(|(from, location)| {
                let miles = distance_between(from, &location.coordinates(), DistanceUnit::Miles);
                let suggestion = suggest_transport(miles);
                format!(
                    "{} away, ~{} min {}",
                    format_distance(miles),
                    suggestion.minutes,
                    suggestion.mode.label()
                )
            })
            .unwrap_or_else(|| "distance unknown".to_string());

        println!(
            "  {:<38} relevance {:>3}  ({commute})",
            entry.listing.title,
            entry.relevance_rank()
        );
    }

    if let Some(top) = recommendations.first() {
        let report = engine.match_breakdown(&student, &top.listing);
        println!(
            "\nScore components for '{}' (total {}):",
            top.listing.title, report.total
        );
        for component in &report.components {
            println!("  {:>5.1}  {}", component.points, component.notes);
        }
    }

    Ok(())
}
