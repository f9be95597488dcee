use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use unistay::config::SearchConfig;
use unistay::directory::UniversityDirectory;
use unistay::error::AppError;
use unistay::marketplace::{
    Listing, ListingId, ListingRepository, ListingStatus, RepositoryError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryListingRepository {
    listings: Arc<Mutex<HashMap<ListingId, Listing>>>,
}

impl ListingRepository for InMemoryListingRepository {
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
        if guard.contains_key(&listing.id) {
            guard.insert(listing.id.clone(), listing);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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

/// Load the configured CSV directory, or fall back to the builtin set.
pub(crate) fn load_directory(search: &SearchConfig) -> Result<UniversityDirectory, AppError> {
    match &search.university_directory {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            Ok(UniversityDirectory::from_reader(file)?)
        }
        None => Ok(UniversityDirectory::builtin()),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
