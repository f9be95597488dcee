use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{ListingId, RankedListing, RoomType, SearchFilters, UserProfile};
use super::repository::{ListingRepository, RepositoryError};
use super::service::{MarketplaceService, MarketplaceServiceError};

/// Router builder exposing the search, recommendation, and match-report
/// endpoints over a shared service.
pub fn marketplace_router<R>(service: Arc<MarketplaceService<R>>) -> Router
where
    R: ListingRepository + 'static,
{
    Router::new()
        .route("/api/v1/listings/search", post(search_handler::<R>))
        .route(
            "/api/v1/recommendations",
            post(recommendations_handler::<R>),
        )
        .route(
            "/api/v1/listings/:listing_id/match",
            post(match_report_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchRequest {
    #[serde(default)]
    pub(crate) user: Option<UserProfile>,
    #[serde(default)]
    pub(crate) filters: SearchFilters,
    /// Optional fixed evaluation instant; defaults to the current time.
    #[serde(default)]
    pub(crate) now: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationsRequest {
    pub(crate) user: UserProfile,
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    #[serde(default)]
    pub(crate) now: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MatchReportRequest {
    pub(crate) user: UserProfile,
    #[serde(default)]
    pub(crate) now: Option<DateTime<Utc>>,
}

/// Flattened listing projection for response payloads.
#[derive(Debug, Clone, Serialize)]
pub struct ListingView {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub price: u32,
    pub total_monthly_cost: u32,
    pub room_type: RoomType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<u8>,
}

impl From<&RankedListing> for ListingView {
    fn from(ranked: &RankedListing) -> Self {
        let listing = &ranked.listing;
        Self {
            id: listing.id.0.clone(),
            title: listing.title.clone(),
            city: listing
                .location
                .as_ref()
                .map(|location| location.city.clone()),
            price: listing.price,
            total_monthly_cost: listing.total_monthly_cost(),
            room_type: listing.room_type,
            match_score: ranked.match_score,
            relevance_score: ranked.relevance_score,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ListingsResponse {
    pub(crate) total: usize,
    pub(crate) listings: Vec<ListingView>,
}

fn listings_response(ranked: &[RankedListing]) -> ListingsResponse {
    ListingsResponse {
        total: ranked.len(),
        listings: ranked.iter().map(ListingView::from).collect(),
    }
}

pub(crate) async fn search_handler<R>(
    State(service): State<Arc<MarketplaceService<R>>>,
    axum::Json(request): axum::Json<SearchRequest>,
) -> Response
where
    R: ListingRepository + 'static,
{
    let now = request.now.unwrap_or_else(Utc::now);
    match service.search_at(request.user.as_ref(), &request.filters, now) {
        Ok(ranked) => (StatusCode::OK, axum::Json(listings_response(&ranked))).into_response(),
        Err(err) => service_error_response(err),
    }
}

pub(crate) async fn recommendations_handler<R>(
    State(service): State<Arc<MarketplaceService<R>>>,
    axum::Json(request): axum::Json<RecommendationsRequest>,
) -> Response
where
    R: ListingRepository + 'static,
{
    let now = request.now.unwrap_or_else(Utc::now);
    match service.recommendations_at(&request.user, request.limit, now) {
        Ok(ranked) => (StatusCode::OK, axum::Json(listings_response(&ranked))).into_response(),
        Err(err) => service_error_response(err),
    }
}

pub(crate) async fn match_report_handler<R>(
    State(service): State<Arc<MarketplaceService<R>>>,
    Path(listing_id): Path<String>,
    axum::Json(request): axum::Json<MatchReportRequest>,
) -> Response
where
    R: ListingRepository + 'static,
{
    let id = ListingId(listing_id);
    let now = request.now.unwrap_or_else(Utc::now);
    match service.match_report_at(&request.user, &id, now) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(MarketplaceServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "listing_id": id.0,
                "error": "listing not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(err) => service_error_response(err),
    }
}

fn service_error_response(err: MarketplaceServiceError) -> Response {
    let status = match &err {
        MarketplaceServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        MarketplaceServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        MarketplaceServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
    };

    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
