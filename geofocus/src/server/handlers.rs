//! HTTP endpoint handlers.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use super::AppState;
use crate::cache::CacheStatus;
use crate::centroid::LatLon;
use crate::provider::{AsyncHttpClient, DataUnavailable};

/// Cache policy advertised for the countries payload.
pub const COUNTRIES_CACHE_CONTROL: &str = "s-maxage=3600, stale-while-revalidate";

/// Serves the feature collection body exactly as the source sent it.
pub async fn countries<C: AsyncHttpClient + 'static>(State(state): State<AppState<C>>) -> Response {
    match state.service.collection().await {
        Ok(document) => (
            [
                (header::CONTENT_TYPE, "application/json"),
                (header::CACHE_CONTROL, COUNTRIES_CACHE_CONTROL),
            ],
            document.body().clone(),
        )
            .into_response(),
        Err(e) => unavailable(e),
    }
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    cache: CacheStatus,
}

pub async fn health<C: AsyncHttpClient + 'static>(State(state): State<AppState<C>>) -> Response {
    Json(Health {
        status: "ok",
        cache: state.service.cache_status(),
    })
    .into_response()
}

#[derive(Debug, Deserialize)]
pub struct LocateParams {
    pub q: String,
}

#[derive(Debug, Serialize)]
struct LocateBody {
    index: usize,
    name: String,
    iso_a3: String,
    iso_a2: String,
    point: Option<LatLon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Resolves a query and returns the match with its focus point.
pub async fn locate<C: AsyncHttpClient + 'static>(
    State(state): State<AppState<C>>,
    Query(params): Query<LocateParams>,
) -> Response {
    match state.service.locate(&params.q).await {
        Ok(Some(located)) => {
            let feature = located.feature;
            let (point, error) = match located.point {
                Ok(point) => (Some(point), None),
                Err(e) => (None, Some(e.to_string())),
            };
            Json(LocateBody {
                index: feature.index(),
                name: feature.canonical_name().to_string(),
                iso_a3: feature.iso_code().to_string(),
                iso_a2: feature.iso_a2().to_string(),
                point,
                error,
            })
            .into_response()
        }
        Ok(None) => (StatusCode::NOT_FOUND, Json(json!({"error": "no match"}))).into_response(),
        Err(e) => unavailable(e),
    }
}

fn unavailable(e: DataUnavailable) -> Response {
    error!(error = %e, "Feature collection unavailable");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": e.to_string()})),
    )
        .into_response()
}
