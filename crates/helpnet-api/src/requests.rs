use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use helpnet_db::models::RequestWithOwnerRow;
use helpnet_geo::distance_km;
use helpnet_types::api::{CreateSosRequest, CreateSosResponse, NearbyRequest};
use helpnet_types::models::Coordinate;

use crate::AppState;
use crate::error::ApiError;

/// POST /api/requests — submit an SOS request. The request inherits the
/// owner's registered coordinate; an unknown user id is rejected outright
/// with nothing written.
pub async fn create_request(
    State(state): State<AppState>,
    Json(req): Json<CreateSosRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // A malformed id can't possibly reference a user.
    let user_uuid: Uuid = req.user_id.parse().map_err(|_| ApiError::UnknownUser)?;

    let request_id = Uuid::new_v4();

    let db = state.clone();
    let id = request_id.to_string();
    let user_id = user_uuid.to_string();
    let description = req.description;
    tokio::task::spawn_blocking(move || {
        let user = db
            .db
            .get_user_by_id(&user_id)
            .map_err(|e| ApiError::internal("failed to look up user", e))?
            .ok_or(ApiError::UnknownUser)?
            .into_user()
            .map_err(|e| ApiError::internal("corrupt user row", e))?;

        let at = user.coordinate;
        db.db
            .insert_request(&id, &user_id, &description, at.latitude, at.longitude)
            .map_err(|e| ApiError::internal("failed to insert request", e))
    })
    .await
    .map_err(|e| ApiError::internal("spawn_blocking join error", e))??;

    info!("SOS request {} submitted by user {}", request_id, user_uuid);

    Ok((StatusCode::CREATED, Json(CreateSosResponse { request_id })))
}

#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lon: f64,
    pub radius_km: f64,
}

/// GET /api/requests/nearby — all requests within `radius_km` of the query
/// point, closest first. Zero hits is an empty list, not an error.
pub async fn find_nearby(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.all_requests_with_owner())
        .await
        .map_err(|e| ApiError::internal("spawn_blocking join error", e))?
        .map_err(|e| ApiError::internal("failed to load requests", e))?;

    let origin = Coordinate::new(query.lat, query.lon);
    let hits = rank_nearby(origin, query.radius_km, rows);

    Ok(Json(hits))
}

/// Linear scan over every stored request: keep those within `radius_km`
/// (inclusive boundary), sorted ascending by distance. The stable sort plus
/// insertion-ordered input keeps ties in submission order.
fn rank_nearby(
    origin: Coordinate,
    radius_km: f64,
    rows: Vec<RequestWithOwnerRow>,
) -> Vec<NearbyRequest> {
    if radius_km <= 0.0 {
        return Vec::new();
    }

    let mut hits: Vec<(f64, RequestWithOwnerRow)> = rows
        .into_iter()
        .filter_map(|row| {
            let distance = distance_km(origin, Coordinate::new(row.latitude, row.longitude));
            (distance <= radius_km).then_some((distance, row))
        })
        .collect();

    hits.sort_by(|a, b| a.0.total_cmp(&b.0));

    hits.into_iter()
        .map(|(distance, row)| NearbyRequest {
            id: row.id.parse().unwrap_or_else(|e| {
                warn!("Corrupt request id '{}': {}", row.id, e);
                Uuid::default()
            }),
            name: row.owner_name,
            description: row.description,
            latitude: row.latitude,
            longitude: row.longitude,
            distance_km: (distance * 100.0).round() / 100.0,
        })
        .collect()
}
