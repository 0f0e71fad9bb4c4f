use axum::{Json, extract::State, response::IntoResponse};

use helpnet_types::api::LocateResponse;

use crate::AppState;
use crate::error::ApiError;

/// GET /api/locate — best-effort IP geolocation. Failure is a 503 the UI
/// treats as "enter your location manually", never a hard error.
pub async fn locate(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let coordinate = state
        .locator
        .current_location()
        .await
        .ok_or(ApiError::GeolocationUnavailable)?;

    Ok(Json(LocateResponse {
        latitude: coordinate.latitude,
        longitude: coordinate.longitude,
    }))
}
