use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;
use uuid::Uuid;

use helpnet_types::api::{RegisterRequest, RegisterResponse};

use crate::AppState;
use crate::error::ApiError;

/// POST /api/users — register as Helper or Seeker.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let RegisterRequest {
        name,
        role,
        phone,
        latitude,
        longitude,
    } = req;

    let user_id = Uuid::new_v4();

    // Run blocking DB insert off the async runtime
    let db = state.clone();
    let id = user_id.to_string();
    tokio::task::spawn_blocking(move || {
        db.db
            .create_user(&id, &name, role.as_str(), &phone, latitude, longitude)
    })
    .await
    .map_err(|e| ApiError::internal("spawn_blocking join error", e))?
    .map_err(|e| ApiError::internal("failed to create user", e))?;

    info!(
        "Registered user {} ({:?}) at ({}, {})",
        user_id, role, latitude, longitude
    );

    Ok((StatusCode::CREATED, Json(RegisterResponse { user_id })))
}
