use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Role;

// -- Registration --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub name: String,
    pub role: Role,
    pub phone: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
}

// -- SOS submission --

/// `user_id` stays a plain string on the wire: it is hand-entered, and a
/// malformed id must surface as "invalid user", not a decode failure.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateSosRequest {
    pub user_id: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct CreateSosResponse {
    pub request_id: Uuid,
}

// -- Nearby search --

/// One search hit: a request annotated with its owner's name and the
/// great-circle distance from the query point, rounded to 2 decimals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyRequest {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
}

// -- Geolocation --

#[derive(Debug, Serialize)]
pub struct LocateResponse {
    pub latitude: f64,
    pub longitude: f64,
}
