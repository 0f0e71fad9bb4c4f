use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A point on the Earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Users either offer help or ask for it. Nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Helper,
    Seeker,
}

impl Role {
    /// Stable string form, also the value stored in the `users.role` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Helper => "Helper",
            Role::Seeker => "Seeker",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_form_matches_column_form() {
        let json = serde_json::to_string(&Role::Helper).unwrap();
        assert_eq!(json, "\"Helper\"");
        assert_eq!(Role::Helper.as_str(), "Helper");

        let parsed: Role = serde_json::from_str("\"Seeker\"").unwrap();
        assert_eq!(parsed, Role::Seeker);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
    pub phone: String,
    pub coordinate: Coordinate,
    pub created_at: DateTime<Utc>,
}

/// An SOS request pins its owner's coordinate at submission time.
/// It never moves afterwards, even if a future version lets users move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SosRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub coordinate: Coordinate,
    pub created_at: DateTime<Utc>,
}
