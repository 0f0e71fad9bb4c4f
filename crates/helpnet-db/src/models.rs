use anyhow::{Result, anyhow};
use chrono::NaiveDateTime;
use helpnet_types::models::{Coordinate, Role, SosRequest, User};

/// Database row types — these map directly to SQLite rows.
/// Distinct from the helpnet-types domain models to keep the DB layer's
/// column view separate from what the rest of the system handles.

pub struct UserRow {
    pub id: String,
    pub name: String,
    pub role: String,
    pub phone: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: String,
}

impl UserRow {
    pub fn into_user(self) -> Result<User> {
        Ok(User {
            id: self.id.parse()?,
            role: parse_role(&self.role, &self.id)?,
            created_at: parse_created_at(&self.created_at)?,
            name: self.name,
            phone: self.phone,
            coordinate: Coordinate::new(self.latitude, self.longitude),
        })
    }
}

pub struct SosRequestRow {
    pub id: String,
    pub user_id: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: String,
}

impl SosRequestRow {
    pub fn into_request(self) -> Result<SosRequest> {
        Ok(SosRequest {
            id: self.id.parse()?,
            user_id: self.user_id.parse()?,
            created_at: parse_created_at(&self.created_at)?,
            description: self.description,
            coordinate: Coordinate::new(self.latitude, self.longitude),
        })
    }
}

/// A request joined with its owner's display name, as the nearby search
/// consumes it.
pub struct RequestWithOwnerRow {
    pub id: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_name: String,
}

fn parse_role(role: &str, user_id: &str) -> Result<Role> {
    match role {
        "Helper" => Ok(Role::Helper),
        "Seeker" => Ok(Role::Seeker),
        other => Err(anyhow!("unknown role '{}' on user {}", other, user_id)),
    }
}

/// SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS" without timezone.
/// Parse as naive UTC and convert.
fn parse_created_at(raw: &str) -> Result<chrono::DateTime<chrono::Utc>> {
    Ok(NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")?.and_utc())
}
