use crate::Database;
use crate::models::{RequestWithOwnerRow, SosRequestRow, UserRow};
use anyhow::Result;
use rusqlite::Connection;

impl Database {
    // -- Users --

    pub fn create_user(
        &self,
        id: &str,
        name: &str,
        role: &str,
        phone: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO users (id, name, role, phone, latitude, longitude)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![id, name, role, phone, latitude, longitude],
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_id(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_id(conn, id))
    }

    // -- SOS requests --

    pub fn insert_request(
        &self,
        id: &str,
        user_id: &str,
        description: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO sos_requests (id, user_id, description, latitude, longitude)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![id, user_id, description, latitude, longitude],
            )?;
            Ok(())
        })
    }

    pub fn get_request_by_id(&self, id: &str) -> Result<Option<SosRequestRow>> {
        self.with_conn(|conn| query_request_by_id(conn, id))
    }

    /// Every stored request joined with its owner's name. The nearby search
    /// scans this whole list; there is no spatial index.
    pub fn all_requests_with_owner(&self) -> Result<Vec<RequestWithOwnerRow>> {
        self.with_conn(query_requests_with_owner)
    }
}

fn query_user_by_id(conn: &Connection, id: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, role, phone, latitude, longitude, created_at
         FROM users WHERE id = ?1",
    )?;

    let row = stmt
        .query_row([id], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                name: row.get(1)?,
                role: row.get(2)?,
                phone: row.get(3)?,
                latitude: row.get(4)?,
                longitude: row.get(5)?,
                created_at: row.get(6)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_request_by_id(conn: &Connection, id: &str) -> Result<Option<SosRequestRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, description, latitude, longitude, created_at
         FROM sos_requests WHERE id = ?1",
    )?;

    let row = stmt
        .query_row([id], |row| {
            Ok(SosRequestRow {
                id: row.get(0)?,
                user_id: row.get(1)?,
                description: row.get(2)?,
                latitude: row.get(3)?,
                longitude: row.get(4)?,
                created_at: row.get(5)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_requests_with_owner(conn: &Connection) -> Result<Vec<RequestWithOwnerRow>> {
    // JOIN users to fetch the owner name in a single query. rowid order keeps
    // equal-distance results stable on insertion order.
    let mut stmt = conn.prepare(
        "SELECT r.id, r.description, r.latitude, r.longitude, u.name
         FROM sos_requests r
         JOIN users u ON r.user_id = u.id
         ORDER BY r.rowid",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(RequestWithOwnerRow {
                id: row.get(0)?,
                description: row.get(1)?,
                latitude: row.get(2)?,
                longitude: row.get(3)?,
                owner_name: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;
    use helpnet_types::models::{Coordinate, Role};

    const ALICE: &str = "11111111-1111-1111-1111-111111111111";
    const REQ: &str = "22222222-2222-2222-2222-222222222222";

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn create_and_fetch_user() {
        let db = db();
        db.create_user("u1", "Alice", "Helper", "555-0100", 12.9716, 77.5946)
            .unwrap();

        let user = db.get_user_by_id("u1").unwrap().unwrap();
        assert_eq!(user.name, "Alice");
        assert_eq!(user.role, "Helper");
        assert_eq!(user.latitude, 12.9716);
        assert_eq!(user.longitude, 77.5946);
    }

    #[test]
    fn unknown_user_is_none() {
        let db = db();
        assert!(db.get_user_by_id("nope").unwrap().is_none());
    }

    #[test]
    fn insert_request_and_join_owner() {
        let db = db();
        db.create_user("u1", "Alice", "Seeker", "555-0100", 12.9716, 77.5946)
            .unwrap();
        db.insert_request("r1", "u1", "need water", 12.9716, 77.5946)
            .unwrap();

        let rows = db.all_requests_with_owner().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].owner_name, "Alice");
        assert_eq!(rows[0].description, "need water");
    }

    #[test]
    fn user_row_converts_to_domain_user() {
        let db = db();
        db.create_user(ALICE, "Alice", "Helper", "555-0100", 12.9716, 77.5946)
            .unwrap();

        let user = db
            .get_user_by_id(ALICE)
            .unwrap()
            .unwrap()
            .into_user()
            .unwrap();
        assert_eq!(user.id.to_string(), ALICE);
        assert_eq!(user.role, Role::Helper);
        assert_eq!(user.coordinate, Coordinate::new(12.9716, 77.5946));
    }

    #[test]
    fn stored_request_keeps_owner_coordinate() {
        let db = db();
        db.create_user(ALICE, "Alice", "Seeker", "555-0100", 12.9716, 77.5946)
            .unwrap();

        let owner = db
            .get_user_by_id(ALICE)
            .unwrap()
            .unwrap()
            .into_user()
            .unwrap();
        db.insert_request(
            REQ,
            ALICE,
            "need water",
            owner.coordinate.latitude,
            owner.coordinate.longitude,
        )
        .unwrap();

        let request = db
            .get_request_by_id(REQ)
            .unwrap()
            .unwrap()
            .into_request()
            .unwrap();
        assert_eq!(request.user_id, owner.id);
        assert_eq!(request.coordinate, owner.coordinate);
    }

    #[test]
    fn request_for_unknown_user_violates_fk() {
        let db = db();
        let result = db.insert_request("r1", "ghost", "help", 0.0, 0.0);
        assert!(result.is_err());
        assert!(db.all_requests_with_owner().unwrap().is_empty());
    }

    #[test]
    fn join_preserves_insertion_order() {
        let db = db();
        db.create_user("u1", "Alice", "Seeker", "555-0100", 1.0, 1.0)
            .unwrap();
        db.create_user("u2", "Bob", "Seeker", "555-0101", 2.0, 2.0)
            .unwrap();
        db.insert_request("r1", "u1", "first", 1.0, 1.0).unwrap();
        db.insert_request("r2", "u2", "second", 2.0, 2.0).unwrap();

        let ids: Vec<String> = db
            .all_requests_with_owner()
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["r1", "r2"]);
    }
}
