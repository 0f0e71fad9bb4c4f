pub mod error;
pub mod locate;
pub mod requests;
pub mod users;

use std::sync::Arc;

use helpnet_db::Database;
use helpnet_geo::IpLocator;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub locator: IpLocator,
}
