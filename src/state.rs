use crate::db::{DbPool, OrmConn};
use crate::geo::Geocoder;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub geocoder: Geocoder,
}
