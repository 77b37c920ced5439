use serde::Deserialize;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::Location;

/// Client for the external geocoding API. Lookups go through the
/// `locations` cache table first; the API is only hit on a cache miss.
#[derive(Debug, Clone)]
pub struct Geocoder {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    response: GeocodeBody,
}

#[derive(Debug, Deserialize)]
struct GeocodeBody {
    #[serde(rename = "GeoObjectCollection")]
    collection: GeoObjectCollection,
}

#[derive(Debug, Deserialize)]
struct GeoObjectCollection {
    #[serde(rename = "featureMember")]
    members: Vec<FeatureMember>,
}

#[derive(Debug, Deserialize)]
struct FeatureMember {
    #[serde(rename = "GeoObject")]
    geo_object: GeoObject,
}

#[derive(Debug, Deserialize)]
struct GeoObject {
    #[serde(rename = "Point")]
    point: Point,
}

#[derive(Debug, Deserialize)]
struct Point {
    /// `"lon lat"` pair, space separated.
    pos: String,
}

impl Geocoder {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    /// Ask the geocoder for `(latitude, longitude)` of a free-text address.
    /// `Ok(None)` means the service knows no such place.
    async fn fetch(&self, address: &str) -> anyhow::Result<Option<(f64, f64)>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("geocode", address),
                ("apikey", self.api_key.as_str()),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let decoded: GeocodeResponse = response.json().await?;
        let coords = decoded
            .response
            .collection
            .members
            .first()
            .and_then(|member| parse_pos(&member.geo_object.point.pos));
        Ok(coords)
    }
}

/// Parse the geocoder's `"lon lat"` position string into `(lat, lon)`.
fn parse_pos(pos: &str) -> Option<(f64, f64)> {
    let mut parts = pos.split_whitespace();
    let lon = parts.next()?.parse::<f64>().ok()?;
    let lat = parts.next()?.parse::<f64>().ok()?;
    Some((lat, lon))
}

/// Coordinates for an address: cache hit, or fetch-and-store on miss.
///
/// An address the geocoder does not know is cached with null coordinates
/// so it is not re-requested on every triage view. Transport and decode
/// failures are logged and reported as "no coordinates" without being
/// cached, so the next request retries.
pub async fn resolve_coordinates(
    pool: &DbPool,
    geocoder: &Geocoder,
    address: &str,
) -> AppResult<Option<(f64, f64)>> {
    let cached: Option<Location> =
        sqlx::query_as::<_, Location>("SELECT * FROM locations WHERE address = $1")
            .bind(address)
            .fetch_optional(pool)
            .await?;

    if let Some(row) = cached {
        return Ok(match (row.latitude, row.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        });
    }

    let coords = match geocoder.fetch(address).await {
        Ok(coords) => coords,
        Err(err) => {
            tracing::warn!(error = %err, address, "geocoding failed");
            return Ok(None);
        }
    };

    sqlx::query(
        r#"
        INSERT INTO locations (id, address, latitude, longitude, received_at)
        VALUES ($1, $2, $3, $4, now())
        ON CONFLICT (address) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(address)
    .bind(coords.map(|(lat, _)| lat))
    .bind(coords.map(|(_, lon)| lon))
    .execute(pool)
    .await?;

    Ok(coords)
}

/// Distance in kilometres between two addresses, rounded to 2 decimals.
/// `None` when either address has no known coordinates.
pub async fn calculate_distance(
    pool: &DbPool,
    geocoder: &Geocoder,
    address_from: &str,
    address_to: &str,
) -> AppResult<Option<f64>> {
    let from = resolve_coordinates(pool, geocoder, address_from).await?;
    let to = resolve_coordinates(pool, geocoder, address_to).await?;

    Ok(match (from, to) {
        (Some(from), Some(to)) => Some(round2(haversine_km(from, to))),
        _ => None,
    })
}

/// Great-circle distance in kilometres between two `(lat, lon)` points.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    let (lat1, lon1) = (from.0.to_radians(), from.1.to_radians());
    let (lat2, lon2) = (to.0.to_radians(), to.1.to_radians());

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_between_known_cities() {
        // Moscow -> Saint Petersburg, roughly 634 km great-circle.
        let moscow = (55.7558, 37.6173);
        let petersburg = (59.9343, 30.3351);
        let km = haversine_km(moscow, petersburg);
        assert!((km - 634.0).abs() < 5.0, "got {km}");
    }

    #[test]
    fn haversine_zero_for_same_point() {
        let p = (51.5074, -0.1278);
        assert!(haversine_km(p, p).abs() < 1e-9);
    }

    #[test]
    fn pos_string_parses_lon_lat() {
        assert_eq!(parse_pos("37.6173 55.7558"), Some((55.7558, 37.6173)));
        assert_eq!(parse_pos("garbage"), None);
        assert_eq!(parse_pos(""), None);
    }

    #[test]
    fn geocode_response_decodes() {
        let raw = serde_json::json!({
            "response": {
                "GeoObjectCollection": {
                    "featureMember": [
                        {"GeoObject": {"Point": {"pos": "30.3351 59.9343"}}}
                    ]
                }
            }
        });
        let decoded: GeocodeResponse = serde_json::from_value(raw).unwrap();
        let member = decoded.response.collection.members.first().unwrap();
        assert_eq!(parse_pos(&member.geo_object.point.pos), Some((59.9343, 30.3351)));
    }

    #[test]
    fn rounding_keeps_two_decimals() {
        assert_eq!(round2(12.3456), 12.35);
        assert_eq!(round2(0.004), 0.0);
    }
}
