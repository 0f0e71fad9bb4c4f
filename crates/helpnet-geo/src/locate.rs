use std::time::Duration;

use anyhow::{Result, anyhow};
use helpnet_types::models::Coordinate;
use serde::Deserialize;
use tracing::warn;

/// ip-api.com resolves the caller's public IP to a rough city-level
/// coordinate. Free tier, no key, no SLA.
pub const DEFAULT_ENDPOINT: &str = "http://ip-api.com/json";

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Deserialize)]
struct IpApiBody {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    message: Option<String>,
}

pub struct IpLocator {
    client: reqwest::Client,
    endpoint: String,
}

impl IpLocator {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Best-effort lookup of the caller's approximate coordinate.
    /// Any failure (network, timeout, "fail" payload) collapses to `None`;
    /// nothing propagates past this boundary.
    pub async fn current_location(&self) -> Option<Coordinate> {
        match self.lookup().await {
            Ok(coordinate) => Some(coordinate),
            Err(e) => {
                warn!("IP geolocation lookup failed: {}", e);
                None
            }
        }
    }

    async fn lookup(&self) -> Result<Coordinate> {
        let body = self
            .client
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_lookup(&body)
    }
}

fn parse_lookup(body: &str) -> Result<Coordinate> {
    let body: IpApiBody = serde_json::from_str(body)?;

    if body.status != "success" {
        return Err(anyhow!(
            "geolocation service returned {}: {}",
            body.status,
            body.message.as_deref().unwrap_or("no detail")
        ));
    }

    match (body.lat, body.lon) {
        (Some(lat), Some(lon)) => Ok(Coordinate::new(lat, lon)),
        _ => Err(anyhow!("geolocation response missing coordinates")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_success_payload() {
        let body = r#"{"status":"success","lat":12.9716,"lon":77.5946,"city":"Bengaluru"}"#;
        let coordinate = parse_lookup(body).unwrap();
        assert_eq!(coordinate.latitude, 12.9716);
        assert_eq!(coordinate.longitude, 77.5946);
    }

    #[test]
    fn fail_status_is_an_error() {
        let body = r#"{"status":"fail","message":"private range"}"#;
        let err = parse_lookup(body).unwrap_err();
        assert!(err.to_string().contains("private range"));
    }

    #[test]
    fn missing_coordinates_is_an_error() {
        let body = r#"{"status":"success"}"#;
        assert!(parse_lookup(body).is_err());
    }

    #[test]
    fn garbage_body_is_an_error() {
        assert!(parse_lookup("<html>busy</html>").is_err());
    }
}
