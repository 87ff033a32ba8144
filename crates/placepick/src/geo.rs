use crate::place::Coordinates;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_LOOKUP_URL: &str = "http://ip-api.com/json/";
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("{0}")]
    Unavailable(String),
    #[error("location lookup failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Where the user's position comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Locator {
    Fixed(Coordinates),
    IpLookup { url: String },
}

impl Default for Locator {
    fn default() -> Self {
        Self::IpLookup {
            url: DEFAULT_LOOKUP_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl LookupResponse {
    fn into_coordinates(self) -> Result<Coordinates, GeoError> {
        if self.status != "success" {
            return Err(GeoError::Unavailable(
                self.message
                    .unwrap_or_else(|| "location lookup was refused".to_string()),
            ));
        }

        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
            _ => Err(GeoError::Unavailable(
                "location lookup returned no coordinates".to_string(),
            )),
        }
    }
}

impl Locator {
    pub async fn locate(&self, http: &reqwest::Client) -> Result<Coordinates, GeoError> {
        match self {
            Self::Fixed(coords) => Ok(*coords),
            Self::IpLookup { url } => {
                log::debug!("Looking up location via {}", url);
                let response: LookupResponse = http
                    .get(url)
                    .timeout(LOOKUP_TIMEOUT)
                    .send()
                    .await?
                    .error_for_status()?
                    .json()
                    .await?;
                response.into_coordinates()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Coordinates, GeoError> {
        serde_json::from_str::<LookupResponse>(json)
            .unwrap()
            .into_coordinates()
    }

    #[test]
    fn test_lookup_success() {
        let coords = parse(r#"{"status":"success","lat":52.52,"lon":13.405,"city":"Berlin"}"#)
            .unwrap();
        assert_eq!(coords, Coordinates::new(52.52, 13.405));
    }

    #[test]
    fn test_lookup_failure_carries_message() {
        let err = parse(r#"{"status":"fail","message":"reserved range"}"#).unwrap_err();
        assert_eq!(err.to_string(), "reserved range");
    }

    #[test]
    fn test_lookup_without_coordinates() {
        assert!(matches!(
            parse(r#"{"status":"success"}"#),
            Err(GeoError::Unavailable(_))
        ));
    }
}
